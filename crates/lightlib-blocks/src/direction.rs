//! Cardinal directions, block positions, and the rotation/mirror symmetries.

use lightlib_geom::Vec3;
use serde::{Deserialize, Serialize};

/// Six axis-aligned directions.
///
/// Ordinals are stable and double as bit indices in [`crate::DirectionSet`].
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// -Y
    Down = 0,
    /// +Y
    Up = 1,
    /// -Z
    North = 2,
    /// +Z
    South = 3,
    /// -X
    West = 4,
    /// +X
    East = 5,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Down,
        Direction::Up,
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// Horizontal directions in yaw order (0° faces south, turning towards west).
    pub const HORIZONTAL: [Direction; 4] = [
        Direction::South,
        Direction::West,
        Direction::North,
        Direction::East,
    ];

    #[inline]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn from_ordinal(i: usize) -> Option<Direction> {
        match i {
            0 => Some(Direction::Down),
            1 => Some(Direction::Up),
            2 => Some(Direction::North),
            3 => Some(Direction::South),
            4 => Some(Direction::West),
            5 => Some(Direction::East),
            _ => None,
        }
    }

    #[inline]
    pub const fn axis(self) -> Axis {
        match self {
            Direction::Down | Direction::Up => Axis::Y,
            Direction::North | Direction::South => Axis::Z,
            Direction::West | Direction::East => Axis::X,
        }
    }

    #[inline]
    pub const fn is_horizontal(self) -> bool {
        !matches!(self.axis(), Axis::Y)
    }

    #[inline]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Down => Direction::Up,
            Direction::Up => Direction::Down,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
        }
    }

    /// Unit offset `(dx, dy, dz)`.
    #[inline]
    pub const fn offset(self) -> (i32, i32, i32) {
        match self {
            Direction::Down => (0, -1, 0),
            Direction::Up => (0, 1, 0),
            Direction::North => (0, 0, -1),
            Direction::South => (0, 0, 1),
            Direction::West => (-1, 0, 0),
            Direction::East => (1, 0, 0),
        }
    }

    #[inline]
    pub fn unit_vector(self) -> Vec3 {
        let (x, y, z) = self.offset();
        Vec3::new(x as f32, y as f32, z as f32)
    }

    /// Clockwise quarter turn seen from above; vertical directions are unchanged.
    #[inline]
    pub const fn rotate_y_clockwise(self) -> Direction {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
            d => d,
        }
    }

    #[inline]
    pub const fn rotate_y_counter_clockwise(self) -> Direction {
        match self {
            Direction::North => Direction::West,
            Direction::West => Direction::South,
            Direction::South => Direction::East,
            Direction::East => Direction::North,
            d => d,
        }
    }

    /// Horizontal facing for a yaw angle in degrees.
    pub fn from_yaw(yaw_deg: f32) -> Direction {
        let idx = ((yaw_deg / 90.0 + 0.5).floor() as i32) & 3;
        Direction::HORIZONTAL[idx as usize]
    }

    /// All six directions ordered by how closely they align with `look`.
    ///
    /// Ties keep ordinal order, so a zero look vector yields [`Direction::ALL`].
    pub fn facing_order(look: Vec3) -> [Direction; 6] {
        let mut dirs = Direction::ALL;
        dirs.sort_by(|a, b| {
            let da = look.dot(a.unit_vector());
            let db = look.dot(b.unit_vector());
            db.total_cmp(&da)
        });
        dirs
    }

    pub const fn name(self) -> &'static str {
        match self {
            Direction::Down => "down",
            Direction::Up => "up",
            Direction::North => "north",
            Direction::South => "south",
            Direction::West => "west",
            Direction::East => "east",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Integer world position of a block cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const ORIGIN: BlockPos = BlockPos::new(0, 0, 0);

    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn offset(self, dir: Direction) -> BlockPos {
        let (dx, dy, dz) = dir.offset();
        BlockPos::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

impl From<(i32, i32, i32)> for BlockPos {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        BlockPos::new(x, y, z)
    }
}

/// Rotation about the vertical axis in quarter turns.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Rotation {
    #[default]
    None,
    Clockwise90,
    Clockwise180,
    CounterClockwise90,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::None,
        Rotation::Clockwise90,
        Rotation::Clockwise180,
        Rotation::CounterClockwise90,
    ];

    #[inline]
    fn quarter_turns(self) -> u8 {
        match self {
            Rotation::None => 0,
            Rotation::Clockwise90 => 1,
            Rotation::Clockwise180 => 2,
            Rotation::CounterClockwise90 => 3,
        }
    }

    #[inline]
    fn from_quarter_turns(n: u8) -> Rotation {
        match n & 3 {
            0 => Rotation::None,
            1 => Rotation::Clockwise90,
            2 => Rotation::Clockwise180,
            _ => Rotation::CounterClockwise90,
        }
    }

    /// Rotation equivalent to applying `self` then `other`.
    pub fn compose(self, other: Rotation) -> Rotation {
        Rotation::from_quarter_turns(self.quarter_turns() + other.quarter_turns())
    }

    pub fn apply(self, dir: Direction) -> Direction {
        match self {
            Rotation::None => dir,
            Rotation::Clockwise90 => dir.rotate_y_clockwise(),
            Rotation::Clockwise180 => dir.rotate_y_clockwise().rotate_y_clockwise(),
            Rotation::CounterClockwise90 => dir.rotate_y_counter_clockwise(),
        }
    }
}

/// Reflection across a vertical plane.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mirror {
    #[default]
    None,
    /// Flips the Z axis (north <-> south).
    LeftRight,
    /// Flips the X axis (east <-> west).
    FrontBack,
}

impl Mirror {
    pub fn apply(self, dir: Direction) -> Direction {
        match (self, dir.axis()) {
            (Mirror::LeftRight, Axis::Z) | (Mirror::FrontBack, Axis::X) => dir.opposite(),
            _ => dir,
        }
    }
}
