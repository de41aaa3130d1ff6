use serde::{Deserialize, Serialize};

use crate::direction::{BlockPos, Direction};

// Compact block value as stored by the host world
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub state: BlockState,
}

pub type BlockId = u16;
pub type BlockState = u16;

impl Block {
    pub const AIR: Block = Block { id: 0, state: 0 };

    #[inline]
    pub const fn new(id: BlockId, state: BlockState) -> Self {
        Self { id, state }
    }

    #[inline]
    pub const fn is_air(self) -> bool {
        self.id == Block::AIR.id
    }

    #[inline]
    pub const fn is_of(self, id: BlockId) -> bool {
        self.id == id
    }

    #[inline]
    pub const fn with_state(self, state: BlockState) -> Block {
        Block { id: self.id, state }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FluidKind {
    Water,
}

/// Fluid occupying a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FluidState {
    #[default]
    Empty,
    Water {
        still: bool,
    },
}

impl FluidState {
    #[inline]
    pub fn is_still_water(self) -> bool {
        matches!(self, FluidState::Water { still: true })
    }
}

/// The acting player as seen by block callbacks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub sneaking: bool,
    pub horizontal_facing: Direction,
}

impl Player {
    pub fn new(horizontal_facing: Direction, sneaking: bool) -> Self {
        Self {
            sneaking,
            horizontal_facing,
        }
    }

    pub fn from_yaw(yaw_deg: f32, sneaking: bool) -> Self {
        Self::new(Direction::from_yaw(yaw_deg), sneaking)
    }
}

/// Inputs for placing a block item into the world.
pub struct PlacementContext<'w, W: ?Sized> {
    pub world: &'w W,
    pub pos: BlockPos,
    pub player: Option<Player>,
    /// Candidate faces in priority order.
    pub directions: Vec<Direction>,
}

impl<'w, W: ?Sized> PlacementContext<'w, W> {
    pub fn new(
        world: &'w W,
        pos: BlockPos,
        player: Option<Player>,
        directions: impl IntoIterator<Item = Direction>,
    ) -> Self {
        Self {
            world,
            pos,
            player,
            directions: directions.into_iter().collect(),
        }
    }

    /// Candidates ordered by alignment with the player's look vector.
    pub fn from_look(
        world: &'w W,
        pos: BlockPos,
        player: Option<Player>,
        look: lightlib_geom::Vec3,
    ) -> Self {
        Self::new(world, pos, player, Direction::facing_order(look))
    }

    #[inline]
    pub fn is_sneaking(&self) -> bool {
        self.player.is_some_and(|p| p.sneaking)
    }
}
