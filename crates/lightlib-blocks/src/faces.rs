//! Six-bit direction sets and the packed byte codec.

use bitflags::bitflags;

use crate::direction::Direction;

bitflags! {
    /// Subset of the six directions, one bit per [`Direction`] ordinal.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DirectionSet: u8 {
        const DOWN = 1 << 0;
        const UP = 1 << 1;
        const NORTH = 1 << 2;
        const SOUTH = 1 << 3;
        const WEST = 1 << 4;
        const EAST = 1 << 5;

        const HORIZONTAL = Self::NORTH.bits() | Self::SOUTH.bits() | Self::WEST.bits() | Self::EAST.bits();
    }
}

impl DirectionSet {
    pub const EMPTY: DirectionSet = DirectionSet::empty();

    #[inline]
    pub const fn of(dir: Direction) -> DirectionSet {
        DirectionSet::from_bits_retain(1 << dir as u8)
    }

    #[inline]
    pub const fn has(self, dir: Direction) -> bool {
        self.bits() & (1 << dir as u8) != 0
    }

    #[inline]
    pub const fn with(self, dir: Direction) -> DirectionSet {
        DirectionSet::from_bits_retain(self.bits() | (1 << dir as u8))
    }

    #[inline]
    pub const fn without(self, dir: Direction) -> DirectionSet {
        DirectionSet::from_bits_retain(self.bits() & !(1 << dir as u8))
    }

    #[inline]
    pub fn toggled(self, dir: Direction, on: bool) -> DirectionSet {
        if on { self.with(dir) } else { self.without(dir) }
    }

    #[inline]
    pub const fn len(self) -> u32 {
        self.bits().count_ones()
    }

    /// Members in ordinal order.
    pub fn directions(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.has(*d))
    }

    /// Number of members lying on the given axis.
    pub fn count_on_axis(self, axis: crate::direction::Axis) -> u32 {
        self.directions().filter(|d| d.axis() == axis).count() as u32
    }

    /// Every subset of `self`, starting with the empty set.
    pub fn subsets(self) -> impl Iterator<Item = DirectionSet> {
        let full = self.bits();
        // Walk submasks of `full` in increasing order.
        let mut next = Some(0u8);
        std::iter::from_fn(move || {
            let cur = next?;
            next = if cur == full {
                None
            } else {
                Some(cur.wrapping_sub(full) & full)
            };
            Some(DirectionSet::from_bits_retain(cur))
        })
    }

    /// Remaps every member through `f`; members collide only if `f` does.
    pub fn map(self, f: impl Fn(Direction) -> Direction) -> DirectionSet {
        self.directions()
            .fold(DirectionSet::EMPTY, |acc, d| acc.with(f(d)))
    }
}

impl FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        iter.into_iter()
            .fold(DirectionSet::EMPTY, |acc, d| acc.with(d))
    }
}

/// Packs directions into a byte, setting bit `ordinal(d)` for every input.
pub fn pack_directions<I: IntoIterator<Item = Direction>>(directions: I) -> u8 {
    directions.into_iter().collect::<DirectionSet>().bits()
}

/// Inverse of [`pack_directions`]; bits 6 and 7 are ignored.
pub fn unpack_directions(packed: u8) -> DirectionSet {
    DirectionSet::from_bits_truncate(packed & 0b11_1111)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_accumulates_every_direction() {
        let packed = pack_directions([Direction::North, Direction::Down, Direction::East]);
        assert_eq!(packed, 0b10_0101);
        assert_eq!(pack_directions(Vec::<Direction>::new()), 0);
    }

    #[test]
    fn toggled_sets_and_clears_one_member() {
        let base = DirectionSet::NORTH | DirectionSet::UP;
        assert_eq!(
            base.toggled(Direction::East, true),
            DirectionSet::NORTH | DirectionSet::UP | DirectionSet::EAST
        );
        assert_eq!(base.toggled(Direction::North, false), DirectionSet::UP);
        assert_eq!(base.toggled(Direction::Down, false), base);
        // bitflags' own in-place `set` still works alongside it
        let mut m = base;
        m.set(DirectionSet::UP, false);
        assert_eq!(m, DirectionSet::NORTH);
    }

    #[test]
    fn unpack_ignores_high_bits() {
        assert_eq!(unpack_directions(0b1100_0010), DirectionSet::UP);
    }

    #[test]
    fn subsets_enumerates_power_set() {
        let base = DirectionSet::NORTH | DirectionSet::UP | DirectionSet::WEST;
        let subs: Vec<_> = base.subsets().collect();
        assert_eq!(subs.len(), 8);
        assert_eq!(subs[0], DirectionSet::EMPTY);
        assert_eq!(*subs.last().unwrap(), base);
        assert!(subs.iter().all(|s| base.contains(*s)));
        assert_eq!(DirectionSet::EMPTY.subsets().count(), 1);
        assert_eq!(DirectionSet::all().subsets().count(), 64);
    }

    #[test]
    fn horizontal_constant_matches_directions() {
        let h: DirectionSet = Direction::HORIZONTAL.into_iter().collect();
        assert_eq!(h, DirectionSet::HORIZONTAL);
    }
}
