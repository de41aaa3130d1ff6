//! Host world seams: what block callbacks may read and write.

use crate::direction::BlockPos;
use crate::types::{Block, FluidState};

/// Read access to world cells.
pub trait BlockView {
    fn block_at(&self, pos: BlockPos) -> Block;

    fn fluid_at(&self, _pos: BlockPos) -> FluidState {
        FluidState::Empty
    }
}

/// Mutable world access used by break handling.
pub trait WorldAccess: BlockView {
    fn set_block(&mut self, pos: BlockPos, block: Block);

    /// Visual feedback only; nothing depends on it having happened.
    fn spawn_break_particles(&mut self, _pos: BlockPos, _block: Block) {}
}

impl<T: BlockView + ?Sized> BlockView for &T {
    fn block_at(&self, pos: BlockPos) -> Block {
        (**self).block_at(pos)
    }

    fn fluid_at(&self, pos: BlockPos) -> FluidState {
        (**self).fluid_at(pos)
    }
}

impl<T: BlockView + ?Sized> BlockView for &mut T {
    fn block_at(&self, pos: BlockPos) -> Block {
        (**self).block_at(pos)
    }

    fn fluid_at(&self, pos: BlockPos) -> FluidState {
        (**self).fluid_at(pos)
    }
}
