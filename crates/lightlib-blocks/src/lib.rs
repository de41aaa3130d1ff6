//! Block values, directions, and the multi-face block policy.
#![forbid(unsafe_code)]

pub mod config;
pub mod direction;
pub mod faces;
pub mod multiface;
pub mod registry;
pub mod types;
pub mod world;

pub use direction::{Axis, BlockPos, Direction, Mirror, Rotation};
pub use faces::{DirectionSet, pack_directions, unpack_directions};
pub use multiface::{GrowthPredicate, MultiFaceBlock, MultiFaceBuilder};
pub use registry::{BlockRegistry, BlockType, RegistryError};
pub use types::{Block, BlockId, BlockState, FluidKind, FluidState, PlacementContext, Player};
pub use world::{BlockView, WorldAccess};
