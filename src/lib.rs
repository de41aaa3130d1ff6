//! LightLib: reusable block behaviors for voxel worlds.
//!
//! The interesting part lives in [`lightlib_blocks::multiface`]; this crate wires
//! up logging and configuration and re-exports the workspace crates.
#![forbid(unsafe_code)]

pub mod config;

pub use config::LightLibConfig;
pub use lightlib_blocks as blocks;
pub use lightlib_blocks::{
    Block, BlockPos, BlockRegistry, BlockView, Direction, DirectionSet, Mirror, MultiFaceBlock,
    PlacementContext, Player, RegistryError, Rotation, WorldAccess,
};
pub use lightlib_edit::WorldStore;
pub use lightlib_geom::{Aabb, Vec3, VoxelShape};

pub const MOD_ID: &str = "lightlib";
pub const MOD_NAME: &str = "Light Lib";

/// Installs the stdout logger. Honors `RUST_LOG`, otherwise uses `default_filter`
/// (or `info`). Safe to call more than once.
pub fn init_logging(default_filter: Option<&str>) {
    let mut builder = env_logger::Builder::new();
    builder
        .target(env_logger::Target::Stdout)
        .parse_filters(default_filter.unwrap_or("info"));
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    // A host may already have installed its own logger.
    let _ = builder.try_init();
}

/// Library state after bootstrap.
#[derive(Debug, Default)]
pub struct LightLib {
    pub registry: BlockRegistry,
}

/// Bootstrap entrypoint for a host: logging first, then the block registry.
pub fn init(mod_name: &str, cfg: &LightLibConfig) -> Result<LightLib, RegistryError> {
    init_logging(cfg.log_filter.as_deref());
    log::info!("Lighting up your world with {}!", mod_name);
    let registry = match &cfg.blocks {
        Some(path) => BlockRegistry::from_path(path)?,
        None => {
            log::debug!("no blocks file configured; starting with an empty registry");
            BlockRegistry::new()
        }
    };
    Ok(LightLib { registry })
}
