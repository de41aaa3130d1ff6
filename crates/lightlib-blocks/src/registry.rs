use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use hashbrown::{HashMap, HashSet};

use super::config::{BlockDef, BlocksConfig, GrowsOnCfg, MultiFaceDef};
use super::direction::Direction;
use super::multiface::MultiFaceBlock;
use super::types::{Block, BlockId, FluidKind, FluidState};

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid blocks config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("block id {id} is used by both '{first}' and '{second}'")]
    DuplicateId {
        id: BlockId,
        first: String,
        second: String,
    },

    #[error("block name '{0}' is defined twice")]
    DuplicateName(String),

    #[error("'{block}' grows on unknown block '{name}'")]
    UnknownBlock { block: String, name: String },

    #[error("'{block}' has unknown grows_on rule '{rule}' (expected \"any\", \"solid\" or a list of names)")]
    UnknownGrowthRule { block: String, rule: String },
}

#[derive(Clone, Debug)]
pub struct BlockType {
    pub id: BlockId,
    pub name: String,
    pub solid: bool,
    pub fluid: Option<FluidKind>,
}

impl BlockType {
    fn placeholder(id: BlockId) -> Self {
        BlockType {
            id,
            name: String::new(),
            solid: false,
            fluid: None,
        }
    }

    #[inline]
    fn is_placeholder(&self) -> bool {
        self.name.is_empty()
    }
}

/// Block types by id and name, plus the multi-face variants among them.
#[derive(Default, Clone, Debug)]
pub struct BlockRegistry {
    pub blocks: Vec<BlockType>,
    pub by_name: HashMap<String, BlockId>,
    pub unknown_block_id: Option<BlockId>,
    multi_face: HashMap<BlockId, MultiFaceBlock>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, id: BlockId) -> Option<&BlockType> {
        self.blocks.get(id as usize).filter(|t| !t.is_placeholder())
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    pub fn block_by_name(&self, name: &str) -> Option<Block> {
        self.id_by_name(name).map(|id| Block::new(id, 0))
    }

    /// Substitute for ids the host does not know; air when unconfigured.
    pub fn unknown_block(&self) -> Block {
        Block::new(self.unknown_block_id.unwrap_or(Block::AIR.id), 0)
    }

    #[inline]
    pub fn multi_face(&self, id: BlockId) -> Option<&MultiFaceBlock> {
        self.multi_face.get(&id)
    }

    pub fn multi_face_by_name(&self, name: &str) -> Option<&MultiFaceBlock> {
        self.id_by_name(name).and_then(|id| self.multi_face(id))
    }

    pub fn multi_face_blocks(&self) -> impl Iterator<Item = &MultiFaceBlock> {
        self.multi_face.values()
    }

    pub fn is_solid(&self, block: Block) -> bool {
        self.get(block.id).is_some_and(|t| t.solid)
    }

    /// Fluid in a cell holding `block`; level 0 of a fluid block is its still source.
    pub fn fluid_state(&self, block: Block) -> FluidState {
        match self.get(block.id).and_then(|t| t.fluid) {
            Some(FluidKind::Water) => FluidState::Water {
                still: block.state == 0,
            },
            None => match self.multi_face(block.id) {
                Some(mf) if mf.is_waterlogged(block) => FluidState::Water { still: true },
                _ => FluidState::Empty,
            },
        }
    }

    pub fn register(&mut self, ty: BlockType) -> Result<BlockId, RegistryError> {
        if self.by_name.contains_key(&ty.name) {
            return Err(RegistryError::DuplicateName(ty.name));
        }
        let id = ty.id;
        if let Some(existing) = self.get(id) {
            return Err(RegistryError::DuplicateId {
                id,
                first: existing.name.clone(),
                second: ty.name,
            });
        }
        let start = self.blocks.len();
        if start <= id as usize {
            self.blocks
                .extend((start..=id as usize).map(|i| BlockType::placeholder(i as BlockId)));
        }
        self.by_name.insert(ty.name.clone(), id);
        self.blocks[id as usize] = ty;
        Ok(id)
    }

    /// Attaches a multi-face policy to an already registered block id.
    pub fn register_multi_face(&mut self, block: MultiFaceBlock) {
        self.multi_face.insert(block.id(), block);
    }

    pub fn from_config(cfg: BlocksConfig) -> Result<Self, RegistryError> {
        let mut reg = BlockRegistry::new();
        let mut pending: Vec<(BlockId, String, MultiFaceDef)> = Vec::new();
        for def in cfg.blocks.into_iter() {
            let BlockDef {
                name,
                id,
                solid,
                fluid,
                multi_face,
            } = def;
            let id = id.unwrap_or(reg.blocks.len() as BlockId);
            let solid = solid.unwrap_or(fluid.is_none() && multi_face.is_none());
            reg.register(BlockType {
                id,
                name: name.clone(),
                solid,
                fluid,
            })?;
            if let Some(mf) = multi_face {
                pending.push((id, name, mf));
            }
        }
        // Growth rules may name blocks declared later in the file.
        for (id, name, def) in pending {
            let block = reg.compile_multi_face(id, name, def)?;
            reg.register_multi_face(block);
        }
        if let Some(name) = cfg.unknown_block {
            reg.unknown_block_id = reg.id_by_name(&name);
            if reg.unknown_block_id.is_none() {
                log::warn!("unknown_block '{}' is not defined; falling back to air", name);
            }
        }
        log::info!(
            "block registry ready: {} block(s), {} multi-face",
            reg.by_name.len(),
            reg.multi_face.len()
        );
        Ok(reg)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, RegistryError> {
        let cfg: BlocksConfig = toml::from_str(toml_str)?;
        Self::from_config(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&s)
    }

    fn compile_multi_face(
        &self,
        id: BlockId,
        name: String,
        def: MultiFaceDef,
    ) -> Result<MultiFaceBlock, RegistryError> {
        let allowed: Vec<Direction> = def.directions.unwrap_or_else(|| Direction::ALL.to_vec());
        let mut builder = MultiFaceBlock::builder(id)
            .directions(move |d| allowed.contains(&d))
            .waterloggable(def.waterloggable.unwrap_or(false));
        match def.grows_on {
            None => {}
            Some(GrowsOnCfg::Rule(rule)) => match rule.as_str() {
                "any" => {}
                "solid" => {
                    let solid: HashSet<BlockId> = self
                        .blocks
                        .iter()
                        .map(|t| t.id)
                        .filter(|&bid| self.is_solid(Block::new(bid, 0)))
                        .collect();
                    builder = builder.grows_on(move |b| solid.contains(&b.id));
                }
                _ => {
                    return Err(RegistryError::UnknownGrowthRule { block: name, rule });
                }
            },
            Some(GrowsOnCfg::Blocks(names)) => {
                let mut ids: HashSet<BlockId> = HashSet::with_capacity(names.len());
                for n in names {
                    match self.id_by_name(&n) {
                        Some(bid) => {
                            ids.insert(bid);
                        }
                        None => {
                            return Err(RegistryError::UnknownBlock { block: name, name: n });
                        }
                    }
                }
                builder = builder.grows_on(move |b| ids.contains(&b.id));
            }
        }
        Ok(builder.name(name).build())
    }
}
