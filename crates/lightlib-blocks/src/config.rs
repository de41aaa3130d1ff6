use serde::Deserialize;

use crate::direction::Direction;
use crate::types::FluidKind;

// Top-level blocks config file
#[derive(Deserialize, Debug, Clone, Default)]
pub struct BlocksConfig {
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
    // Optional name of the block hosts should substitute for unknown ids.
    #[serde(default)]
    pub unknown_block: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BlockDef {
    pub name: String,
    #[serde(default)]
    pub id: Option<u16>,
    #[serde(default)]
    pub solid: Option<bool>,
    #[serde(default)]
    pub fluid: Option<FluidKind>,

    // Present for blocks with independently grown faces
    #[serde(default)]
    pub multi_face: Option<MultiFaceDef>,
}

impl BlockDef {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            solid: None,
            fluid: None,
            multi_face: None,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct MultiFaceDef {
    // Defaults to all six directions
    #[serde(default)]
    pub directions: Option<Vec<Direction>>,
    #[serde(default)]
    pub waterloggable: Option<bool>,
    #[serde(default)]
    pub grows_on: Option<GrowsOnCfg>,
}

// grows_on = "any" | "solid" | ["stone", "dirt"]
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum GrowsOnCfg {
    Rule(String),
    Blocks(Vec<String>),
}
