use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

// Bootstrap settings, usually `lightlib.toml` next to the host's config
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct LightLibConfig {
    // env_logger filter used when RUST_LOG is unset, e.g. "info,lightlib_blocks=debug"
    #[serde(default)]
    pub log_filter: Option<String>,
    // Path to a blocks.toml; relative paths resolve against the config file's directory
    #[serde(default)]
    pub blocks: Option<PathBuf>,
}

impl LightLibConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)?;
        let mut cfg = Self::from_toml_str(&s)?;
        if let (Some(blocks), Some(dir)) = (cfg.blocks.as_mut(), path.parent()) {
            if blocks.is_relative() {
                *blocks = dir.join(&*blocks);
            }
        }
        Ok(cfg)
    }
}
