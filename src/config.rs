use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{IoResultExt, Result};

/// repository configuration stored in config.toml
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub core: CoreConfig,
    #[serde(default)]
    pub ignore: IgnoreConfig,
}

/// object store settings
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreConfig {
    /// zstd level used when writing object files
    #[serde(default = "default_compression_level")]
    pub compression_level: i32,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            compression_level: default_compression_level(),
        }
    }
}

fn default_compression_level() -> i32 {
    3
}

/// entries skipped when snapshotting the working tree
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreConfig {
    /// exact entry names
    #[serde(default)]
    pub names: Vec<String>,
    /// glob patterns matched against entry names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<String>,
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            names: [".twig", ".git", "target", ".vscode", ".idea"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            patterns: vec![],
        }
    }
}

impl Config {
    /// load config from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).with_path(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// load config from file, falling back to defaults if it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// save config to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).with_path(path)?;
        Ok(())
    }
}
