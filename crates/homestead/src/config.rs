//! # Configuration
//!
//! Store settings are managed by [`confique`], loaded in layers:
//! 1. **Environment variables**: `HOMESTEAD_DATA_FILE`.
//! 2. **Config file**: `homestead.toml`, when present.
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_file` | `customers.yaml` | YAML document holding the customer collection |

use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "homestead.toml";

/// Configuration for the record store.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path of the customer document. Relative paths resolve against the
    /// working directory of the process.
    #[config(env = "HOMESTEAD_DATA_FILE", default = "customers.yaml")]
    pub data_file: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("customers.yaml"),
        }
    }
}

impl StoreConfig {
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    pub fn load(path: Option<&Path>) -> Result<Self, confique::Error> {
        let mut builder = Self::builder().env();
        for file in config_files(path) {
            builder = builder.file(file);
        }
        builder.load()
    }
}

/// Candidate config files, highest priority first.
///
/// An explicit path wins; otherwise `./homestead.toml` and then the per-user
/// config directory are consulted. Files that do not exist are skipped by the
/// loader.
pub fn config_files(explicit: Option<&Path>) -> Vec<PathBuf> {
    if let Some(path) = explicit {
        return vec![path.to_path_buf()];
    }
    let mut files = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(dirs) = ProjectDirs::from("com", "homestead", "homestead") {
        files.push(dirs.config_dir().join(CONFIG_FILE_NAME));
    }
    files
}
