//! Catalog descriptor lookup and parsing.
//!
//! Each catalog entry is a YAML file in the catalog directory declaring the
//! environment variables a server needs. Only the `env` list is interpreted
//! here; the rest of the descriptor belongs to other tooling.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{McpdiffError, Result};

/// Parsed catalog descriptor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Descriptor {
    /// Environment variables declared by the entry.
    #[serde(default)]
    pub env: Vec<EnvVarSpec>,
}

/// One declared environment variable.
#[derive(Debug, Clone, Deserialize)]
pub struct EnvVarSpec {
    /// Variable name as it appears in the environment.
    pub key: String,

    /// Human-readable display name.
    #[serde(default)]
    pub name: Option<String>,

    /// What the variable is for.
    #[serde(default)]
    pub description: Option<String>,

    /// Whether the server cannot run without it.
    #[serde(default)]
    pub required: bool,

    /// Whether the value is a secret.
    #[serde(default)]
    pub sensitive: bool,
}

impl Descriptor {
    /// Specs for the variables the server cannot run without.
    pub fn required_vars(&self) -> impl Iterator<Item = &EnvVarSpec> {
        self.env.iter().filter(|v| v.required)
    }

    /// Display name for a declared key, when the descriptor provides one.
    pub fn display_name(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .find(|v| v.key == key)
            .and_then(|v| v.name.as_deref())
    }
}

/// Resolve a catalog identifier to its descriptor file, if any.
///
/// Tries `<id>.yaml`, `<id>.yml`, then the identifier with `-` mapped to `_`
/// plus `.yaml`. The first existing candidate wins.
pub fn find_descriptor(catalog_dir: &Path, entry_id: &str) -> Option<PathBuf> {
    let candidates = [
        catalog_dir.join(format!("{}.yaml", entry_id)),
        catalog_dir.join(format!("{}.yml", entry_id)),
        catalog_dir.join(format!("{}.yaml", entry_id.replace('-', "_"))),
    ];

    candidates.into_iter().find(|path| path.is_file())
}

/// Load and parse a descriptor file.
pub fn load_descriptor(path: &Path) -> Result<Descriptor> {
    let content = fs::read_to_string(path)?;
    serde_yaml::from_str(&content).map_err(|e| McpdiffError::DescriptorParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
