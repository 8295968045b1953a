//! Environment-readiness gate.
//!
//! Before any introspection runs, the gate decides whether the calling
//! environment carries the credentials the catalog entry declares. All of
//! its failure modes degrade to "inconclusive, proceed"; the gate never
//! aborts the pipeline.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use crate::catalog;

/// Outcome of the readiness check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvCheck {
    /// Every required variable is present; validation can proceed.
    Ready,

    /// One or more required variables are absent.
    MissingVars {
        /// Names of the absent variables.
        missing: BTreeSet<String>,
        /// Display names for keys that declare one.
        labels: BTreeMap<String, String>,
    },

    /// No descriptor resolves for the catalog identifier.
    EntryMissing,

    /// A descriptor exists but the check itself failed.
    Unavailable { reason: String },
}

impl EnvCheck {
    /// Whether the pipeline should continue to introspection.
    ///
    /// Only a definite set of missing credentials blocks validation;
    /// inconclusive outcomes proceed.
    pub fn can_validate(&self) -> bool {
        !matches!(self, Self::MissingVars { .. })
    }
}

/// Check whether the environment satisfies a catalog entry's requirements.
///
/// `env` is the calling environment as an explicit mapping, so callers
/// (and tests) control exactly what the gate sees. A variable that is set
/// to an empty string counts as absent.
pub fn check(catalog_dir: &Path, entry_id: &str, env: &HashMap<String, String>) -> EnvCheck {
    let Some(path) = catalog::find_descriptor(catalog_dir, entry_id) else {
        tracing::debug!("no catalog descriptor for '{}'", entry_id);
        return EnvCheck::EntryMissing;
    };

    let descriptor = match catalog::load_descriptor(&path) {
        Ok(d) => d,
        Err(e) => {
            return EnvCheck::Unavailable {
                reason: e.to_string(),
            }
        }
    };

    let mut missing = BTreeSet::new();
    let mut labels = BTreeMap::new();
    for var in descriptor.required_vars() {
        let present = env.get(&var.key).is_some_and(|value| !value.is_empty());
        if !present {
            missing.insert(var.key.clone());
            if let Some(name) = &var.name {
                labels.insert(var.key.clone(), name.clone());
            }
        }
    }

    if missing.is_empty() {
        EnvCheck::Ready
    } else {
        EnvCheck::MissingVars { missing, labels }
    }
}
