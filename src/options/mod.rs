//! Centralized transition options with TOML preset support.
//!
//! All tweakable settings (completion policy constants, animation timing,
//! pull trigger thresholds, presentation mode) are consolidated here.
//! Options serialize to/from TOML so a tuned feel can be stored as a preset.

mod animation;
mod interaction;
mod pull;

use std::path::Path;

pub use animation::AnimationOptions;
pub use interaction::InteractionOptions;
pub use pull::PullOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::TransitionMode;
use crate::error::TransitionError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[interaction]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct TransitionOptions {
    /// Visual style, fixed when the coordinator is built.
    pub mode: TransitionMode,
    /// Completion policy and hand-off constants.
    pub interaction: InteractionOptions,
    /// Animation timing.
    pub animation: AnimationOptions,
    /// Pull trigger thresholds.
    #[schemars(skip)]
    pub pull: PullOptions,
}

impl TransitionOptions {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(TransitionOptions)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, TransitionError> {
        toml::from_str(content)
            .map_err(|e| TransitionError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, TransitionError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), TransitionError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TransitionError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(TransitionError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
