//! Manifest loader.
//!
//! Loading never mutates anything: callers decide whether a failure is
//! fatal. The orchestrator treats every load failure as "no configuration".

use std::fs;
use std::path::Path;

use jsonschema::Validator;
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::content::ProjectManifest;
use crate::error::ConfigError;

/// Manifest metadata versions this build understands.
pub const SUPPORTED_METADATA_VERSIONS: &[&str] = &["0.1"];

static SCHEMA: Lazy<Validator> = Lazy::new(|| {
    let doc: Value = serde_json::from_str(include_str!("schema.json"))
        .expect("embedded schema is valid JSON");
    jsonschema::validator_for(&doc).expect("embedded schema compiles")
});

/// Loads and validates `lumen.toml`.
pub struct ManifestLoader;

impl ManifestLoader {
    /// Load a manifest from a TOML file.
    pub fn load(path: &Path) -> Result<ProjectManifest, ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load a manifest from a TOML string.
    pub fn load_str(content: &str) -> Result<ProjectManifest, ConfigError> {
        let doc: toml::Value = toml::from_str(content)?;
        let mut value = serde_json::to_value(doc)?;
        if let Some(obj) = value.as_object_mut() {
            // Editors pin a "$schema" key; it is not part of the model.
            obj.remove("$schema");
        }

        let errors: Vec<String> = SCHEMA
            .iter_errors(&value)
            .map(|e| format!("{}: {}", e.instance_path, e))
            .collect();
        if !errors.is_empty() {
            return Err(ConfigError::Schema(errors.join("; ")));
        }

        let manifest: ProjectManifest = serde_json::from_value(value)?;
        if !SUPPORTED_METADATA_VERSIONS.contains(&manifest.metadata.version.as_str()) {
            return Err(ConfigError::UnsupportedVersion(
                manifest.metadata.version.clone(),
            ));
        }
        Ok(manifest)
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
