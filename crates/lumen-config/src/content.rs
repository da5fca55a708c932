//! Project manifest model.
//!
//! Mirrors the `lumen.toml` shape: `metadata`, `config`, `modules`,
//! `storage`, `components`, `hooks`. Deserialization is strict; unknown
//! keys are rejected (the schema catches them first with better paths).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Root of a parsed `lumen.toml`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectManifest {
    pub metadata: Metadata,
    #[serde(default)]
    pub config: ChannelConfig,
    #[serde(default)]
    pub modules: Vec<ModuleDecl>,
    #[serde(default)]
    pub storage: BTreeMap<String, String>,
    #[serde(default)]
    pub components: Vec<ComponentDecl>,
    #[serde(default)]
    pub hooks: Vec<HookDecl>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Metadata {
    #[serde(default = "default_metadata_version")]
    pub version: String,
}

fn default_metadata_version() -> String {
    "0.1".to_string()
}

/// Channel configuration handed through to the launched program.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelConfig {
    #[serde(default)]
    pub endpoints: BTreeMap<String, String>,
    #[serde(default)]
    pub format: BTreeMap<String, Value>,
}

/// A module the launched program should import.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleDecl {
    pub endpoint: String,
    #[serde(default, rename = "type")]
    pub kind: ModuleKind,
    /// Submodule names skipped when expanding a `multi` module.
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    /// The endpoint itself is the module.
    #[default]
    Single,
    /// The endpoint is a package; its submodules are enumerated.
    Multi,
}

/// A component declaration: `endpoint = "name[:sub]"` plus handler args.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentDecl {
    pub endpoint: String,
    #[serde(default)]
    pub args: BTreeMap<String, Value>,
}

/// A hook declaration attaching a registered endpoint to a target stage.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HookDecl {
    pub endpoint: String,
    pub target: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_kind_defaults_to_single() {
        let decl: ModuleDecl =
            serde_json::from_value(serde_json::json!({"endpoint": "bot.plugins"})).unwrap();
        assert_eq!(decl.kind, ModuleKind::Single);
        assert!(decl.exclude.is_empty());
    }

    #[test]
    fn test_module_kind_multi() {
        let decl: ModuleDecl = serde_json::from_value(serde_json::json!({
            "endpoint": "bot.plugins",
            "type": "multi",
            "exclude": ["wip"],
        }))
        .unwrap();
        assert_eq!(decl.kind, ModuleKind::Multi);
        assert_eq!(decl.exclude, vec!["wip"]);
    }

    #[test]
    fn test_metadata_version_default() {
        let meta: Metadata = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(meta.version, "0.1");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: Result<ComponentDecl, _> = serde_json::from_value(serde_json::json!({
            "endpoint": "launart",
            "bogus": true,
        }));
        assert!(result.is_err());
    }
}
