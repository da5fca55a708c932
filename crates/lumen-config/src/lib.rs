//! # Lumen Config
//!
//! Project manifest handling for the Lumen orchestrator.
//!
//! The manifest is a `lumen.toml` file at the project root. Loading is
//! three-staged: TOML parse, JSON-Schema validation against the embedded
//! schema, then strict deserialization into [`ProjectManifest`].

mod content;
mod error;
mod loader;
mod root;

pub use content::{
    ChannelConfig, ComponentDecl, HookDecl, Metadata, ModuleDecl, ModuleKind, ProjectManifest,
};
pub use error::ConfigError;
pub use loader::{ManifestLoader, SUPPORTED_METADATA_VERSIONS};
pub use root::{resolve_manifest_path, resolve_project_root, CONFIG_FILE_ENV, PROJECT_ROOT_ENV};
