//! Component, command, and hook-endpoint registries.
//!
//! All three are populated during plugin loading and read-only afterwards;
//! registration is last-wins because plugin discovery order is unspecified
//! across installations and extensions must not assume ordering relative to
//! each other.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use lumen_protocols::CoreError;

use crate::core::Core;
use crate::hooks::HookFn;

/// Arguments handed to a component handler.
#[derive(Debug, Clone, Default)]
pub struct ComponentArgs {
    /// Sub-endpoint after the first `:` of the configured endpoint.
    /// Absent is `None`, never an empty string, so handlers can tell
    /// "no sub-endpoint" from "empty sub-endpoint".
    pub sub: Option<String>,
    pub args: BTreeMap<String, serde_json::Value>,
}

/// Handler invoked when a configured component is dispatched.
pub trait ComponentHandler: Send + Sync {
    fn handle(&self, core: &mut Core, args: ComponentArgs) -> Result<(), CoreError>;
}

/// Registry mapping component names to handlers.
#[derive(Default)]
pub struct ComponentRegistry {
    handlers: HashMap<String, Arc<dyn ComponentHandler>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent insert; the last registration for a name wins.
    pub fn register(&mut self, name: impl Into<String>, handler: Arc<dyn ComponentHandler>) {
        let name = name.into();
        if self.handlers.insert(name.clone(), handler).is_some() {
            debug!("Component {} re-registered, last wins", name);
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ComponentHandler>> {
        self.handlers.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn list_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// A CLI subcommand registered by a plugin.
#[async_trait]
pub trait CliCommand: Send + Sync {
    /// The subcommand's name.
    fn name(&self) -> &str;

    /// The subcommand's clap definition, merged into the CLI tree.
    fn clap(&self) -> clap::Command;

    /// Execute the command; returns the process exit code.
    async fn handle(&self, core: &mut Core, matches: &clap::ArgMatches)
        -> Result<i32, CoreError>;
}

/// Registry mapping subcommand names to implementations.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Arc<dyn CliCommand>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent insert; the last registration for a name wins.
    pub fn register(&mut self, command: Arc<dyn CliCommand>) {
        let name = command.name().to_string();
        if self.commands.insert(name.clone(), command).is_some() {
            debug!("Command {} re-registered, last wins", name);
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn CliCommand>> {
        self.commands.get(name).cloned()
    }

    /// All registered commands, sorted by name for a stable help listing.
    pub fn iter(&self) -> impl Iterator<Item = Arc<dyn CliCommand>> {
        let mut commands: Vec<_> = self.commands.values().cloned().collect();
        commands.sort_by(|a, b| a.name().cmp(b.name()));
        commands.into_iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Registry mapping hook endpoint strings to registered hooks.
///
/// This is the typed replacement for resolving `"module:attribute"` strings
/// by reflection: plugins register the hooks they export up front, and the
/// hook-finalization phase looks configured endpoints up here.
#[derive(Default)]
pub struct HookEndpointRegistry {
    endpoints: HashMap<String, HookFn>,
}

impl HookEndpointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, endpoint: impl Into<String>, hook: HookFn) {
        let endpoint = endpoint.into();
        if self.endpoints.insert(endpoint.clone(), hook).is_some() {
            debug!("Hook endpoint {} re-registered, last wins", endpoint);
        }
    }

    pub fn resolve(&self, endpoint: &str) -> Option<HookFn> {
        self.endpoints.get(endpoint).cloned()
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
