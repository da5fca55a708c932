//! Plugin discovery and isolation-preserving loading.
//!
//! Two extension groups exist: CLI plugins (register commands, components,
//! or hooks) and component plugins (register component handlers). Each
//! entry resolves to a zero-argument loader that returns the init function
//! taking the orchestrator - the typed analogue of a package entry point.

use tracing::{debug, warn};

use lumen_protocols::CoreError;

use crate::core::Core;

/// Which discovery group an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginGroup {
    Cli,
    Component,
}

impl std::fmt::Display for PluginGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PluginGroup::Cli => f.write_str("cli"),
            PluginGroup::Component => f.write_str("component"),
        }
    }
}

/// A plugin's registration entry point.
pub type PluginInit = fn(&mut Core) -> Result<(), CoreError>;

/// One discoverable plugin.
pub struct PluginEntry {
    pub id: &'static str,
    pub group: PluginGroup,
    pub loader: fn() -> PluginInit,
}

impl Core {
    /// Invoke every entry's init function, collecting per-plugin results.
    ///
    /// A single plugin's failure is logged and does not block the rest:
    /// one bad extension must not break the CLI.
    pub fn load_plugins(
        &mut self,
        entries: &[PluginEntry],
    ) -> Vec<(&'static str, Result<(), CoreError>)> {
        let mut results = Vec::with_capacity(entries.len());
        for entry in entries {
            let init = (entry.loader)();
            let result = init(self);
            match &result {
                Ok(()) => debug!("Loaded plugin {} ({})", entry.id, entry.group),
                Err(e) => warn!("Failed to load plugin {} ({}): {}", entry.id, entry.group, e),
            }
            results.push((entry.id, result));
        }
        results
    }
}
