//! The orchestrator.
//!
//! One [`Core`] per process invocation: constructed at start, destroyed at
//! process exit. It owns every piece of shared state the bootstrap sequence
//! touches, all accessed from a single task.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use lumen_config::{ConfigError, ManifestLoader, ProjectManifest};
use lumen_protocols::CoreError;
use lumen_python::Interpreter;

use crate::hooks::HookManager;
use crate::lifecycle::LifecyclePhase;
use crate::registry::{CommandRegistry, ComponentArgs, ComponentRegistry, HookEndpointRegistry};

/// The long-lived owner of all orchestration state.
pub struct Core {
    pub hooks: HookManager,
    pub components: ComponentRegistry,
    pub commands: CommandRegistry,
    pub endpoints: HookEndpointRegistry,
    pub manifest: Option<ProjectManifest>,
    pub interpreter: Option<Interpreter>,
    pub project_root: PathBuf,
    pub verbosity: u8,
    phase: LifecyclePhase,
    dispatched: BTreeSet<String>,
}

impl Core {
    pub fn new(project_root: PathBuf, verbosity: u8) -> Self {
        Self {
            hooks: HookManager::new(),
            components: ComponentRegistry::new(),
            commands: CommandRegistry::new(),
            endpoints: HookEndpointRegistry::new(),
            manifest: None,
            interpreter: None,
            project_root,
            verbosity,
            phase: LifecyclePhase::Start,
            dispatched: BTreeSet::new(),
        }
    }

    /// Current bootstrap phase.
    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    /// Move to the next phase; transitions are strictly ordered.
    pub fn advance(&mut self, next: LifecyclePhase) -> Result<(), CoreError> {
        self.phase = self.phase.advance_to(next)?;
        debug!("Entered phase {}", self.phase);
        Ok(())
    }

    /// Record the resolved interpreter identity.
    pub fn set_interpreter(&mut self, interpreter: Interpreter) -> Result<(), CoreError> {
        debug!(
            "Resolved interpreter: {} ({})",
            interpreter.command.join(" "),
            interpreter.manager
        );
        self.interpreter = Some(interpreter);
        self.advance(LifecyclePhase::InterpreterResolved)
    }

    /// Load the project manifest, degrading every failure to "no
    /// configuration" so configuration-independent commands still work.
    pub fn load_config(&mut self, path: &Path) -> Result<(), CoreError> {
        match ManifestLoader::load(path) {
            Ok(manifest) => {
                debug!("Loaded manifest from {}", path.display());
                self.manifest = Some(manifest);
            }
            Err(ConfigError::NotFound(_)) => {
                debug!("No manifest at {}", path.display());
            }
            Err(e) => {
                warn!("Ignoring invalid manifest {}: {}", path.display(), e);
            }
        }
        self.advance(LifecyclePhase::ConfigLoaded)
    }

    /// The manifest, or the error shown by commands that need one.
    pub fn require_manifest(&self) -> Result<&ProjectManifest, CoreError> {
        self.manifest
            .as_ref()
            .ok_or_else(|| CoreError::Config("this command requires a valid lumen.toml".into()))
    }

    pub fn require_interpreter(&self) -> Result<&Interpreter, CoreError> {
        self.interpreter
            .as_ref()
            .ok_or_else(|| CoreError::Environment("interpreter not resolved".into()))
    }

    /// Whether a component name was already dispatched earlier in this run.
    ///
    /// Handlers use this for once-only guards instead of process-wide flags.
    pub fn already_dispatched(&self, name: &str) -> bool {
        self.dispatched.contains(name)
    }

    /// Dispatch one configured endpoint to its registered handler.
    ///
    /// The endpoint splits on the first `:` into `(name, sub)`; handler
    /// errors propagate verbatim and are fatal to the sequence.
    pub fn dispatch(
        &mut self,
        endpoint: &str,
        args: BTreeMap<String, serde_json::Value>,
    ) -> Result<(), CoreError> {
        let (name, sub) = match endpoint.split_once(':') {
            Some((name, sub)) => (name.to_string(), Some(sub.to_string())),
            None => (endpoint.to_string(), None),
        };
        let handler = self
            .components
            .get(&name)
            .ok_or_else(|| CoreError::UnknownComponent(name.clone()))?;
        debug!("Dispatching component {} (sub: {:?})", name, sub);
        handler.handle(self, ComponentArgs { sub, args })?;
        self.dispatched.insert(name);
        Ok(())
    }

    /// Dispatch every component declared in the manifest, in declaration
    /// order. The first failure aborts the sequence: components are explicit
    /// user intent, not best-effort discovery.
    pub fn dispatch_components(&mut self) -> Result<(), CoreError> {
        let decls = self
            .manifest
            .as_ref()
            .map(|m| m.components.clone())
            .unwrap_or_default();
        for decl in decls {
            self.dispatch(&decl.endpoint, decl.args)?;
        }
        self.advance(LifecyclePhase::ComponentsDispatched)
    }

    /// Attach the manifest's `[[hooks]]` declarations to the hook manager.
    ///
    /// An endpoint nobody registered is a diagnostic, not an error, to
    /// tolerate partial misconfiguration.
    pub fn finalize_hooks(&mut self) -> Result<(), CoreError> {
        let decls = self
            .manifest
            .as_ref()
            .map(|m| m.hooks.clone())
            .unwrap_or_default();
        for decl in decls {
            match self.endpoints.resolve(&decl.endpoint) {
                Some(hook) => self.hooks.add_hook(&decl.target, hook, false),
                None => warn!(
                    "Hook endpoint {} is not registered by any plugin, skipping",
                    decl.endpoint
                ),
            }
        }
        self.advance(LifecyclePhase::HooksFinalized)
    }
}

#[cfg(test)]
#[path = "core_tests.rs"]
mod tests;
