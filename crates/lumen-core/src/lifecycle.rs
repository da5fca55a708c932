//! Bootstrap lifecycle phases.
//!
//! One strictly ordered sequence per process invocation; no loops, no
//! re-entrancy. Each phase is entered exactly once, in order.

use lumen_protocols::CoreError;

/// Phases of one orchestrator run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LifecyclePhase {
    Start = 0,
    InterpreterResolved = 1,
    ConfigLoaded = 2,
    PluginsLoaded = 3,
    ComponentsDispatched = 4,
    HooksFinalized = 5,
    CommandRunning = 6,
}

impl LifecyclePhase {
    /// The phase that must follow this one.
    pub fn next(&self) -> Option<LifecyclePhase> {
        match self {
            LifecyclePhase::Start => Some(LifecyclePhase::InterpreterResolved),
            LifecyclePhase::InterpreterResolved => Some(LifecyclePhase::ConfigLoaded),
            LifecyclePhase::ConfigLoaded => Some(LifecyclePhase::PluginsLoaded),
            LifecyclePhase::PluginsLoaded => Some(LifecyclePhase::ComponentsDispatched),
            LifecyclePhase::ComponentsDispatched => Some(LifecyclePhase::HooksFinalized),
            LifecyclePhase::HooksFinalized => Some(LifecyclePhase::CommandRunning),
            LifecyclePhase::CommandRunning => None,
        }
    }

    /// Validate a transition to `next`.
    pub(crate) fn advance_to(self, next: LifecyclePhase) -> Result<LifecyclePhase, CoreError> {
        if self.next() == Some(next) {
            Ok(next)
        } else {
            Err(CoreError::Custom(format!(
                "invalid lifecycle transition: {self:?} -> {next:?}"
            )))
        }
    }
}

impl std::fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LifecyclePhase::Start => "START",
            LifecyclePhase::InterpreterResolved => "INTERPRETER_RESOLVED",
            LifecyclePhase::ConfigLoaded => "CONFIG_LOADED",
            LifecyclePhase::PluginsLoaded => "PLUGINS_LOADED",
            LifecyclePhase::ComponentsDispatched => "COMPONENTS_DISPATCHED",
            LifecyclePhase::HooksFinalized => "HOOKS_FINALIZED",
            LifecyclePhase::CommandRunning => "COMMAND_RUNNING",
        };
        f.write_str(name)
    }
}
