//! Core error taxonomy.
//!
//! Every error carries a [`Severity`] tag so callers can branch on how a
//! failure should be surfaced instead of matching on variant position.

use thiserror::Error;

/// How an error is rendered to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Expected user-facing condition; message only, never a source chain.
    Usage,
    /// Aborts the sequence; source chain shown at raised verbosity.
    Fatal,
}

/// Errors produced by the orchestration core and its plugins.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Malformed CLI invocation.
    #[error("invalid invocation: {0}")]
    Argument(String),

    /// A configured endpoint names a component nobody registered.
    #[error("unknown component: {0}")]
    UnknownComponent(String),

    /// Invalid component, hook, or run-target configuration.
    #[error("{0}")]
    Config(String),

    /// Expected condition the user can act on directly.
    #[error("{0}")]
    Usage(String),

    /// A lifecycle hook failed while executing.
    #[error("hook {id} failed: {message}")]
    Hook { id: String, message: String },

    /// Interpreter/environment resolution or launch failure.
    #[error("python environment error: {0}")]
    Environment(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Custom(String),
}

impl CoreError {
    /// Rendering severity for this error.
    pub fn severity(&self) -> Severity {
        match self {
            CoreError::Usage(_) => Severity::Usage,
            _ => Severity::Fatal,
        }
    }

    /// Shorthand for a hook failure.
    pub fn hook(id: impl Into<String>, message: impl Into<String>) -> Self {
        CoreError::Hook {
            id: id.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_component_display() {
        let err = CoreError::UnknownComponent("launcher".to_string());
        assert!(err.to_string().contains("unknown component"));
        assert!(err.to_string().contains("launcher"));
    }

    #[test]
    fn test_config_display_is_bare_message() {
        let err = CoreError::Config("Running target not configured!".to_string());
        assert_eq!(err.to_string(), "Running target not configured!");
    }

    #[test]
    fn test_usage_severity() {
        let err = CoreError::Usage("lumen.toml already exists".to_string());
        assert_eq!(err.severity(), Severity::Usage);
    }

    #[test]
    fn test_fatal_severity_for_everything_else() {
        let errors = vec![
            CoreError::Argument("bad flag".to_string()),
            CoreError::UnknownComponent("x".to_string()),
            CoreError::Config("bad".to_string()),
            CoreError::hook("mod:fn", "boom"),
            CoreError::Environment("no python".to_string()),
        ];
        for err in errors {
            assert_eq!(err.severity(), Severity::Fatal);
        }
    }

    #[test]
    fn test_hook_display() {
        let err = CoreError::hook("launart:inject", "missing manager");
        let display = err.to_string();
        assert!(display.contains("launart:inject"));
        assert!(display.contains("missing manager"));
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = CoreError::from(io_err);
        assert!(err.to_string().contains("gone"));
        assert_eq!(err.severity(), Severity::Fatal);
    }
}
