//! Python environment errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PythonError {
    #[error("failed to invoke `{command}`: {source}")]
    ProbeSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("probe `{command}` exited with {status}: {stderr}")]
    ProbeFailed {
        command: String,
        status: i32,
        stderr: String,
    },

    #[error(
        "no usable Python environment detected under {0}; \
         install the project with pdm or poetry, or pass --python-path"
    )]
    NoEnvironment(String),

    #[error("unknown environment manager: {0} (expected pdm or poetry)")]
    UnknownManager(String),

    #[error("environment manager `{0}` is not available on PATH")]
    ManagerUnavailable(String),

    #[error("failed to launch `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed probe output: {0}")]
    ProbeOutput(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
