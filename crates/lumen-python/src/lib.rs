//! # Lumen Python
//!
//! Everything that touches the Python side of a project: detecting which
//! interpreter/environment manager should run the bot, retargeting the
//! orchestrator when a manager must own the process, probing the target
//! interpreter, and launching the bot program with signal forwarding.
//!
//! ## Components
//!
//! - [`Interpreter`] / [`EnvironmentManager`] - resolved interpreter identity
//! - [`resolve`] - flag > env var > auto-detection resolution
//! - [`RetargetPlan`] - path-splice vs re-exec decision
//! - [`LaunchCommand`] / [`spawn_and_forward`] - child launch + signal relay

mod environment;
mod error;
mod probe;
mod process;
mod retarget;

pub use environment::{
    resolve, EnvironmentManager, EnvironmentOverride, Interpreter, Resolution, PYTHON_PATH_ENV,
};
pub use error::PythonError;
pub use probe::{discover_submodules, query_sys_path, test_executable, SubmoduleProbe};
pub use process::{spawn_and_forward, LaunchCommand};
pub use retarget::{reexec, RetargetPlan, RETARGET_ENV};
