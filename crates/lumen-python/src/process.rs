//! Child process launch with termination-signal forwarding.
//!
//! The orchestrator blocks on the child while relaying SIGINT/SIGTERM to
//! it, so the parent never terminates before the child has had a chance to
//! react. There is no other cancellation: once launched, the child is only
//! ever interrupted through this relay.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::PythonError;

/// A fully assembled child command line.
#[derive(Debug, Clone, Default)]
pub struct LaunchCommand {
    pub program: String,
    pub args: Vec<String>,
    /// Library search paths prepended to the child's `PYTHONPATH`.
    pub pythonpath: Vec<PathBuf>,
}

impl LaunchCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            pythonpath: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I: IntoIterator<Item = S>, S: Into<String>>(mut self, args: I) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The `PYTHONPATH` value for the child, preserving any inherited one.
    pub(crate) fn pythonpath_value(&self, inherited: Option<&str>) -> Option<String> {
        if self.pythonpath.is_empty() {
            return None;
        }
        let mut parts: Vec<String> = self
            .pythonpath
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        if let Some(existing) = inherited {
            if !existing.is_empty() {
                parts.push(existing.to_string());
            }
        }
        Some(parts.join(PATH_SEP))
    }
}

#[cfg(unix)]
const PATH_SEP: &str = ":";
#[cfg(not(unix))]
const PATH_SEP: &str = ";";

/// Spawn the child and wait for it, forwarding SIGINT/SIGTERM.
///
/// Returns the child's exit code; a signal death with no code maps to 1.
pub async fn spawn_and_forward(cmd: LaunchCommand) -> Result<i32, PythonError> {
    let mut command = tokio::process::Command::new(&cmd.program);
    command.args(&cmd.args);
    if let Some(value) = cmd.pythonpath_value(std::env::var("PYTHONPATH").ok().as_deref()) {
        command.env("PYTHONPATH", value);
    }

    debug!("Launching: {} {}", cmd.program, cmd.args.join(" "));
    let mut child = command.spawn().map_err(|source| PythonError::Launch {
        program: cmd.program.clone(),
        source,
    })?;
    let pid = child.id();

    wait_forwarding(&mut child, pid).await
}

#[cfg(unix)]
async fn wait_forwarding(
    child: &mut tokio::process::Child,
    pid: Option<u32>,
) -> Result<i32, PythonError> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    loop {
        tokio::select! {
            status = child.wait() => {
                let status = status?;
                return Ok(status.code().unwrap_or(1));
            }
            _ = sigint.recv() => forward_signal(pid, nix::sys::signal::Signal::SIGINT),
            _ = sigterm.recv() => forward_signal(pid, nix::sys::signal::Signal::SIGTERM),
        }
    }
}

/// Relay a received signal to the child.
#[cfg(unix)]
pub(crate) fn forward_signal(pid: Option<u32>, sig: nix::sys::signal::Signal) {
    use nix::sys::signal::kill;
    use nix::unistd::Pid;

    let Some(pid) = pid else { return };
    debug!("Forwarding {} to PID {}", sig, pid);
    if let Err(e) = kill(Pid::from_raw(pid as i32), sig) {
        warn!("Failed to forward {} to PID {}: {}", sig, pid, e);
    }
}

#[cfg(not(unix))]
async fn wait_forwarding(
    child: &mut tokio::process::Child,
    _pid: Option<u32>,
) -> Result<i32, PythonError> {
    // Only Ctrl+C is observable here; interrupt delivery is approximated
    // by terminating the child.
    loop {
        tokio::select! {
            status = child.wait() => {
                let status = status?;
                return Ok(status.code().unwrap_or(1));
            }
            _ = tokio::signal::ctrl_c() => {
                let _ = child.start_kill();
            }
        }
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
