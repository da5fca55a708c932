//! Interpreter retargeting.
//!
//! Two strategies, chosen deterministically from the resolved manager:
//! path splicing when only library resolution differs (venv or ambient
//! interpreter), and a one-shot re-exec under `<manager> run` when the
//! manager must own the process environment. `LUMEN_RETARGETED` marks a
//! re-invoked process so the mechanism never loops.

use std::path::PathBuf;

use tracing::info;

use crate::error::PythonError;

/// Marker set on the re-invoked command line; its presence means the
/// current process already runs under the target environment.
pub const RETARGET_ENV: &str = "LUMEN_RETARGETED";

/// What to do about the resolved interpreter.
#[derive(Debug, Clone, PartialEq)]
pub enum RetargetPlan {
    /// Continue in-process; splice these library paths into the child.
    Splice(Vec<PathBuf>),
    /// Re-invoke the original command line under this argv prefix.
    Exec(Vec<String>),
    /// Already under the target environment; nothing to do.
    None,
}

impl RetargetPlan {
    pub fn is_reexec(&self) -> bool {
        matches!(self, RetargetPlan::Exec(_))
    }
}

/// Re-invoke the entire original command line under `prefix` and return the
/// child's exit code. The caller exits with it.
pub async fn reexec(prefix: &[String]) -> Result<i32, PythonError> {
    let exe = std::env::current_exe()?;
    let args: Vec<String> = std::env::args().skip(1).collect();

    let (program, leading) = prefix
        .split_first()
        .ok_or_else(|| PythonError::ProbeOutput("empty retarget prefix".to_string()))?;
    info!("Retargeting under `{}`", prefix.join(" "));

    let status = tokio::process::Command::new(program)
        .args(leading)
        .arg(&exe)
        .args(&args)
        .env(RETARGET_ENV, "1")
        .status()
        .await
        .map_err(|source| PythonError::Launch {
            program: program.clone(),
            source,
        })?;
    Ok(status.code().unwrap_or(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splice_plan_is_not_reexec() {
        let plan = RetargetPlan::Splice(vec![PathBuf::from("/srv/.venv/lib")]);
        assert!(!plan.is_reexec());
    }

    #[test]
    fn test_exec_plan_is_reexec() {
        let plan = RetargetPlan::Exec(vec!["pdm".to_string(), "run".to_string()]);
        assert!(plan.is_reexec());
    }

    #[test]
    fn test_none_plan() {
        assert!(!RetargetPlan::None.is_reexec());
    }
}
