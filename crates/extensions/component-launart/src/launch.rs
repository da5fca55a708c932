//! The launcher: the run target's single core entry.

use std::io::Write;

use async_trait::async_trait;

use lumen_core::{Core, Hook, HookFlow};
use lumen_protocols::{CoreError, RuntimeContext};
use lumen_python::{spawn_and_forward, LaunchCommand};

const RUNNER_SOURCE: &str = include_str!("runner.py");

/// Spawns the bot program under the resolved interpreter, forwards
/// termination signals for the duration of the wait, and exits the
/// orchestrator with the child's exit code.
pub(crate) struct LaunchHook;

#[async_trait]
impl Hook for LaunchHook {
    fn id(&self) -> &str {
        "component_launart:launch"
    }

    async fn call(
        &self,
        core: &Core,
        ctx: &mut RuntimeContext,
    ) -> Result<HookFlow, CoreError> {
        let interpreter = core.require_interpreter()?;
        let runner = materialize_runner()?;
        let payload = ctx
            .payload()
            .map_err(|e| CoreError::Custom(format!("failed to serialize launch plan: {e}")))?;

        let (program, leading) = interpreter.split();
        let mut command = LaunchCommand::new(program)
            .args(leading.iter().cloned())
            .arg(runner.display().to_string())
            .arg(payload)
            .args(ctx.launch.args.iter().cloned());
        command.pythonpath = interpreter.search_paths.clone();

        let code = spawn_and_forward(command)
            .await
            .map_err(|e| CoreError::Environment(e.to_string()))?;
        // `runner` lives until here; the shim file stays on disk for the
        // whole child lifetime.
        Ok(HookFlow::Exit(code))
    }
}

/// Write the embedded runner shim to a temporary file.
pub(crate) fn materialize_runner() -> Result<tempfile::TempPath, CoreError> {
    let mut file = tempfile::Builder::new()
        .prefix("lumen-runner-")
        .suffix(".py")
        .tempfile()?;
    file.write_all(RUNNER_SOURCE.as_bytes())?;
    Ok(file.into_temp_path())
}
