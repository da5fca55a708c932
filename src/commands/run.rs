//! The run command: validate the run target, execute its stages, launch.

use std::sync::Arc;

use async_trait::async_trait;
use clap::{Arg, ArgMatches};
use tracing::{debug, warn};

use lumen_config::{ModuleKind, ProjectManifest};
use lumen_core::{CliCommand, Core, HookFlow, HookFn, PluginInit};
use lumen_protocols::{CoreError, RuntimeContext};
use lumen_python::discover_submodules;

/// Registration entry point.
pub(crate) fn plugin(core: &mut Core) -> Result<(), CoreError> {
    core.commands.register(Arc::new(RunCommand));
    Ok(())
}

pub(crate) fn loader() -> PluginInit {
    plugin
}

pub(crate) struct RunCommand;

#[async_trait]
impl CliCommand for RunCommand {
    fn name(&self) -> &str {
        "run"
    }

    fn clap(&self) -> clap::Command {
        clap::Command::new("run").about("Run your bot").arg(
            Arg::new("args")
                .value_name("ARGS")
                .num_args(0..)
                .last(true)
                .help("Arguments passed through to the launched program"),
        )
    }

    async fn handle(&self, core: &mut Core, matches: &ArgMatches) -> Result<i32, CoreError> {
        let manifest = core.require_manifest()?.clone();
        let runtime_args: Vec<String> = matches
            .get_many::<String>("args")
            .map(|values| values.cloned().collect())
            .unwrap_or_default();

        let modules = collect_modules(core, &manifest)?;

        let target = core
            .hooks
            .get("run")
            .ok_or_else(|| CoreError::Config("Running target not configured!".into()))?;
        if target.core.len() != 1 {
            return Err(CoreError::Config(format!(
                "Found {} running target(s) instead of 1!",
                target.core.len()
            )));
        }
        let entry = target.core[0].clone();
        let pre: Vec<HookFn> = target.pre.to_vec();
        // run is terminal for this launcher; nothing ever observes post.
        core.hooks.warn_unused("run", false, true);

        let mut ctx = RuntimeContext::new();
        ctx.launch.config_endpoints = manifest.config.endpoints.clone();
        ctx.launch.config_format = manifest.config.format.clone();
        ctx.launch.modules = modules;
        ctx.launch.args = runtime_args;

        for hook in &pre {
            match hook.call(core, &mut ctx).await? {
                HookFlow::Continue => {}
                HookFlow::Exit(code) => return Ok(code),
            }
        }

        let config_hooks: Vec<HookFn> = core
            .hooks
            .get("run_config")
            .map(|t| t.core.to_vec())
            .unwrap_or_default();
        if !config_hooks.is_empty() {
            for hook in &config_hooks {
                match hook.call(core, &mut ctx).await? {
                    HookFlow::Continue => {}
                    HookFlow::Exit(code) => return Ok(code),
                }
            }
            core.hooks.warn_unused("run_config", true, true);
        }

        match entry.call(core, &mut ctx).await? {
            HookFlow::Exit(code) => Ok(code),
            HookFlow::Continue => Ok(0),
        }
    }
}

/// Expand the manifest's module declarations into importable module names.
fn collect_modules(core: &Core, manifest: &ProjectManifest) -> Result<Vec<String>, CoreError> {
    let mut modules = Vec::new();
    for decl in &manifest.modules {
        match decl.kind {
            ModuleKind::Single => {
                debug!("Adding module {}", decl.endpoint);
                modules.push(decl.endpoint.clone());
            }
            ModuleKind::Multi => {
                let interpreter = core.require_interpreter()?;
                let probe = discover_submodules(&interpreter.command, &decl.endpoint)
                    .map_err(|e| CoreError::Environment(e.to_string()))?;
                for name in probe.invalid {
                    warn!("{} is not an importable module, skipping", name);
                }
                for name in probe.valid {
                    let short = name.rsplit('.').next().unwrap_or(name.as_str());
                    if decl.exclude.iter().any(|excluded| excluded == short) {
                        continue;
                    }
                    debug!("Adding module {}", name);
                    modules.push(name);
                }
            }
        }
    }
    Ok(modules)
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
