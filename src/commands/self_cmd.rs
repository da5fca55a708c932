//! The self command: introspect the orchestrator's own state.

use std::sync::Arc;

use async_trait::async_trait;
use clap::ArgMatches;

use lumen_core::{CliCommand, Core, PluginInit};
use lumen_protocols::CoreError;

/// Registration entry point.
pub(crate) fn plugin(core: &mut Core) -> Result<(), CoreError> {
    core.commands.register(Arc::new(SelfCommand));
    Ok(())
}

pub(crate) fn loader() -> PluginInit {
    plugin
}

pub(crate) struct SelfCommand;

impl SelfCommand {
    fn report(core: &Core) -> String {
        let interpreter = core
            .interpreter
            .as_ref()
            .map(|i| format!("{} ({})", i.command.join(" "), i.manager))
            .unwrap_or_else(|| "unresolved".to_string());
        let manifest = if core.manifest.is_some() {
            "loaded"
        } else {
            "absent"
        };
        let commands: Vec<String> = core.commands.iter().map(|c| c.name().to_string()).collect();

        format!(
            "lumen {}\n\
             project root: {}\n\
             manifest: {}\n\
             interpreter: {}\n\
             commands: {}\n\
             components: {}\n",
            env!("CARGO_PKG_VERSION"),
            core.project_root.display(),
            manifest,
            interpreter,
            commands.join(", "),
            core.components.list_names().join(", "),
        )
    }
}

#[async_trait]
impl CliCommand for SelfCommand {
    fn name(&self) -> &str {
        "self"
    }

    fn clap(&self) -> clap::Command {
        clap::Command::new("self").about("Act with lumen itself")
    }

    async fn handle(&self, core: &mut Core, _matches: &ArgMatches) -> Result<i32, CoreError> {
        print!("{}", Self::report(core));
        Ok(0)
    }
}
