//! The init command: write a starter `lumen.toml`.

use std::sync::Arc;

use async_trait::async_trait;
use clap::{Arg, ArgAction, ArgMatches};
use tracing::warn;

use lumen_core::{CliCommand, Core, PluginInit};
use lumen_protocols::CoreError;

/// Registration entry point.
pub(crate) fn plugin(core: &mut Core) -> Result<(), CoreError> {
    core.commands.register(Arc::new(InitCommand));
    Ok(())
}

pub(crate) fn loader() -> PluginInit {
    plugin
}

const TEMPLATE: &str = r#"[metadata]
version = "0.1"

[config.endpoints]

[config.format]

# [[modules]]
# endpoint = "bot.plugins"
# type = "multi"

[[components]]
endpoint = "graia-ariadne"
"#;

pub(crate) struct InitCommand;

#[async_trait]
impl CliCommand for InitCommand {
    fn name(&self) -> &str {
        "init"
    }

    fn clap(&self) -> clap::Command {
        clap::Command::new("init")
            .about("Initialize a new lumen.toml")
            .arg(
                Arg::new("non-interactive")
                    .long("non-interactive")
                    .action(ArgAction::SetTrue)
                    .help("Run in non-interactive mode"),
            )
    }

    async fn handle(&self, core: &mut Core, matches: &ArgMatches) -> Result<i32, CoreError> {
        if matches.get_flag("non-interactive") {
            warn!("Running in non-interactive mode");
        }
        let path = core.project_root.join("lumen.toml");
        if path.exists() {
            return Err(CoreError::Usage("lumen.toml already exists".into()));
        }
        std::fs::write(&path, TEMPLATE)?;
        println!("Created {}", path.display());
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_matches(args: &[&str]) -> ArgMatches {
        InitCommand
            .clap()
            .get_matches_from(std::iter::once("init").chain(args.iter().copied()))
    }

    #[tokio::test]
    async fn test_init_writes_loadable_template() {
        let dir = tempfile::tempdir().unwrap();
        let mut core = Core::new(dir.path().to_path_buf(), 0);

        let code = InitCommand
            .handle(&mut core, &init_matches(&[]))
            .await
            .unwrap();
        assert_eq!(code, 0);

        // The template must pass our own loader.
        let manifest =
            lumen_config::ManifestLoader::load(&dir.path().join("lumen.toml")).unwrap();
        assert_eq!(manifest.components[0].endpoint, "graia-ariadne");
    }

    #[tokio::test]
    async fn test_init_existing_file_is_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("lumen.toml"), "[metadata]\n").unwrap();
        let mut core = Core::new(dir.path().to_path_buf(), 0);

        let result = InitCommand.handle(&mut core, &init_matches(&[])).await;
        assert!(matches!(result, Err(CoreError::Usage(m)) if m.contains("already exists")));
    }

    #[tokio::test]
    async fn test_init_non_interactive_flag_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let mut core = Core::new(dir.path().to_path_buf(), 0);
        let code = InitCommand
            .handle(&mut core, &init_matches(&["--non-interactive"]))
            .await
            .unwrap();
        assert_eq!(code, 0);
    }
}
