//! Lumen - pluggable bootstrap orchestrator for Python bot projects.
//!
//! Main entry point: drives the fixed bootstrap sequence - retarget the
//! interpreter, load the project manifest, load plugins, dispatch the
//! configured components, finalize config-declared hooks, then hand
//! control to the selected command.

mod cli;
mod commands;
mod register;

use tracing_subscriber::EnvFilter;

use lumen_core::{Core, LifecyclePhase};
use lumen_protocols::{CoreError, Severity};
use lumen_python::{EnvironmentOverride, RetargetPlan};

#[tokio::main]
async fn main() {
    let argv: Vec<String> = std::env::args().collect();
    std::process::exit(run(argv).await);
}

/// Initialize tracing; `-v` occurrences raise the default directive.
fn init_tracing(verbose: u8) {
    let default_directive = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(argv: Vec<String>) -> i32 {
    let globals = cli::GlobalArgs::parse_lenient(&argv);
    init_tracing(globals.verbose);

    let project_root = lumen_config::resolve_project_root(globals.path.as_deref());
    let mut core = Core::new(project_root.clone(), globals.verbose);

    // Interpreter retargeting comes first: every later phase depends on
    // knowing how to invoke the target program.
    let overrides = EnvironmentOverride {
        python_path: globals.python_path.as_deref(),
        manager: globals.environment_manager.as_deref(),
    };
    let resolution = match lumen_python::resolve(&project_root, overrides) {
        Ok(resolution) => resolution,
        Err(e) => return render_error(&CoreError::Environment(e.to_string()), globals.verbose),
    };
    if let RetargetPlan::Exec(prefix) = &resolution.plan {
        // One-shot redirection: the re-invoked process continues the
        // sequence, this one only propagates its exit code.
        return match lumen_python::reexec(prefix).await {
            Ok(code) => code,
            Err(e) => render_error(&CoreError::Environment(e.to_string()), globals.verbose),
        };
    }
    if let Err(e) = core.set_interpreter(resolution.interpreter) {
        return render_error(&e, globals.verbose);
    }

    let manifest_path =
        lumen_config::resolve_manifest_path(&project_root, globals.config.as_deref());
    if let Err(e) = core.load_config(&manifest_path) {
        return render_error(&e, globals.verbose);
    }

    core.load_plugins(&register::builtin_plugins());
    if let Err(e) = core.advance(LifecyclePhase::PluginsLoaded) {
        return render_error(&e, globals.verbose);
    }

    let cli_tree = cli::build_cli(&core);
    let matches = match cli_tree.clone().try_get_matches_from(&argv) {
        Ok(matches) => matches,
        Err(e) => return handle_parse_error(e),
    };
    let Some((name, sub_matches)) = matches.subcommand() else {
        eprint!("{}", cli_tree.clone().render_help());
        return 1;
    };

    if let Err(e) = core.dispatch_components() {
        return render_error(&e, globals.verbose);
    }
    if let Err(e) = core.finalize_hooks() {
        return render_error(&e, globals.verbose);
    }
    if let Err(e) = core.advance(LifecyclePhase::CommandRunning) {
        return render_error(&e, globals.verbose);
    }

    let Some(command) = core.commands.get(name) else {
        // clap validated the name; a miss means a plugin unregistered it.
        return render_error(
            &CoreError::Argument(format!("unknown command: {name}")),
            globals.verbose,
        );
    };
    match command.handle(&mut core, sub_matches).await {
        Ok(code) => code,
        Err(e) => render_error(&e, globals.verbose),
    }
}

fn handle_parse_error(err: clap::Error) -> i32 {
    use clap::error::ErrorKind;

    let _ = err.print();
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

/// Render a handled error and return the process exit code.
fn render_error(err: &CoreError, verbose: u8) -> i32 {
    match err.severity() {
        Severity::Usage => eprintln!("{err}"),
        Severity::Fatal => {
            eprintln!("Error: {err}");
            if verbose > 0 {
                let mut source = std::error::Error::source(err);
                while let Some(cause) = source {
                    eprintln!("  Caused by: {cause}");
                    source = cause.source();
                }
            } else {
                eprintln!("Run with -v to see more detail.");
            }
        }
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_usage_error_exits_one() {
        let err = CoreError::Usage("lumen.toml already exists".to_string());
        assert_eq!(render_error(&err, 0), 1);
    }

    #[test]
    fn test_render_fatal_error_exits_one() {
        let err = CoreError::Config("bad".to_string());
        assert_eq!(render_error(&err, 0), 1);
        assert_eq!(render_error(&err, 2), 1);
    }

    #[tokio::test]
    async fn test_no_subcommand_exits_one() {
        // The sandboxed run needs a resolvable interpreter; the marker
        // keeps resolution offline and in-process.
        unsafe {
            std::env::set_var(lumen_python::RETARGET_ENV, "1");
        }
        let code = run(vec![
            "lumen".to_string(),
            "--environment-manager".to_string(),
            "pdm".to_string(),
        ])
        .await;
        assert_eq!(code, 1);
        unsafe {
            std::env::remove_var(lumen_python::RETARGET_ENV);
        }
    }
}
