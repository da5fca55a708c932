//! CLI definitions for Lumen.
//!
//! Global flags are parsed twice: a lenient scan before interpreter
//! retargeting (the full subcommand tree does not exist yet - plugins have
//! not run), then the authoritative clap parse once every plugin has
//! registered its subcommands.

use std::path::PathBuf;

use clap::{Arg, ArgAction};

use lumen_core::Core;

/// Global flags, available before and after the subcommand.
#[derive(Debug, Clone, Default)]
pub(crate) struct GlobalArgs {
    pub config: Option<PathBuf>,
    pub verbose: u8,
    pub path: Option<PathBuf>,
    pub python_path: Option<String>,
    pub environment_manager: Option<String>,
}

impl GlobalArgs {
    /// Scan argv for global flags, ignoring everything else.
    ///
    /// Unknown tokens are skipped and `--` ends the scan, so passthrough
    /// arguments for the launched program are never misread.
    pub fn parse_lenient(argv: &[String]) -> Self {
        let mut args = GlobalArgs::default();
        let mut iter = argv.iter().skip(1);
        while let Some(token) = iter.next() {
            match token.as_str() {
                "--" => break,
                "-c" | "--config" => args.config = iter.next().map(PathBuf::from),
                "-p" | "--path" => args.path = iter.next().map(PathBuf::from),
                "--python-path" | "--py" => args.python_path = iter.next().cloned(),
                "--environment-manager" => args.environment_manager = iter.next().cloned(),
                "--verbose" => args.verbose += 1,
                token => {
                    if let Some((flag, value)) = token.split_once('=') {
                        match flag {
                            "--config" => args.config = Some(PathBuf::from(value)),
                            "--path" => args.path = Some(PathBuf::from(value)),
                            "--python-path" | "--py" => {
                                args.python_path = Some(value.to_string());
                            }
                            "--environment-manager" => {
                                args.environment_manager = Some(value.to_string());
                            }
                            _ => {}
                        }
                    } else if token.len() > 1
                        && token.starts_with('-')
                        && !token.starts_with("--")
                        && token[1..].chars().all(|c| c == 'v')
                    {
                        args.verbose += (token.len() - 1) as u8;
                    }
                }
            }
        }
        args
    }
}

/// Build the full CLI tree from the commands plugins registered.
pub(crate) fn build_cli(core: &Core) -> clap::Command {
    let mut cli = clap::Command::new("lumen")
        .about("Bootstrap and launch bot projects")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_help_heading("Commands")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .global(true)
                .help("Specify another config file path (env var: LUMEN_CONFIG_FILE)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("-v for detailed output and -vv for more detail"),
        )
        .arg(
            Arg::new("path")
                .short('p')
                .long("path")
                .value_name("DIR")
                .global(true)
                .help("Specify project directory (env vars: LUMEN_PROJECT_ROOT / PROJECT_ROOT)"),
        )
        .arg(
            Arg::new("python-path")
                .long("python-path")
                .alias("py")
                .value_name("PATH")
                .global(true)
                .help("Specify Python path"),
        )
        .arg(
            Arg::new("environment-manager")
                .long("environment-manager")
                .value_name("NAME")
                .global(true)
                .help("Specify environment manager (pdm, poetry)"),
        );
    for command in core.commands.iter() {
        cli = cli.subcommand(command.clap());
    }
    cli
}
