//! Interpreter probes.
//!
//! Every probe runs the target interpreter (or manager) as a short-lived
//! subprocess and parses its stdout. Parsing is split out so it can be
//! tested without a Python installation.

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::error::PythonError;

/// Check whether `exe -V` runs and exits zero.
pub fn test_executable(exe: &str) -> bool {
    Command::new(exe)
        .arg("-V")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Run an interpreter command with extra args and capture stdout.
fn run_probe(command: &[String], extra: &[&str]) -> Result<String, PythonError> {
    let cmdline = format!("{} {}", command.join(" "), extra.join(" "));
    debug!("Probing: {}", cmdline);

    let (program, args) = command
        .split_first()
        .ok_or_else(|| PythonError::ProbeOutput("empty interpreter command".to_string()))?;
    let output = Command::new(program)
        .args(args)
        .args(extra)
        .output()
        .map_err(|source| PythonError::ProbeSpawn {
            command: cmdline.clone(),
            source,
        })?;
    if !output.status.success() {
        return Err(PythonError::ProbeFailed {
            command: cmdline,
            status: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Query `sys.prefix` and `sys.base_prefix` of the target interpreter.
pub fn query_prefixes(command: &[String]) -> Result<(String, String), PythonError> {
    let out = run_probe(
        command,
        &["-c", "import sys; print(sys.prefix); print(sys.base_prefix)"],
    )?;
    parse_prefixes(&out)
}

pub(crate) fn parse_prefixes(output: &str) -> Result<(String, String), PythonError> {
    let mut lines = output.lines().map(str::trim).filter(|l| !l.is_empty());
    match (lines.next(), lines.next()) {
        (Some(prefix), Some(base)) => Ok((prefix.to_string(), base.to_string())),
        _ => Err(PythonError::ProbeOutput(format!(
            "expected two prefix lines, got: {output:?}"
        ))),
    }
}

/// Query the target interpreter's `sys.path` entries.
pub fn query_sys_path(command: &[String]) -> Result<Vec<PathBuf>, PythonError> {
    let out = run_probe(
        command,
        &["-c", "import sys; [print(p) for p in sys.path]"],
    )?;
    Ok(parse_sys_path(&out))
}

pub(crate) fn parse_sys_path(output: &str) -> Vec<PathBuf> {
    output
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Submodules of a package, split by import validity.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmoduleProbe {
    pub valid: Vec<String>,
    pub invalid: Vec<String>,
}

const SUBMODULE_SCRIPT: &str = r#"
import importlib, importlib.util, json, pkgutil, sys
pkg = sys.argv[1]
try:
    paths = list(importlib.import_module(pkg).__path__)
except Exception:
    paths = [pkg]
valid, invalid = [], []
for info in pkgutil.iter_modules(paths):
    name = pkg + "." + info.name
    try:
        spec = importlib.util.find_spec(name)
    except Exception:
        spec = None
    (valid if spec else invalid).append(name)
print(json.dumps({"valid": valid, "invalid": invalid}))
"#;

/// Enumerate importable submodules of `package` using the target interpreter.
pub fn discover_submodules(command: &[String], package: &str) -> Result<SubmoduleProbe, PythonError> {
    let out = run_probe(command, &["-c", SUBMODULE_SCRIPT, package])?;
    parse_submodules(&out)
}

pub(crate) fn parse_submodules(output: &str) -> Result<SubmoduleProbe, PythonError> {
    let value: serde_json::Value = serde_json::from_str(output.trim())?;
    let take = |key: &str| -> Vec<String> {
        value[key]
            .as_array()
            .map(|a| {
                a.iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    };
    Ok(SubmoduleProbe {
        valid: take("valid"),
        invalid: take("invalid"),
    })
}
