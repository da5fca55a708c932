//! Environment manager detection and interpreter resolution.
//!
//! Resolution order: explicit flag, then `LUMEN_PYTHON_PATH`, then
//! auto-detection from project build metadata and executable probing.

use std::path::Path;

use tracing::{debug, warn};

use crate::error::PythonError;
use crate::probe;
use crate::retarget::{RetargetPlan, RETARGET_ENV};

/// Environment variable naming an explicit interpreter path.
pub const PYTHON_PATH_ENV: &str = "LUMEN_PYTHON_PATH";

/// Which environment manager owns the project's interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentManager {
    Pdm,
    Poetry,
    /// A project-local virtual environment; only library paths differ.
    Venv,
    /// The ambient interpreter, no manager involved.
    System,
}

impl EnvironmentManager {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvironmentManager::Pdm => "pdm",
            EnvironmentManager::Poetry => "poetry",
            EnvironmentManager::Venv => "venv",
            EnvironmentManager::System => "system",
        }
    }

    /// Parse an `--environment-manager` value.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pdm" => Some(EnvironmentManager::Pdm),
            "poetry" => Some(EnvironmentManager::Poetry),
            _ => None,
        }
    }

    /// Whether this manager must own the process environment.
    pub fn owns_process(&self) -> bool {
        matches!(self, EnvironmentManager::Pdm | EnvironmentManager::Poetry)
    }
}

impl std::fmt::Display for EnvironmentManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved interpreter identity.
#[derive(Debug, Clone)]
pub struct Interpreter {
    pub manager: EnvironmentManager,
    /// Argv prefix that invokes the interpreter, e.g. `["pdm", "run", "python"]`.
    pub command: Vec<String>,
    /// Library search paths spliced into the launched child (`Venv`/`System`).
    pub search_paths: Vec<std::path::PathBuf>,
}

impl Interpreter {
    /// The program and leading args for launching a Python script.
    pub fn split(&self) -> (&str, &[String]) {
        (&self.command[0], &self.command[1..])
    }
}

/// Outcome of interpreter resolution: the identity plus what to do about it.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub interpreter: Interpreter,
    pub plan: RetargetPlan,
}

/// Explicit overrides from CLI flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvironmentOverride<'a> {
    pub python_path: Option<&'a str>,
    pub manager: Option<&'a str>,
}

/// Resolve the interpreter that should run the project.
///
/// Fatal when no environment is resolvable; every later phase depends on
/// knowing how to invoke the target program.
pub fn resolve(
    project_root: &Path,
    overrides: EnvironmentOverride<'_>,
) -> Result<Resolution, PythonError> {
    let retargeted = std::env::var_os(RETARGET_ENV).is_some();

    if let Some(path) = overrides.python_path {
        return resolve_explicit_path(path);
    }
    if let Some(name) = overrides.manager {
        let manager = EnvironmentManager::from_name(name)
            .ok_or_else(|| PythonError::UnknownManager(name.to_string()))?;
        return resolve_manager(manager, retargeted);
    }
    if let Ok(path) = std::env::var(PYTHON_PATH_ENV) {
        if !path.is_empty() {
            return resolve_explicit_path(&path);
        }
    }

    match guess_environment(project_root) {
        Some(manager) if manager.owns_process() => resolve_manager(manager, retargeted),
        Some(manager) => resolve_ambient(manager),
        None => Err(PythonError::NoEnvironment(
            project_root.display().to_string(),
        )),
    }
}

fn resolve_explicit_path(path: &str) -> Result<Resolution, PythonError> {
    let command = vec![path.to_string()];
    let search_paths = probe::query_sys_path(&command)?;
    Ok(Resolution {
        plan: RetargetPlan::Splice(search_paths.clone()),
        interpreter: Interpreter {
            manager: EnvironmentManager::System,
            command,
            search_paths,
        },
    })
}

fn resolve_manager(
    manager: EnvironmentManager,
    retargeted: bool,
) -> Result<Resolution, PythonError> {
    if retargeted {
        // Already re-invoked under `<manager> run`; the ambient python is
        // the environment's own.
        debug!("Already running under {}, continuing in-process", manager);
        return Ok(Resolution {
            plan: RetargetPlan::None,
            interpreter: Interpreter {
                manager,
                command: vec!["python".to_string()],
                search_paths: Vec::new(),
            },
        });
    }
    if !probe::test_executable(manager.as_str()) {
        return Err(PythonError::ManagerUnavailable(manager.as_str().to_string()));
    }
    Ok(Resolution {
        plan: RetargetPlan::Exec(vec![manager.as_str().to_string(), "run".to_string()]),
        interpreter: Interpreter {
            manager,
            command: vec![
                manager.as_str().to_string(),
                "run".to_string(),
                "python".to_string(),
            ],
            search_paths: Vec::new(),
        },
    })
}

fn resolve_ambient(manager: EnvironmentManager) -> Result<Resolution, PythonError> {
    let command = vec!["python".to_string()];
    let search_paths = probe::query_sys_path(&command)?;
    Ok(Resolution {
        plan: RetargetPlan::Splice(search_paths.clone()),
        interpreter: Interpreter {
            manager,
            command,
            search_paths,
        },
    })
}

/// Auto-detect the environment manager from project build metadata and
/// executables on the search path.
fn guess_environment(project_root: &Path) -> Option<EnvironmentManager> {
    if let Some(backend) = read_build_backend(project_root) {
        if backend.contains("poetry") && probe::test_executable("poetry") {
            return Some(EnvironmentManager::Poetry);
        }
        if probe::test_executable("pdm") {
            return Some(EnvironmentManager::Pdm);
        }
    }
    match probe::query_prefixes(&["python".to_string()]) {
        Ok((prefix, base_prefix)) if prefix != base_prefix => Some(EnvironmentManager::Venv),
        Ok(_) => Some(EnvironmentManager::System),
        Err(e) => {
            warn!("Interpreter probe failed: {}", e);
            None
        }
    }
}

fn read_build_backend(project_root: &Path) -> Option<String> {
    let content = std::fs::read_to_string(project_root.join("pyproject.toml")).ok()?;
    let doc: toml::Value = toml::from_str(&content).ok()?;
    doc.get("build-system")?
        .get("build-backend")?
        .as_str()
        .map(str::to_string)
}

#[cfg(test)]
#[path = "environment_tests.rs"]
mod tests;
