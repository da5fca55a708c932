//! Project root and manifest path resolution.

use std::path::{Path, PathBuf};

/// Environment variables naming the project root; first present wins.
pub const PROJECT_ROOT_ENV: &[&str] = &["LUMEN_PROJECT_ROOT", "PROJECT_ROOT"];

/// Environment variable naming an alternate manifest path.
pub const CONFIG_FILE_ENV: &str = "LUMEN_CONFIG_FILE";

/// Resolve the project root: `-p/--path` flag, then env vars, then cwd.
pub fn resolve_project_root(flag: Option<&Path>) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    for var in PROJECT_ROOT_ENV {
        if let Ok(value) = std::env::var(var) {
            if !value.is_empty() {
                return PathBuf::from(value);
            }
        }
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Resolve the manifest path: `-c/--config` flag, then env var, then
/// `lumen.toml` under the project root.
pub fn resolve_manifest_path(root: &Path, flag: Option<&Path>) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    if let Ok(value) = std::env::var(CONFIG_FILE_ENV) {
        if !value.is_empty() {
            return PathBuf::from(value);
        }
    }
    root.join("lumen.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins_for_root() {
        let root = resolve_project_root(Some(Path::new("/srv/bot")));
        assert_eq!(root, PathBuf::from("/srv/bot"));
    }

    #[test]
    fn test_root_env_precedence() {
        // set_var is unsafe in edition 2024; this test owns these two vars.
        unsafe {
            std::env::set_var("LUMEN_PROJECT_ROOT", "/srv/first");
            std::env::set_var("PROJECT_ROOT", "/srv/second");
        }
        assert_eq!(resolve_project_root(None), PathBuf::from("/srv/first"));
        unsafe {
            std::env::remove_var("LUMEN_PROJECT_ROOT");
        }
        assert_eq!(resolve_project_root(None), PathBuf::from("/srv/second"));
        unsafe {
            std::env::remove_var("PROJECT_ROOT");
        }
    }

    #[test]
    fn test_manifest_path_defaults_under_root() {
        let path = resolve_manifest_path(Path::new("/srv/bot"), None);
        assert_eq!(path, PathBuf::from("/srv/bot/lumen.toml"));
    }

    #[test]
    fn test_manifest_path_flag_wins() {
        let path = resolve_manifest_path(Path::new("/srv/bot"), Some(Path::new("alt.toml")));
        assert_eq!(path, PathBuf::from("alt.toml"));
    }
}
