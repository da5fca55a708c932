use super::*;

#[test]
fn test_manager_from_name() {
    assert_eq!(
        EnvironmentManager::from_name("pdm"),
        Some(EnvironmentManager::Pdm)
    );
    assert_eq!(
        EnvironmentManager::from_name("poetry"),
        Some(EnvironmentManager::Poetry)
    );
    assert_eq!(EnvironmentManager::from_name("hatch"), None);
    assert_eq!(EnvironmentManager::from_name(""), None);
}

#[test]
fn test_owns_process() {
    assert!(EnvironmentManager::Pdm.owns_process());
    assert!(EnvironmentManager::Poetry.owns_process());
    assert!(!EnvironmentManager::Venv.owns_process());
    assert!(!EnvironmentManager::System.owns_process());
}

#[test]
fn test_manager_display() {
    assert_eq!(EnvironmentManager::Pdm.to_string(), "pdm");
    assert_eq!(EnvironmentManager::Venv.to_string(), "venv");
}

#[test]
fn test_interpreter_split() {
    let interpreter = Interpreter {
        manager: EnvironmentManager::Pdm,
        command: vec!["pdm".to_string(), "run".to_string(), "python".to_string()],
        search_paths: Vec::new(),
    };
    let (program, leading) = interpreter.split();
    assert_eq!(program, "pdm");
    assert_eq!(leading, &["run".to_string(), "python".to_string()]);
}

#[test]
fn test_resolve_unknown_manager_is_fatal() {
    let result = resolve(
        std::path::Path::new("/srv/bot"),
        EnvironmentOverride {
            python_path: None,
            manager: Some("hatch"),
        },
    );
    assert!(matches!(result, Err(PythonError::UnknownManager(n)) if n == "hatch"));
}

#[test]
fn test_resolve_is_idempotent_once_retargeted() {
    // set_var is unsafe in edition 2024; this test owns the marker var.
    unsafe {
        std::env::set_var(RETARGET_ENV, "1");
    }
    for _ in 0..2 {
        let resolution = resolve(
            std::path::Path::new("/srv/bot"),
            EnvironmentOverride {
                python_path: None,
                manager: Some("pdm"),
            },
        )
        .unwrap();
        assert_eq!(resolution.plan, RetargetPlan::None);
        assert_eq!(resolution.interpreter.command, vec!["python".to_string()]);
        assert!(resolution.interpreter.search_paths.is_empty());
    }
    unsafe {
        std::env::remove_var(RETARGET_ENV);
    }
}

#[test]
fn test_read_build_backend() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("pyproject.toml"),
        "[build-system]\nrequires = [\"poetry-core\"]\nbuild-backend = \"poetry.core.masonry.api\"\n",
    )
    .unwrap();
    let backend = read_build_backend(dir.path()).unwrap();
    assert!(backend.contains("poetry"));
}

#[test]
fn test_read_build_backend_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(read_build_backend(dir.path()).is_none());
}
