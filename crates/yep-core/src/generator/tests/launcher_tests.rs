use std::fs;

use tempfile::tempdir;

use crate::config::Settings;
use crate::generator::launcher::{Launcher, Toolchain};
use crate::generator::{generate_start_file, DiscoveryMode};

#[test]
fn test_start_file_location() {
    let launcher = Launcher::new("/srv/shop");
    assert!(launcher.start_file().ends_with("config/src/bin/yep_start.rs"));
}

#[test]
fn test_write_entry_point_overwrites() {
    let project = tempdir().unwrap();
    let launcher = Launcher::new(project.path());

    let path = launcher.write_entry_point("fn main() { first() }\n").unwrap();
    let again = launcher.write_entry_point("fn main() {}\n").unwrap();
    assert_eq!(path, again);
    assert_eq!(fs::read_to_string(&path).unwrap(), "fn main() {}\n");

    let entries: Vec<_> = fs::read_dir(path.parent().unwrap()).unwrap().collect();
    assert_eq!(entries.len(), 1, "no temporary files should be left behind");
}

#[test]
fn test_command_arguments() {
    let project = tempdir().unwrap();
    let launcher = Launcher::new(project.path()).with_toolchain(Toolchain::new("cargo"));
    let command = launcher.command();

    assert_eq!(command.get_program().to_string_lossy(), "cargo");
    let args: Vec<String> = command
        .get_args()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    assert_eq!(args[0], "run");
    assert_eq!(args[1], "--quiet");
    assert_eq!(args[2], "--manifest-path");
    assert!(args[3].ends_with("Cargo.toml"));
    assert_eq!(&args[4..], ["--bin", "yep_start"]);
}

#[test]
fn test_generate_start_file_for_test_module() {
    let project = tempdir().unwrap();
    let launcher = Launcher::new(project.path());
    let mut settings = Settings::new();
    settings.set("Server.DBName", "shop");

    let path = generate_start_file(&launcher, &settings, DiscoveryMode::TestModule).unwrap();
    let source = fs::read_to_string(path).unwrap();
    assert!(source.contains("yep_core::start_server("));
    assert!(source.contains("\"Server.DBName\""));
}

#[test]
fn test_launch_failure_to_spawn() {
    let project = tempdir().unwrap();
    let launcher = Launcher::new(project.path())
        .with_toolchain(Toolchain::new("/nonexistent/toolchain/binary"));
    let result = launcher.launch("fn main() {}\n");
    assert!(matches!(result, Err(crate::generator::GeneratorError::Launch { .. })));
    // The file is written before spawning
    assert!(launcher.start_file().exists());
}

#[cfg(unix)]
#[test]
fn test_launch_reports_child_exit_status() {
    let project = tempdir().unwrap();

    let ok = Launcher::new(project.path()).with_toolchain(Toolchain::new("true"));
    assert!(ok.launch("fn main() {}\n").unwrap().success());

    let failing = Launcher::new(project.path()).with_toolchain(Toolchain::new("false"));
    let status = failing.launch("fn main() {}\n").unwrap();
    assert_eq!(status.code(), Some(1));
}
