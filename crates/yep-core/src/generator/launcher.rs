use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use crate::generator::discovery::config_manifest_path;
use crate::generator::error::GeneratorError;
use crate::kernel::constants::{DEFAULT_TOOLCHAIN, START_BIN_NAME, START_FILE_PATH, TOOLCHAIN_ENV};
use crate::utils::write_atomic;

/// The executable used to compile and run the entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    program: OsString,
}

impl Toolchain {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self { program: program.into() }
    }

    /// `$CARGO` when set (as it is under `cargo run`), `cargo` otherwise.
    pub fn from_env() -> Self {
        Self::new(env::var_os(TOOLCHAIN_ENV).unwrap_or_else(|| OsString::from(DEFAULT_TOOLCHAIN)))
    }

    pub fn program(&self) -> &OsString {
        &self.program
    }
}

/// Writes the generated entry point into a project and runs it.
///
/// Two launches on the same project directory at once share one generated
/// file and are not supported.
#[derive(Debug, Clone)]
pub struct Launcher {
    project_dir: PathBuf,
    toolchain: Toolchain,
}

impl Launcher {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            toolchain: Toolchain::from_env(),
        }
    }

    pub fn with_toolchain(mut self, toolchain: Toolchain) -> Self {
        self.toolchain = toolchain;
        self
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// `<project_dir>/config/src/bin/yep_start.rs`
    pub fn start_file(&self) -> PathBuf {
        self.project_dir.join(START_FILE_PATH)
    }

    /// Replaces the generated entry point with `source`.
    pub fn write_entry_point(&self, source: &str) -> Result<PathBuf, GeneratorError> {
        let path = self.start_file();
        write_atomic(&path, source.as_bytes()).map_err(|source| GeneratorError::Io {
            path: path.clone(),
            operation: "write_entry_point".to_string(),
            source,
        })?;
        log::debug!("Wrote entry point {}", path.display());
        Ok(path)
    }

    /// `cargo run --quiet --manifest-path <config manifest> --bin yep_start`,
    /// with the standard streams inherited.
    pub fn command(&self) -> Command {
        let mut command = Command::new(self.toolchain.program());
        command
            .arg("run")
            .arg("--quiet")
            .arg("--manifest-path")
            .arg(config_manifest_path(&self.project_dir))
            .arg("--bin")
            .arg(START_BIN_NAME)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        command
    }

    /// Writes `source`, runs it and waits for it to exit.
    ///
    /// No timeout: the child is the server and normally runs until stopped.
    pub fn launch(&self, source: &str) -> Result<ExitStatus, GeneratorError> {
        self.write_entry_point(source)?;

        let program = self.toolchain.program().to_string_lossy().into_owned();
        log::info!("Starting server through '{}'", program);
        let status = self
            .command()
            .status()
            .map_err(|source| GeneratorError::Launch { program, source })?;

        if !status.success() {
            log::warn!("Server process exited with {}", status);
        }
        Ok(status)
    }
}
