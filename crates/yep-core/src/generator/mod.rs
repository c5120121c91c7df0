//! # YEP Core Generator
//!
//! The parent half of `yep server`. [`discovery`] finds the modules a project
//! declares, [`synthesizer`] renders a `main` that links them in with the
//! resolved settings, and [`launcher`] writes that file into the project and
//! runs it with `cargo run`.
pub mod discovery;
pub mod error;
pub mod launcher;
pub mod synthesizer;

use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use crate::config::{serialize, Settings};
use crate::kernel::error::Result;

pub use discovery::{discover, DiscoveryMode, ModuleSet};
pub use error::GeneratorError;
pub use launcher::{Launcher, Toolchain};
pub use synthesizer::render;

/// Discovers the project's modules and renders the entry point source.
pub fn prepare_entry_point(project_dir: &Path, settings: &Settings, mode: DiscoveryMode) -> Result<String> {
    let modules = discover(project_dir, mode)?;
    log::info!(
        "Linking {} module(s): {}",
        modules.len(),
        modules.iter().collect::<Vec<_>>().join(", ")
    );
    Ok(render(&modules, &serialize(settings))?)
}

/// Generates the entry point without running it. Returns the written path.
pub fn generate_start_file(
    launcher: &Launcher,
    settings: &Settings,
    mode: DiscoveryMode,
) -> Result<PathBuf> {
    let source = prepare_entry_point(launcher.project_dir(), settings, mode)?;
    Ok(launcher.write_entry_point(&source)?)
}

/// Generates the entry point and runs it to completion.
pub fn generate_and_run(launcher: &Launcher, settings: &Settings, mode: DiscoveryMode) -> Result<ExitStatus> {
    let source = prepare_entry_point(launcher.project_dir(), settings, mode)?;
    Ok(launcher.launch(&source)?)
}

#[cfg(test)]
mod tests;
