use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexSet;

use crate::generator::error::GeneratorError;
use crate::kernel::constants::{CONFIG_MANIFEST_NAME, CONFIG_PACKAGE_DIR, CORE_CRATE_NAME};

/// Module import paths a project declares, in declaration order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleSet {
    modules: IndexSet<String>,
}

impl ModuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a module. A module already present keeps its first position.
    pub fn insert(&mut self, module: impl Into<String>) -> bool {
        self.modules.insert(module.into())
    }

    pub fn contains(&self, module: &str) -> bool {
        self.modules.contains(module)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ModuleSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for module in iter {
            set.insert(module);
        }
        set
    }
}

/// How a missing configuration package is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiscoveryMode {
    /// The configuration package must exist
    #[default]
    Strict,
    /// Generating for a module under test: a missing package means no modules
    TestModule,
}

/// `<project_dir>/config/Cargo.toml`
pub fn config_manifest_path(project_dir: &Path) -> PathBuf {
    project_dir.join(CONFIG_PACKAGE_DIR).join(CONFIG_MANIFEST_NAME)
}

/// Lists the modules the project's configuration package depends on.
///
/// The keys of `[dependencies]` are taken in declaration order with `-`
/// turned into `_`, since that is the name code uses for the crate. The
/// framework crate is skipped: the generated program refers to it by name.
///
/// Only the top-level `[dependencies]` table is read. Modules declared under
/// `[target.'cfg(..)'.dependencies]` or `[dev-dependencies]` are not
/// discovered and never reach the generated program.
pub fn discover(project_dir: &Path, mode: DiscoveryMode) -> Result<ModuleSet, GeneratorError> {
    let manifest_path = config_manifest_path(project_dir);
    let content = match fs::read_to_string(&manifest_path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound && mode == DiscoveryMode::TestModule => {
            log::warn!(
                "No configuration package at {}; generating without modules",
                manifest_path.display()
            );
            return Ok(ModuleSet::new());
        }
        Err(e) => return Err(GeneratorError::discovery(manifest_path, e.to_string())),
    };

    let modules = parse_manifest(&content)
        .map_err(|reason| GeneratorError::discovery(manifest_path.clone(), reason))?;
    log::debug!("Discovered {} modules in {}", modules.len(), manifest_path.display());
    Ok(modules)
}

/// Extracts the module set from the text of a configuration package manifest.
pub fn parse_manifest(content: &str) -> Result<ModuleSet, String> {
    let manifest: toml::Table = toml::from_str(content).map_err(|e: toml::de::Error| e.to_string())?;

    let dependencies = match manifest.get("dependencies") {
        None => return Ok(ModuleSet::new()),
        Some(toml::Value::Table(dependencies)) => dependencies,
        Some(_) => return Err("[dependencies] is not a table".to_string()),
    };

    Ok(dependencies
        .keys()
        .map(|name| name.replace('-', "_"))
        .filter(|name| name != CORE_CRATE_NAME)
        .collect())
}
