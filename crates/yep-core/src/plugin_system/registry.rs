use std::fmt;
use std::sync::Arc;

use crate::plugin_system::error::ModuleSystemError;
use crate::plugin_system::traits::Module;

/// Builds a module instance; used by `register_module!`.
pub type ModuleFactory = fn() -> Arc<dyn Module>;

/// Link-time registration of a module.
pub struct ModuleRegistration {
    /// `module_path!()` of the registering code
    pub origin: &'static str,
    pub build: ModuleFactory,
}

impl ModuleRegistration {
    pub const fn new(origin: &'static str, build: ModuleFactory) -> Self {
        Self { origin, build }
    }
}

inventory::collect!(ModuleRegistration);

/// Registers a module with the application it gets linked into.
///
/// ```ignore
/// struct Sales;
/// impl yep_core::Module for Sales {
///     fn name(&self) -> &str { "sales" }
/// }
/// yep_core::register_module!(Sales);
/// ```
#[macro_export]
macro_rules! register_module {
    ($module:expr) => {
        $crate::__private::inventory::submit! {
            $crate::plugin_system::ModuleRegistration::new(
                ::core::module_path!(),
                || -> ::std::sync::Arc<dyn $crate::plugin_system::Module> {
                    ::std::sync::Arc::new($module)
                },
            )
        }
    };
}

/// Ordered collection of the modules taking part in the bootstrap.
#[derive(Default)]
pub struct ModuleRegistry {
    modules: Vec<Arc<dyn Module>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects every module registered with `register_module!`.
    ///
    /// Link order is not stable, so registrations are sorted by origin and
    /// module name to keep hook order the same from one start to the next.
    pub fn from_registered() -> Result<Self, ModuleSystemError> {
        let mut found: Vec<(&'static str, Arc<dyn Module>)> = inventory::iter::<ModuleRegistration>
            .into_iter()
            .map(|registration| (registration.origin, (registration.build)()))
            .collect();
        found.sort_by(|(a_origin, a), (b_origin, b)| {
            a_origin.cmp(b_origin).then_with(|| a.name().cmp(b.name()))
        });

        let mut registry = Self::new();
        for (origin, module) in found {
            log::debug!("Found module '{}' from {}", module.name(), origin);
            registry.register(module)?;
        }
        Ok(registry)
    }

    /// Appends a module. Names must be unique.
    pub fn register(&mut self, module: Arc<dyn Module>) -> Result<(), ModuleSystemError> {
        if self.contains(module.name()) {
            return Err(ModuleSystemError::DuplicateModule {
                name: module.name().to_string(),
            });
        }
        self.modules.push(module);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.iter().any(|m| m.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Module>> {
        self.modules.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.modules.iter().map(|m| m.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("modules", &self.names())
            .finish()
    }
}
