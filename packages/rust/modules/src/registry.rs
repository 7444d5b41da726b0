//! Name-keyed module registry with lazy, cached instantiation.
//!
//! Modules are registered as factories at process start. Nothing is built
//! until a module is first requested; the outcome (instance or failure) is
//! cached for the registry's lifetime. Each entry is guarded by a
//! [`OnceLock`], so concurrent first use builds the module exactly once and
//! every caller observes the same instance.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, OnceLock};

use tracing::{debug, warn};

use plainread_shared::{ModuleInfo, ModulesConfig};

use crate::{AccessibilityModule, AdhdModule, DyslexiaModule, VisualModule};

/// Why a factory could not build its module.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModuleInitError {
    /// A numeric setting is at or below its lower bound.
    #[error("{setting} must be greater than {min}, got {value}")]
    SettingTooSmall {
        setting: &'static str,
        min: usize,
        value: usize,
    },

    /// A module-specific prerequisite is missing.
    #[error("{0}")]
    Unavailable(String),
}

/// Outcome of running a factory: a module, or the reason it could not be built.
pub type ModuleBuild = Result<Box<dyn AccessibilityModule>, ModuleInitError>;

/// Builds a module from the registry's module configuration.
pub type ModuleFactory = Box<dyn Fn(&ModulesConfig) -> ModuleBuild + Send + Sync>;

/// Why a requested module could not be used. Never fatal to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModuleLoadError {
    #[error("no module registered under '{name}'")]
    NotFound { name: String },

    #[error("module '{name}' is disabled by configuration")]
    Disabled { name: String },

    #[error("module '{name}' failed to initialize: {reason}")]
    Init {
        name: String,
        reason: ModuleInitError,
    },
}

type LoadOutcome = Result<Arc<dyn AccessibilityModule>, ModuleLoadError>;

struct Entry {
    factory: ModuleFactory,
    instance: OnceLock<LoadOutcome>,
}

/// Registration table of available modules.
pub struct ModuleRegistry {
    config: ModulesConfig,
    entries: BTreeMap<String, Entry>,
    disabled: BTreeSet<String>,
}

impl ModuleRegistry {
    /// Create an empty registry.
    pub fn new(config: ModulesConfig) -> Self {
        let disabled = config.disabled.iter().cloned().collect();
        Self {
            config,
            entries: BTreeMap::new(),
            disabled,
        }
    }

    /// Create a registry with the built-in `adhd`, `visual`, and `dyslexia` modules.
    pub fn with_builtins(config: ModulesConfig) -> Self {
        let mut registry = Self::new(config);

        registry.register(
            "adhd",
            Box::new(|cfg: &ModulesConfig| -> ModuleBuild {
                AdhdModule::new(cfg.adhd_chunk_words, cfg.seed)
                    .map(|m| Box::new(m) as Box<dyn AccessibilityModule>)
            }),
        );
        registry.register(
            "visual",
            Box::new(|_: &ModulesConfig| -> ModuleBuild {
                Ok(Box::new(VisualModule::new()) as Box<dyn AccessibilityModule>)
            }),
        );
        registry.register(
            "dyslexia",
            Box::new(|cfg: &ModulesConfig| -> ModuleBuild {
                DyslexiaModule::new(cfg.dyslexia_max_sentence_words)
                    .map(|m| Box::new(m) as Box<dyn AccessibilityModule>)
            }),
        );

        registry
    }

    /// Register (or replace) a module factory under `name`.
    pub fn register(&mut self, name: impl Into<String>, factory: ModuleFactory) {
        let name = name.into();
        debug!(module = %name, "registering module");
        self.entries.insert(
            name,
            Entry {
                factory,
                instance: OnceLock::new(),
            },
        );
    }

    /// Names of all registered, enabled modules, without loading any of them.
    pub fn available(&self) -> Vec<&str> {
        self.entries
            .keys()
            .filter(|name| !self.disabled.contains(*name))
            .map(String::as_str)
            .collect()
    }

    /// Load a module, instantiating it on first use.
    ///
    /// The first caller runs the factory; concurrent callers block until it
    /// finishes and then share the cached outcome.
    pub fn load(&self, name: &str) -> Result<Arc<dyn AccessibilityModule>, ModuleLoadError> {
        let entry = self.entries.get(name).ok_or_else(|| ModuleLoadError::NotFound {
            name: name.to_string(),
        })?;

        if self.disabled.contains(name) {
            return Err(ModuleLoadError::Disabled {
                name: name.to_string(),
            });
        }

        entry
            .instance
            .get_or_init(|| {
                debug!(module = %name, "instantiating module");
                (entry.factory)(&self.config)
                    .map(|module| -> Arc<dyn AccessibilityModule> { Arc::from(module) })
                    .map_err(|reason| ModuleLoadError::Init {
                        name: name.to_string(),
                        reason,
                    })
            })
            .clone()
    }

    /// Whether `name` has already been instantiated (successfully or not).
    pub fn is_loaded(&self, name: &str) -> bool {
        self.entries
            .get(name)
            .is_some_and(|entry| entry.instance.get().is_some())
    }

    /// Load every available module and describe the ones that load.
    pub fn list_modules(&self) -> Vec<ModuleInfo> {
        self.available()
            .into_iter()
            .filter_map(|name| match self.load(name) {
                Ok(module) => Some(ModuleInfo {
                    name: name.to_string(),
                    display_name: module.name().to_string(),
                    description: module.description().to_string(),
                }),
                Err(e) => {
                    warn!(module = %name, error = %e, "module failed to load, omitting from listing");
                    None
                }
            })
            .collect()
    }
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        Self::with_builtins(ModulesConfig::default())
    }
}
