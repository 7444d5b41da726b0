//! Shared types, error model, and configuration for PlainRead.
//!
//! This crate is the foundation depended on by all other PlainRead crates.
//! It provides:
//! - [`PlainReadError`], the unified error type
//! - Domain types ([`TranslationResult`], [`SubjectArea`], [`ReadingLevel`], [`ModuleInfo`])
//! - Configuration ([`AppConfig`], [`ModulesConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, ModulesConfig, config_dir, config_file_path, init_config,
    load_config, load_config_from,
};
pub use error::{PlainReadError, Result};
pub use types::{DIRECT_INPUT_SOURCE, ModuleInfo, ReadingLevel, SubjectArea, TranslationResult};
