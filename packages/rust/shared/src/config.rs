//! Application configuration for PlainRead.
//!
//! User config lives at `~/.plainread/plainread.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PlainReadError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "plainread.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".plainread";

// ---------------------------------------------------------------------------
// Config structs (matching plainread.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Module registry settings.
    #[serde(default)]
    pub modules: ModulesConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Directory where JSON/HTML reports are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Minimum trimmed character count accepted by the pipeline.
    #[serde(default = "default_min_input_chars")]
    pub min_input_chars: usize,

    /// Documents translated concurrently in batch mode.
    #[serde(default = "default_concurrency")]
    pub concurrency: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            min_input_chars: default_min_input_chars(),
            concurrency: default_concurrency(),
        }
    }
}

fn default_output_dir() -> String {
    "plainread-reports".into()
}
fn default_min_input_chars() -> usize {
    200
}
fn default_concurrency() -> u32 {
    4
}

/// `[modules]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModulesConfig {
    /// Modules applied when the caller requests none.
    #[serde(default)]
    pub default: Vec<String>,

    /// Registry names hidden from discovery and loading.
    #[serde(default)]
    pub disabled: Vec<String>,

    /// Seed for module pseudo-random choices (e.g. celebration messages).
    #[serde(default)]
    pub seed: u64,

    /// Words per chunk for the ADHD module.
    #[serde(default = "default_adhd_chunk_words")]
    pub adhd_chunk_words: usize,

    /// Maximum words per sentence for the dyslexia module.
    #[serde(default = "default_dyslexia_max_sentence_words")]
    pub dyslexia_max_sentence_words: usize,
}

impl Default for ModulesConfig {
    fn default() -> Self {
        Self {
            default: Vec::new(),
            disabled: Vec::new(),
            seed: 0,
            adhd_chunk_words: default_adhd_chunk_words(),
            dyslexia_max_sentence_words: default_dyslexia_max_sentence_words(),
        }
    }
}

fn default_adhd_chunk_words() -> usize {
    150
}
fn default_dyslexia_max_sentence_words() -> usize {
    15
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.plainread/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| PlainReadError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.plainread/plainread.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| PlainReadError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        PlainReadError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| PlainReadError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| PlainReadError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| PlainReadError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("output_dir"));
        assert!(toml_str.contains("min_input_chars"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.defaults.min_input_chars, 200);
        assert_eq!(parsed.modules.adhd_chunk_words, 150);
        assert_eq!(parsed.modules.dyslexia_max_sentence_words, 15);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[modules]
default = ["adhd", "visual"]
seed = 42
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.modules.default, vec!["adhd", "visual"]);
        assert_eq!(config.modules.seed, 42);
        assert_eq!(config.modules.adhd_chunk_words, 150);
        assert_eq!(config.defaults.output_dir, "plainread-reports");
    }

    #[test]
    fn load_config_from_reports_parse_errors() {
        let path = std::env::temp_dir().join("plainread-bad-config-test.toml");
        std::fs::write(&path, "[defaults\nbroken").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));

        let _ = std::fs::remove_file(&path);
    }
}
