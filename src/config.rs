//! Application configuration.
//!
//! Configuration is loaded from a TOML file at:
//! 1. `$MAIL2HTML_CONFIG` (environment variable)
//! 2. `~/.config/mail2html/config.toml` (Linux/macOS)
//!    `%APPDATA%\mail2html\config.toml` (Windows)
//! 3. Built-in defaults

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General behavior settings.
    pub general: GeneralConfig,
    /// Bulk conversion defaults.
    pub convert: ConvertConfig,
}

/// General behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub log_level: String,
    /// Override cache directory for logs.
    pub cache_dir: Option<PathBuf>,
}

/// Bulk conversion defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Directory holding the raw message files.
    pub original_dir: PathBuf,
    /// Directory receiving the `.plain.html` / `.html.html` files.
    pub output_dir: PathBuf,
    /// Keep converting the remaining files when one fails.
    pub keep_going: bool,
}

// ── Default implementations ─────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            cache_dir: None,
        }
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            original_dir: PathBuf::from("./original_files"),
            output_dir: PathBuf::from("./output"),
            keep_going: false,
        }
    }
}

// ── Load / save ─────────────────────────────────────────────────

/// Load configuration, searching standard locations.
///
/// Returns the default configuration if no file is found or on parse error.
pub fn load_config() -> Config {
    if let Some(path) = config_file_path() {
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match toml::from_str::<Config>(&contents) {
                    Ok(cfg) => {
                        tracing::info!(path = %path.display(), "Loaded config");
                        return cfg;
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "Failed to parse config, using defaults"
                        );
                    }
                },
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to read config file, using defaults"
                    );
                }
            }
        }
    }
    Config::default()
}

/// Save configuration to the standard location.
pub fn save_config(config: &Config) -> anyhow::Result<()> {
    let path = config_file_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config file path"))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(&path, contents)?;
    tracing::info!(path = %path.display(), "Saved config");
    Ok(())
}

/// Determine the config file path (checking env var first, then standard dirs).
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(env_path) = std::env::var("MAIL2HTML_CONFIG") {
        return Some(PathBuf::from(env_path));
    }

    dirs::config_dir().map(|d| d.join("mail2html").join("config.toml"))
}

/// Return the cache directory for logs.
pub fn cache_dir(config: &Config) -> PathBuf {
    if let Some(ref dir) = config.general.cache_dir {
        return dir.clone();
    }
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("mail2html")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.general.log_level, "warn");
        assert_eq!(cfg.convert.original_dir, PathBuf::from("./original_files"));
        assert_eq!(cfg.convert.output_dir, PathBuf::from("./output"));
        assert!(!cfg.convert.keep_going);
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        let mut cfg = Config::default();
        cfg.convert.keep_going = true;
        let toml_str = toml::to_string_pretty(&cfg).expect("serialize");
        let parsed: Config = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.convert.output_dir, cfg.convert.output_dir);
        assert!(parsed.convert.keep_going);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let partial = r#"
[convert]
output_dir = "/tmp/html"
"#;
        let cfg: Config = toml::from_str(partial).expect("parse partial");
        assert_eq!(cfg.convert.output_dir, PathBuf::from("/tmp/html"));
        // Other fields use defaults
        assert_eq!(cfg.convert.original_dir, PathBuf::from("./original_files"));
        assert_eq!(cfg.general.log_level, "warn");
    }

    #[test]
    fn test_save_and_load_via_env_override() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.toml");
        std::env::set_var("MAIL2HTML_CONFIG", &path);

        let mut cfg = Config::default();
        cfg.convert.keep_going = true;
        save_config(&cfg).unwrap();
        assert_eq!(config_file_path(), Some(path.clone()));
        assert!(path.exists());
        assert!(load_config().convert.keep_going);

        std::env::remove_var("MAIL2HTML_CONFIG");
    }
}
