//! # Configuration Utilities
//!
//! TOML configuration for the command-line tool. Every section and field is
//! optional; a missing file section falls back to its defaults.

use anyhow::{Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::str::FromStr;

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Arguments
/// - `path`: Path to the TOML configuration file
///
/// # Returns
/// - `Ok(T)`: Successfully loaded and parsed configuration
/// - `Err`: File I/O or parsing error
///
/// # Example
/// ```ignore
/// let config: StegoConfig = load_config("steganotp.toml")?;
/// ```
pub fn load_config<T>(path: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let content =
        fs::read_to_string(path).with_context(|| format!("reading config file {}", path))?;
    let config: T =
        toml::from_str(&content).with_context(|| format!("parsing config file {}", path))?;
    Ok(config)
}

/// Top-level configuration of the `steganotp` binary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StegoConfig {
    pub processing: ProcessingConfig,
    pub logging: LoggingConfig,
}

/// Controls the worker pool used for per-row encoding and decoding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Number of rayon worker threads; `0` lets rayon pick one per core
    pub threads: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.level)
            .map_err(|_| anyhow::anyhow!("unknown log level '{}'", self.level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_when_sections_missing() {
        let config: StegoConfig = toml::from_str("").unwrap();
        assert_eq!(config.processing.threads, 0);
        assert_eq!(config.logging.level_filter().unwrap(), LevelFilter::Info);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[processing]\nthreads = 3\n\n[logging]\nlevel = \"debug\"").unwrap();

        let config: StegoConfig = load_config(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.processing.threads, 3);
        assert_eq!(config.logging.level_filter().unwrap(), LevelFilter::Debug);
    }

    #[test]
    fn test_unknown_level_is_rejected() {
        let config: StegoConfig = toml::from_str("[logging]\nlevel = \"loud\"").unwrap();
        assert!(config.logging.level_filter().is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result: Result<StegoConfig> = load_config("/nonexistent/steganotp.toml");
        assert!(result.is_err());
    }
}
