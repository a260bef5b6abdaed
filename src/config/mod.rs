//! Configuration for dpath-validator.
//!
//! Settings have defaults via `Config::default()` and can be loaded from a
//! TOML file. Command-line flags override loaded values.
//!
//! # Example
//!
//! ```
//! use dpath_validator::config::Config;
//!
//! let config = Config::default();
//! assert!(!config.strict_mode);
//! assert_eq!(config.wildcard, "*");
//!
//! let strict = Config {
//!     strict_mode: true,
//!     ..Config::default()
//! };
//! assert!(strict.strict_mode);
//! ```

use crate::compiler::CompilerOptions;
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Configuration for template compilation and validation.
///
/// * `strict_mode` - every path must match instead of any (default: false)
/// * `wildcard` - template string treated as "any value" (default: "*")
/// * `quote_all_keys` - quote every key in emitted paths (default: false)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Require every path to match instead of at least one
    #[serde(default)]
    pub strict_mode: bool,

    /// Template string that means "accept any value"
    #[serde(default = "default_wildcard")]
    pub wildcard: String,

    /// Quote plain identifier keys as well. Keys with separators or other
    /// special characters are quoted either way.
    #[serde(default)]
    pub quote_all_keys: bool,
}

fn default_wildcard() -> String {
    "*".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strict_mode: false,
            wildcard: default_wildcard(),
            quote_all_keys: false,
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/dpath-validator/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("dpath-validator");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't
    /// be parsed. A file that exists but fails to parse is logged at `warn`.
    pub fn load() -> Self {
        let config_path = match Self::config_path() {
            Some(path) => path,
            None => return Self::default(),
        };

        if !config_path.exists() {
            return Self::default();
        }

        Self::from_file(&config_path).unwrap_or_else(|err| {
            warn!(path = %config_path.display(), error = %err, "ignoring unreadable config");
            Self::default()
        })
    }

    /// Loads configuration from an explicit TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - The TOML file to read
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing:
    /// - `Ok(Config)` with every missing field set to its default
    /// - `Err(anyhow::Error)` if the file cannot be read or parsed
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dpath_validator::config::Config;
    ///
    /// let config = Config::from_file("validator.toml").unwrap();
    /// println!("strict: {}", config.strict_mode);
    /// ```
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The file does not exist or cannot be read
    /// - The contents are not valid TOML for this struct
    /// - `wildcard` is set to an empty string
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// Parses configuration from TOML text.
    ///
    /// # Examples
    ///
    /// ```
    /// use dpath_validator::config::Config;
    ///
    /// let config = Config::from_toml("strict_mode = true").unwrap();
    /// assert!(config.strict_mode);
    /// assert_eq!(config.wildcard, "*");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error for malformed TOML or an empty `wildcard`.
    pub fn from_toml(contents: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(contents)?;

        // An empty glyph would turn every empty string into a wildcard
        if config.wildcard.is_empty() {
            anyhow::bail!("wildcard must not be empty");
        }
        Ok(config)
    }

    /// Compiler settings derived from this configuration.
    pub fn compiler_options(&self) -> CompilerOptions {
        CompilerOptions {
            quote_all_keys: self.quote_all_keys,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loose_by_default() {
        let config = Config::default();
        assert!(!config.strict_mode);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml("strict_mode = true").unwrap();
        assert!(config.strict_mode);
        assert_eq!(config.wildcard, "*");
        assert!(!config.quote_all_keys);
    }

    #[test]
    fn test_empty_wildcard_rejected() {
        assert!(Config::from_toml("wildcard = ''").is_err());
    }

    #[test]
    fn test_compiler_options_follow_config() {
        let config = Config::from_toml("quote_all_keys = true").unwrap();
        assert!(config.compiler_options().quote_all_keys);
        assert!(!Config::default().compiler_options().quote_all_keys);
    }
}
