//! Configuration loader.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::ConfigError;
use crate::schema::Config;

/// Environment variables consulted when a secret is absent from the file.
pub const OPENROUTER_API_KEY: &str = "OPENROUTER_API_KEY";
pub const BROWSERBASE_API_KEY: &str = "BROWSERBASE_API_KEY";
pub const BROWSERBASE_PROJECT_ID: &str = "BROWSERBASE_PROJECT_ID";
pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let mut config: Config = toml::from_str(&expanded)?;
        if let Some(dir) = &config.logging.directory {
            let expanded = Self::expand_path(&dir.to_string_lossy());
            config.logging.directory = Some(PathBuf::from(expanded));
        }
        Ok(config)
    }

    /// Load from `path` when it exists, defaults otherwise. Secrets missing
    /// from the file are then filled from the environment.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        let mut config = match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::NotFound(_)) => Config::default(),
            Err(e) => return Err(e),
        };
        Self::apply_env_fallbacks(&mut config);
        Ok(config)
    }

    /// Fill unset credentials from the process environment.
    pub fn apply_env_fallbacks(config: &mut Config) {
        Self::apply_fallbacks_with(config, |key| std::env::var(key).ok());
    }

    fn apply_fallbacks_with(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
        let fill = |slot: &mut Option<String>, key: &str| {
            if slot.is_none() {
                *slot = lookup(key).filter(|v| !v.is_empty());
            }
        };
        fill(&mut config.interpreter.api_key, OPENROUTER_API_KEY);
        fill(&mut config.browser.api_key, BROWSERBASE_API_KEY);
        fill(&mut config.browser.project_id, BROWSERBASE_PROJECT_ID);
        fill(&mut config.browser.model.api_key, GEMINI_API_KEY);
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ConfigError::InvalidValue {
            field: "${VAR}".to_string(),
            message: e.to_string(),
        })?;

        let mut result = content.to_string();
        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.webpilot`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}
