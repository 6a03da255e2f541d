//! Configuration validation.

use std::fmt;

use crate::error::ConfigError;
use crate::schema::{BrowserProvider, Config};

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Collapse into the first error, if any.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(e) => Err(ConfigError::InvalidValue {
                field: e.path,
                message: e.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_server(config, &mut result);
        Self::validate_interpreter(config, &mut result);
        Self::validate_browser(config, &mut result);
        Self::validate_browser_model(config, &mut result);

        Ok(result)
    }

    fn validate_server(config: &Config, result: &mut ValidationResult) {
        if config.server.port == 0 {
            result.add_error(ValidationError::new("server.port", "Port cannot be 0"));
        }

        if config.server.host.is_empty() {
            result.add_error(ValidationError::new("server.host", "Host cannot be empty"));
        }
    }

    fn validate_interpreter(config: &Config, result: &mut ValidationResult) {
        let interp = &config.interpreter;

        check_url("interpreter.base_url", &interp.base_url, result);

        if interp.model.is_empty() {
            result.add_error(ValidationError::new(
                "interpreter.model",
                "Model cannot be empty",
            ));
        }

        if let Some(t) = interp.temperature {
            if !(0.0..=2.0).contains(&t) {
                result.add_error(ValidationError::new(
                    "interpreter.temperature",
                    "temperature must be between 0.0 and 2.0",
                ));
            }
        }

        if interp.timeout_seconds == 0 {
            result.add_error(ValidationError::new(
                "interpreter.timeout_seconds",
                "timeout_seconds must be greater than 0",
            ));
        }

        if interp.api_key.is_none() {
            result.add_warning(ValidationWarning::new(
                "interpreter.api_key",
                "API key is not set, commands cannot be interpreted (set OPENROUTER_API_KEY)",
            ));
        }
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        let browser = &config.browser;

        if browser.viewport_width == 0 || browser.viewport_height == 0 {
            result.add_error(ValidationError::new(
                "browser.viewport",
                "Viewport dimensions must be greater than 0",
            ));
        }

        if browser.agent_max_steps == 0 {
            result.add_error(ValidationError::new(
                "browser.agent_max_steps",
                "agent_max_steps must be greater than 0",
            ));
        }

        if browser.agent_max_steps > 100 {
            result.add_warning(ValidationWarning::new(
                "browser.agent_max_steps",
                "agent_max_steps is very high (>100), agent instructions may run for a long time",
            ));
        }

        match browser.provider {
            BrowserProvider::Browserbase => {
                check_url("browser.api_url", &browser.api_url, result);

                if browser.api_key.is_none() {
                    result.add_warning(ValidationWarning::new(
                        "browser.api_key",
                        "Browserbase API key is not set (set BROWSERBASE_API_KEY)",
                    ));
                }
                if browser.project_id.is_none() {
                    result.add_warning(ValidationWarning::new(
                        "browser.project_id",
                        "Browserbase project id is not set (set BROWSERBASE_PROJECT_ID)",
                    ));
                }
            }
            BrowserProvider::Cdp => {
                check_url("browser.cdp_endpoint", &browser.cdp_endpoint, result);
            }
        }
    }

    fn validate_browser_model(config: &Config, result: &mut ValidationResult) {
        let model = &config.browser.model;

        check_url("browser.model.base_url", &model.base_url, result);

        if model.api_key.is_none() {
            result.add_warning(ValidationWarning::new(
                "browser.model.api_key",
                "Browser model API key is not set (set GEMINI_API_KEY)",
            ));
        }
    }
}

fn check_url(path: &str, url: &str, result: &mut ValidationResult) {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        result.add_error(ValidationError::new(
            path,
            "URL must start with http:// or https://",
        ));
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
