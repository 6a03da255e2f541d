//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub interpreter: InterpreterConfig,

    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Text-generation service used to turn user text into commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterpreterConfig {
    /// Falls back to `OPENROUTER_API_KEY`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Chat completions endpoint.
    #[serde(default = "default_interpreter_url")]
    pub base_url: String,

    #[serde(default = "default_interpreter_model")]
    pub model: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    #[serde(default = "default_request_timeout")]
    pub timeout_seconds: u64,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_interpreter_url(),
            model: default_interpreter_model(),
            temperature: None,
            max_tokens: None,
            timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_interpreter_url() -> String {
    "https://openrouter.ai/api/v1/chat/completions".to_string()
}

fn default_interpreter_model() -> String {
    "deepseek/deepseek-chat-v3.1:free".to_string()
}

fn default_request_timeout() -> u64 {
    60
}

/// Where remote browsers come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserProvider {
    /// Hosted browsers provisioned through the Browserbase REST API.
    #[default]
    Browserbase,
    /// A Chrome instance exposing a DevTools endpoint.
    Cdp,
}

/// Remote browser engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default)]
    pub provider: BrowserProvider,

    /// Falls back to `BROWSERBASE_API_KEY`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Falls back to `BROWSERBASE_PROJECT_ID`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    #[serde(default = "default_browserbase_url")]
    pub api_url: String,

    /// DevTools HTTP endpoint used by the `cdp` provider.
    #[serde(default = "default_cdp_endpoint")]
    pub cdp_endpoint: String,

    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,

    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,

    /// Upper bound on steps an autonomous agent may take for one instruction.
    #[serde(default = "default_agent_max_steps")]
    pub agent_max_steps: u32,

    /// Model driving act/extract/observe and the agent.
    #[serde(default)]
    pub model: BrowserModelConfig,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            provider: BrowserProvider::default(),
            api_key: None,
            project_id: None,
            api_url: default_browserbase_url(),
            cdp_endpoint: default_cdp_endpoint(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            agent_max_steps: default_agent_max_steps(),
            model: BrowserModelConfig::default(),
        }
    }
}

fn default_browserbase_url() -> String {
    "https://api.browserbase.com/v1".to_string()
}

fn default_cdp_endpoint() -> String {
    "http://localhost:9222".to_string()
}

fn default_viewport_width() -> u32 {
    1280
}

fn default_viewport_height() -> u32 {
    720
}

fn default_agent_max_steps() -> u32 {
    10
}

/// Model used by the browser engine's AI-driven primitives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserModelConfig {
    /// Falls back to `GEMINI_API_KEY`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_browser_model_url")]
    pub base_url: String,

    #[serde(default = "default_browser_model")]
    pub model: String,

    #[serde(default = "default_request_timeout")]
    pub timeout_seconds: u64,
}

impl Default for BrowserModelConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_browser_model_url(),
            model: default_browser_model(),
            timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_browser_model_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions".to_string()
}

fn default_browser_model() -> String {
    "gemini-2.0-flash-exp".to_string()
}

/// Log output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Also write logs to daily-rotated files.
    #[serde(default = "default_true")]
    pub file: bool,

    /// Log directory. Defaults to `~/.webpilot/logs`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: default_true(),
            directory: None,
        }
    }
}

impl LoggingConfig {
    /// Resolved log directory.
    pub fn log_dir(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".webpilot")
                .join("logs")
        })
    }
}

fn default_true() -> bool {
    true
}
