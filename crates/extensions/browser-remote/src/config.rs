//! Engine configuration.

/// Where browsers come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RemoteProvider {
    /// Browserbase-hosted browsers with live view.
    #[default]
    Browserbase,
    /// A local or self-hosted Chrome DevTools endpoint.
    Cdp,
}

/// Settings for [`RemoteBrowserEngine`](crate::RemoteBrowserEngine).
#[derive(Debug, Clone)]
pub struct RemoteBrowserConfig {
    pub provider: RemoteProvider,
    pub api_key: Option<String>,
    pub project_id: Option<String>,
    /// Browserbase REST API base URL.
    pub api_url: String,
    /// DevTools HTTP endpoint for [`RemoteProvider::Cdp`].
    pub cdp_endpoint: String,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Step limit for autonomous agents.
    pub agent_max_steps: u32,
    /// Model name sent with every page-model request.
    pub model_name: String,
}

impl Default for RemoteBrowserConfig {
    fn default() -> Self {
        Self {
            provider: RemoteProvider::default(),
            api_key: None,
            project_id: None,
            api_url: "https://api.browserbase.com/v1".to_string(),
            cdp_endpoint: "http://localhost:9222".to_string(),
            viewport_width: 1280,
            viewport_height: 720,
            agent_max_steps: 10,
            model_name: "gemini-2.0-flash-exp".to_string(),
        }
    }
}

impl RemoteBrowserConfig {
    pub fn with_provider(mut self, provider: RemoteProvider) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_credentials(mut self, api_key: impl Into<String>, project_id: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_cdp_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.cdp_endpoint = endpoint.into();
        self
    }

    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    pub fn with_agent_max_steps(mut self, steps: u32) -> Self {
        self.agent_max_steps = steps;
        self
    }

    pub fn with_model_name(mut self, model: impl Into<String>) -> Self {
        self.model_name = model.into();
        self
    }
}
