//! Server initialization and startup logic for WebPilot.

use std::sync::Arc;

use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use webpilot_api::{ApiConfig, ApiServer, AppState};
use webpilot_browser_remote::{RemoteBrowserConfig, RemoteBrowserEngine, RemoteProvider};
use webpilot_config::{BrowserProvider, Config, LoggingConfig};
use webpilot_core::{CommandInterpreter, Pipeline, SessionStore};
use webpilot_protocols::{BrowserEngine, LanguageModel};
use webpilot_provider_openai::OpenAIProvider;

/// Initialize tracing with console output and, when enabled, a daily-rotated log file.
pub(crate) fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let file_layer = if logging.file {
        let log_dir = logging.log_dir();
        std::fs::create_dir_all(&log_dir)?;

        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("webpilot")
            .filename_suffix("log")
            .max_log_files(30)
            .build(&log_dir)?;

        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // Dropping the guard stops the writer thread.
        static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
            std::sync::OnceLock::new();
        let _ = GUARD.set(guard);

        Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
    } else {
        None
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(file_layer)
        .init();

    Ok(())
}

/// Everything a caller needs to drive browsers: the pipeline and the engine's id.
pub(crate) struct Components {
    pub pipeline: Arc<Pipeline>,
    pub engine_id: String,
}

/// Wire interpreter, browser engine and session store from configuration.
pub(crate) fn build_components(config: &Config) -> Components {
    let interp = &config.interpreter;
    let interpreter_model: Arc<dyn LanguageModel> = Arc::new(
        OpenAIProvider::with_url(interp.api_key.clone().unwrap_or_default(), interp.base_url.clone())
            .with_id("interpreter")
            .with_timeout(interp.timeout_seconds),
    );
    let interpreter = CommandInterpreter::new(interpreter_model, interp.model.clone())
        .with_temperature(interp.temperature)
        .with_max_tokens(interp.max_tokens);

    let browser = &config.browser;
    let page_model: Arc<dyn LanguageModel> = Arc::new(
        OpenAIProvider::with_url(
            browser.model.api_key.clone().unwrap_or_default(),
            browser.model.base_url.clone(),
        )
        .with_id("page-model")
        .with_timeout(browser.model.timeout_seconds),
    );

    let engine: Arc<dyn BrowserEngine> = Arc::new(RemoteBrowserEngine::new(
        remote_config(config),
        page_model,
    ));
    let engine_id = engine.id().to_string();
    info!(engine = %engine_id, model = %interp.model, "Browser engine ready");

    let sessions = Arc::new(SessionStore::new(engine));
    Components {
        pipeline: Arc::new(Pipeline::new(interpreter, sessions)),
        engine_id,
    }
}

fn remote_config(config: &Config) -> RemoteBrowserConfig {
    let browser = &config.browser;
    let provider = match browser.provider {
        BrowserProvider::Browserbase => RemoteProvider::Browserbase,
        BrowserProvider::Cdp => RemoteProvider::Cdp,
    };

    RemoteBrowserConfig {
        api_key: browser.api_key.clone(),
        project_id: browser.project_id.clone(),
        ..RemoteBrowserConfig::default()
    }
    .with_provider(provider)
    .with_api_url(browser.api_url.clone())
    .with_cdp_endpoint(browser.cdp_endpoint.clone())
    .with_viewport(browser.viewport_width, browser.viewport_height)
    .with_agent_max_steps(browser.agent_max_steps)
    .with_model_name(browser.model.model.clone())
}

/// Run the HTTP server in foreground until Ctrl-C.
pub(crate) async fn run_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting WebPilot v{}", env!("CARGO_PKG_VERSION"));

    let Components { pipeline, engine_id } = build_components(&config);
    let state = Arc::new(AppState::new(pipeline, engine_id));
    let api_config = ApiConfig::new(config.server.host.clone(), config.server.port);

    ApiServer::new(api_config, state).run(shutdown_signal()).await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => warn!("Failed to listen for shutdown signal: {}", e),
    }
}
