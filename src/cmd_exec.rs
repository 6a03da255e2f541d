//! One-shot command execution and config checking.

use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{info, warn};

use webpilot_config::{Config, ConfigValidator};
use webpilot_core::CommandOutcome;

use crate::server::{Components, build_components};

/// Open a session, run `text` on it, print the outcome and close the session.
pub(crate) async fn handle_exec_command(
    config: Config,
    text: String,
    session: Option<String>,
    screenshot: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let Components { pipeline, .. } = build_components(&config);

    let created = pipeline.create_session(session).await?;
    if let Some(url) = &created.live_view_url {
        println!("Live view: {}", url);
    }

    let outcome = pipeline.execute_command(&created.session_id, &text).await;
    pipeline.close_session(&created.session_id).await;
    let outcome = outcome?;

    if let Some(path) = &screenshot {
        write_screenshot(&outcome, path)?;
    }

    let mut printed = serde_json::to_value(&outcome)?;
    if let Some(result) = printed.get_mut("result").and_then(|r| r.as_object_mut()) {
        result.remove("screenshot");
    }
    println!("{}", serde_json::to_string_pretty(&printed)?);

    if !outcome.result.success {
        return Err(outcome
            .result
            .error
            .unwrap_or_else(|| "command failed".to_string())
            .into());
    }
    Ok(())
}

fn write_screenshot(outcome: &CommandOutcome, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    match &outcome.result.screenshot {
        Some(encoded) => {
            let bytes = STANDARD.decode(encoded)?;
            std::fs::write(path, bytes)?;
            info!(path = %path.display(), "Screenshot written");
        }
        None => warn!("No screenshot captured"),
    }
    Ok(())
}

/// Validate `config` and print every warning and error. Fails when any error is found.
pub(crate) fn handle_check_command(config: &Config, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let result = ConfigValidator::validate(config)?;

    println!("Configuration: {}", path.display());
    for warning in &result.warnings {
        println!("  warning  {}", warning);
    }
    for error in &result.errors {
        println!("  error    {}", error);
    }

    if result.is_valid() {
        println!("OK ({} warnings)", result.warnings.len());
        Ok(())
    } else {
        Err(format!("{} configuration errors", result.errors.len()).into())
    }
}
