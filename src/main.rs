//! WebPilot - natural-language control of remote headless browsers.

mod cli;
mod cmd_exec;
mod server;

use clap::Parser;
use tracing::warn;

use webpilot_config::{ConfigLoader, ConfigValidator};

use crate::cli::{Cli, Commands, apply_server_overrides};
use crate::cmd_exec::{handle_check_command, handle_exec_command};
use crate::server::{init_tracing, run_server};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = ConfigLoader::load_or_default(&cli.config)?;
    if let Some(Commands::Run { host, port }) = &cli.command {
        apply_server_overrides(&mut config, host.clone(), *port);
    }

    if let Some(Commands::Check) = cli.command {
        return handle_check_command(&config, &cli.config);
    }

    init_tracing(&config.logging)?;

    let warnings = ConfigValidator::validate(&config)?.into_result()?;
    for warning in warnings {
        warn!("Config: {}", warning);
    }

    match cli.command {
        None | Some(Commands::Run { .. }) => run_server(config).await,
        Some(Commands::Exec { text, session, screenshot }) => {
            handle_exec_command(config, text, session, screenshot).await
        }
        Some(Commands::Check) => Ok(()),
    }
}
