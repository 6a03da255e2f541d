//! CLI definitions for WebPilot.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use webpilot_config::Config;

/// WebPilot CLI.
#[derive(Parser)]
#[command(name = "webpilot")]
#[command(about = "Drive remote headless browsers with natural language")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the HTTP server in foreground (default)
    Run {
        /// Server host, overrides `server.host`
        #[arg(long)]
        host: Option<String>,

        /// Server port, overrides `server.port`
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run one instruction in a fresh browser session and print the result
    Exec {
        /// Instruction in plain language, e.g. "go to example.com and read the heading"
        text: String,

        /// Session id to use instead of a generated one
        #[arg(long)]
        session: Option<String>,

        /// Write the captured PNG screenshot to this path
        #[arg(long)]
        screenshot: Option<PathBuf>,
    },

    /// Validate the configuration and report problems
    Check,
}

/// Apply `run --host/--port` on top of the loaded configuration.
pub(crate) fn apply_server_overrides(config: &mut Config, host: Option<String>, port: Option<u16>) {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use webpilot_config::ConfigValidator;

    #[test]
    fn test_defaults_to_no_subcommand() {
        let cli = Cli::try_parse_from(["webpilot"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from("config/default.toml"));
    }

    #[test]
    fn test_run_overrides() {
        let cli = Cli::try_parse_from(["webpilot", "run", "--port", "9000"]).unwrap();
        match cli.command {
            Some(Commands::Run { host, port }) => {
                assert!(host.is_none());
                assert_eq!(port, Some(9000));
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_exec_with_global_config() {
        let cli = Cli::try_parse_from([
            "webpilot",
            "exec",
            "go to example.com",
            "--screenshot",
            "out.png",
            "-c",
            "other.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("other.toml"));
        match cli.command {
            Some(Commands::Exec { text, session, screenshot }) => {
                assert_eq!(text, "go to example.com");
                assert!(session.is_none());
                assert_eq!(screenshot, Some(PathBuf::from("out.png")));
            }
            _ => panic!("expected exec"),
        }
    }

    #[test]
    fn test_exec_requires_text() {
        assert!(Cli::try_parse_from(["webpilot", "exec"]).is_err());
    }

    #[test]
    fn test_server_overrides_replace_file_values() {
        let mut config = Config::default();
        apply_server_overrides(&mut config, Some("0.0.0.0".to_string()), None);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_overridden_port_is_validated() {
        let cli = Cli::try_parse_from(["webpilot", "run", "--port", "0"]).unwrap();
        let mut config = Config::default();
        if let Some(Commands::Run { host, port }) = cli.command {
            apply_server_overrides(&mut config, host, port);
        }

        let result = ConfigValidator::validate(&config).unwrap();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.path == "server.port"));
    }
}
