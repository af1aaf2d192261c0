//! Reelscout CLI - Command-line interface
//!
//! Starts the web UI or runs one-off catalog and trending queries.

mod commands;

use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;
use reelscout_core::tracing_setup::{CliLogLevel, init_tracing};
use reelscout_core::{ReelscoutConfig, RuntimeMode};

#[derive(Parser)]
#[command(name = "reelscout")]
#[command(about = "Movie discovery with trending searches")]
#[command(version)]
struct Cli {
    /// Console log level (RUST_LOG takes precedence)
    #[arg(long, value_enum, default_value = "info", global = true)]
    log_level: CliLogLevel,

    /// Runtime mode (production or development)
    #[arg(long, default_value = "development", global = true)]
    mode: RuntimeMode,

    /// Directory for the per-run debug log
    #[arg(long, global = true)]
    logs_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_level.as_tracing_level(), cli.logs_dir.as_deref())
        .map_err(|e| anyhow!("Failed to initialize tracing: {e}"))?;

    let config = ReelscoutConfig::from_env();
    config.validate(cli.mode)?;

    commands::handle_command(cli.command, config, cli.mode).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "reelscout",
            "search",
            "dune",
            "--mode",
            "production",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.mode, RuntimeMode::Production);
        assert_eq!(cli.log_level, CliLogLevel::Debug);
        assert!(matches!(cli.command, commands::Commands::Search { ref term } if term == "dune"));
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["reelscout", "serve", "--port", "8080"]).unwrap();

        assert_eq!(cli.mode, RuntimeMode::Development);
        assert_eq!(cli.log_level, CliLogLevel::Info);
        assert!(matches!(
            cli.command,
            commands::Commands::Serve { port: Some(8080), .. }
        ));
    }

    #[test]
    fn test_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["reelscout", "--mode", "staging", "trending"]).is_err());
    }
}
