//! CLI command definitions for the `stackit` binary.

pub mod serve;
pub mod token;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Question-and-answer API server.
#[derive(Parser)]
#[command(name = "stackit", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to `<data dir>/config.toml`).
    #[arg(long, global = true, env = "STACKIT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Address to bind (overrides config and HOST).
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config and PORT).
        #[arg(short, long)]
        port: Option<u16>,

        /// Export spans to stdout via OpenTelemetry.
        #[arg(long)]
        otel: bool,
    },

    /// Print a bearer token signed with the configured secret.
    DevToken {
        /// User ID to place in the token.
        #[arg(long)]
        user: String,

        /// Lifetime in seconds.
        #[arg(long, default_value_t = 3600)]
        ttl_secs: i64,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::parse_from(["stackit", "-v", "serve", "--port", "9090", "--otel"]);
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Serve { host, port, otel } => {
                assert!(host.is_none());
                assert_eq!(port, Some(9090));
                assert!(otel);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_dev_token_defaults() {
        let cli = Cli::parse_from(["stackit", "dev-token", "--user", "u1"]);
        match cli.command {
            Commands::DevToken { user, ttl_secs } => {
                assert_eq!(user, "u1");
                assert_eq!(ttl_secs, 3600);
            }
            _ => panic!("expected dev-token"),
        }
    }
}
