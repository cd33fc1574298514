//! StackIt CLI and REST API entry point.
//!
//! Binary name: `stackit`
//!
//! Parses CLI arguments, sets up tracing, loads configuration, then runs
//! the requested command.

mod cli;
mod http;
mod state;

use clap::Parser;
use clap_complete::generate;

use stackit_infra::config::load_server_config;
use stackit_observe::tracing_setup::{filter_for_verbosity, init_tracing, shutdown_tracing};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need config or logging
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "stackit", &mut std::io::stdout());
        return Ok(());
    }

    let otel = matches!(cli.command, Commands::Serve { otel: true, .. });
    init_tracing(filter_for_verbosity(cli.verbose, cli.quiet), otel)
        .map_err(|e| anyhow::anyhow!(e))?;

    let mut config = load_server_config(cli.config.as_deref()).await;

    let result = match cli.command {
        Commands::Serve { host, port, .. } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            cli::serve::serve(config).await
        }
        Commands::DevToken { user, ttl_secs } => {
            cli::token::print_dev_token(&config, &user, ttl_secs)
        }
        Commands::Completions { .. } => Ok(()),
    };

    shutdown_tracing();
    result
}
