//! GeomeanOracleHook deployment tool
//!
//! Deploys the hook with the vault and allowed pool factory configured for
//! the selected network, waits for confirmations and verifies the source on
//! Etherscan. Run with: `hook-deployer <command>`

mod commands;
mod dirs;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use commands::{Deploy, Networks, Verify};
use deploy_core::exit_code;

/// GeomeanOracleHook deployment tool
#[derive(Parser)]
#[command(name = "hook-deployer")]
#[command(about = "Deploy and verify the GeomeanOracleHook", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Deploy the hook to a network and verify it
    Deploy(Deploy),

    /// Verify an already deployed hook
    Verify(Verify),

    /// List configured networks and their readiness
    Networks(Networks),
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if it exists (for RPC URLs, keys and other env vars)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = logging::init();

    let result = match cli.command {
        Command::Deploy(cmd) => cmd.execute().await,
        Command::Verify(cmd) => cmd.execute().await,
        Command::Networks(cmd) => cmd.execute(),
    };

    if let Err(e) = &result {
        tracing::error!("{:#}", e);
    }

    ExitCode::from(exit_code(&result))
}
