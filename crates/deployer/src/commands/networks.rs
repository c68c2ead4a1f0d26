//! Networks command
//!
//! Lists every network in the address tables and whether both addresses are
//! usable, so placeholder entries are caught before a deployment attempt.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;
use deploy_core::{LOCAL_NETWORKS, NetworkConfig, TableEntry};
use deploy_evm::EvmConfig;

/// List configured networks and their readiness
#[derive(Parser, Debug)]
pub struct Networks {
    /// Address tables TOML (default: $HOOK_NETWORKS_FILE or the built-in tables)
    #[arg(long)]
    pub networks_file: Option<PathBuf>,
}

impl Networks {
    pub fn execute(self) -> Result<()> {
        let mut config = EvmConfig::from_env();
        if let Some(path) = self.networks_file {
            config = config.with_networks_file(path);
        }

        let tables = config.network_tables()?;
        let source = match &config.networks_file {
            Some(path) => path.display().to_string(),
            None => "built-in tables".to_string(),
        };

        println!("{} {}", style("Networks from").bold(), style(source).cyan());
        println!();

        for line in render(&tables) {
            println!("{}", line);
        }

        println!();
        println!(
            "{} {} (deploy without verification, no table entry needed for the explorer)",
            style("Local:").dim(),
            LOCAL_NETWORKS.join(", ")
        );

        Ok(())
    }
}

fn render(tables: &NetworkConfig) -> Vec<String> {
    let networks = tables.networks();
    let width = networks.iter().map(|n| n.len()).max().unwrap_or(0);

    networks
        .into_iter()
        .map(|network| {
            let status = tables.status(network);
            let marker = if status.is_ready() {
                style("✓").green().bold()
            } else {
                style("✗").red().bold()
            };

            format!(
                "{} {:width$}  vault: {}  factory: {}",
                marker,
                network,
                entry(&status.vault),
                entry(&status.allowed_pool_factory),
                width = width
            )
        })
        .collect()
}

fn entry(entry: &TableEntry) -> String {
    match entry {
        TableEntry::Ready(address) => style(address.to_string()).to_string(),
        TableEntry::Missing => style("missing").yellow().to_string(),
        TableEntry::Unusable(_) => style("placeholder/invalid").red().to_string(),
    }
}
