//! Command implementations for hook-deployer
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod deploy;
mod networks;
mod verify;

pub use deploy::Deploy;
pub use networks::Networks;
pub use verify::Verify;

use std::path::PathBuf;

use clap::Args;
use deploy_evm::EvmConfig;

/// Target selection shared by `deploy` and `verify`.
///
/// Flags override the environment, which overrides the defaults.
#[derive(Args, Debug, Default)]
pub struct NetworkArgs {
    /// Network name (default: $HOOK_NETWORK or hardhat)
    #[arg(short, long)]
    pub network: Option<String>,

    /// JSON-RPC endpoint (default: $RPC_URL_<NETWORK> or $RPC_URL)
    #[arg(long)]
    pub rpc_url: Option<String>,

    /// Address tables TOML (default: $HOOK_NETWORKS_FILE or the built-in tables)
    #[arg(long)]
    pub networks_file: Option<PathBuf>,

    /// Hardhat artifacts directory (default: $HOOK_ARTIFACTS_DIR or ./artifacts)
    #[arg(long = "artifacts")]
    pub artifacts_dir: Option<PathBuf>,

    /// Deployment records directory (default: $HOOK_DEPLOYMENTS_DIR or ./deployments)
    #[arg(long)]
    pub deployments_dir: Option<PathBuf>,
}

impl NetworkArgs {
    /// Build the configuration from the environment and apply flag overrides.
    pub fn config(&self) -> EvmConfig {
        self.apply(EvmConfig::from_env())
    }

    fn apply(&self, mut config: EvmConfig) -> EvmConfig {
        if let Some(network) = &self.network {
            config = config.with_network(network.trim());
        }
        if let Some(url) = &self.rpc_url {
            config = config.with_rpc_url(url.clone());
        }
        if let Some(path) = &self.networks_file {
            config = config.with_networks_file(path.clone());
        }
        if let Some(dir) = &self.artifacts_dir {
            config = config.with_artifacts_dir(dir.clone());
        }
        if let Some(dir) = &self.deployments_dir {
            config = config.with_deployments_dir(dir.clone());
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = NetworkArgs {
            network: Some("arbitrum".to_string()),
            rpc_url: Some("https://arb1.example.org".to_string()),
            artifacts_dir: Some(PathBuf::from("out/artifacts")),
            ..Default::default()
        };

        let config = args.apply(EvmConfig::new("hardhat"));
        assert_eq!(config.network, "arbitrum");
        assert_eq!(config.rpc_url.as_deref(), Some("https://arb1.example.org"));
        assert_eq!(config.artifacts_dir, PathBuf::from("out/artifacts"));
        assert_eq!(config.deployments_dir, PathBuf::from("deployments"));
    }

    #[test]
    fn no_flags_keep_config() {
        let config = NetworkArgs::default().apply(EvmConfig::new("localhost"));
        assert_eq!(config.network, "localhost");
        assert!(config.networks_file.is_none());
    }
}
