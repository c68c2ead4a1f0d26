//! EVM network configuration.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use alloy::signers::local::PrivateKeySigner;
use deploy_core::{NetworkConfig, is_local_network};

use crate::error::{EvmError, Result};

/// RPC endpoint used for `hardhat` / `localhost` when none is configured.
pub const LOCAL_RPC_URL: &str = "http://127.0.0.1:8545";

/// Etherscan multichain API endpoint.
pub const DEFAULT_ETHERSCAN_API_URL: &str = "https://api.etherscan.io/v2/api";

const DEFAULT_NETWORK: &str = "hardhat";
const DEFAULT_POLL_INTERVAL_MS: u64 = 4_000;

/// Deployment target configuration.
#[derive(Clone)]
pub struct EvmConfig {
    /// Active network name (key into the address tables)
    pub network: String,

    /// JSON-RPC endpoint (local default applies to local networks)
    pub rpc_url: Option<String>,

    /// Hex-encoded deployer private key
    pub private_key: Option<String>,

    /// Etherscan API key (only needed when verification runs)
    pub etherscan_api_key: Option<String>,

    /// Etherscan API endpoint
    pub etherscan_api_url: String,

    /// Operator-maintained address tables (overrides the embedded ones)
    pub networks_file: Option<PathBuf>,

    /// Hardhat `artifacts` directory
    pub artifacts_dir: PathBuf,

    /// Directory for deployment records
    pub deployments_dir: PathBuf,

    /// Interval between confirmation and verification status polls
    pub poll_interval: Duration,
}

impl EvmConfig {
    /// Create a configuration for `network` with defaults everywhere else.
    pub fn new(network: impl Into<String>) -> Self {
        Self {
            network: network.into(),
            rpc_url: None,
            private_key: None,
            etherscan_api_key: None,
            etherscan_api_url: DEFAULT_ETHERSCAN_API_URL.to_string(),
            networks_file: None,
            artifacts_dir: PathBuf::from("artifacts"),
            deployments_dir: PathBuf::from("deployments"),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `HOOK_NETWORK` - Active network name (default: hardhat)
    /// - `RPC_URL_<NETWORK>` / `RPC_URL` - JSON-RPC endpoint
    /// - `DEPLOYER_PRIVATE_KEY` - Deployer private key (hex)
    /// - `ETHERSCAN_API_KEY` - Etherscan API key
    /// - `ETHERSCAN_API_URL` - Etherscan API endpoint (default: v2 multichain API)
    /// - `HOOK_NETWORKS_FILE` - Address tables TOML (default: embedded tables)
    /// - `HOOK_ARTIFACTS_DIR` - Hardhat artifacts directory (default: artifacts)
    /// - `HOOK_DEPLOYMENTS_DIR` - Deployment records directory (default: deployments)
    /// - `HOOK_POLL_INTERVAL_MS` - Poll interval in milliseconds (default: 4000)
    pub fn from_env() -> Self {
        let network = env::var("HOOK_NETWORK").unwrap_or_else(|_| DEFAULT_NETWORK.to_string());
        let mut config = Self::new(network);

        config.rpc_url = Self::rpc_url_from_env(&config.network);
        config.private_key = env::var("DEPLOYER_PRIVATE_KEY").ok();
        config.etherscan_api_key = env::var("ETHERSCAN_API_KEY").ok();

        if let Ok(url) = env::var("ETHERSCAN_API_URL") {
            config.etherscan_api_url = url;
        }

        config.networks_file = env::var("HOOK_NETWORKS_FILE").ok().map(PathBuf::from);

        if let Ok(dir) = env::var("HOOK_ARTIFACTS_DIR") {
            config.artifacts_dir = PathBuf::from(dir);
        }

        if let Ok(dir) = env::var("HOOK_DEPLOYMENTS_DIR") {
            config.deployments_dir = PathBuf::from(dir);
        }

        if let Some(ms) = read_env::<u64>("HOOK_POLL_INTERVAL_MS") {
            config.poll_interval = Duration::from_millis(ms.max(1));
        }

        config
    }

    /// Name of the per-network RPC variable, e.g. `RPC_URL_ARBITRUM_SEPOLIA`.
    pub fn rpc_env_name(network: &str) -> String {
        let suffix: String = network
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        format!("RPC_URL_{}", suffix)
    }

    fn rpc_url_from_env(network: &str) -> Option<String> {
        env::var(Self::rpc_env_name(network))
            .or_else(|_| env::var("RPC_URL"))
            .ok()
    }

    /// Switch network, re-reading the network-specific RPC variable.
    pub fn with_network(mut self, network: impl Into<String>) -> Self {
        self.network = network.into();
        self.rpc_url = Self::rpc_url_from_env(&self.network);
        self
    }

    /// Set custom RPC URL.
    pub fn with_rpc_url(mut self, url: String) -> Self {
        self.rpc_url = Some(url);
        self
    }

    /// Set address tables file.
    pub fn with_networks_file(mut self, path: PathBuf) -> Self {
        self.networks_file = Some(path);
        self
    }

    /// Set artifacts directory.
    pub fn with_artifacts_dir(mut self, dir: PathBuf) -> Self {
        self.artifacts_dir = dir;
        self
    }

    /// Set deployment records directory.
    pub fn with_deployments_dir(mut self, dir: PathBuf) -> Self {
        self.deployments_dir = dir;
        self
    }

    /// Set poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Whether the active network is a local development network.
    pub fn is_local(&self) -> bool {
        is_local_network(&self.network)
    }

    /// Get the RPC URL (custom, or the local default for local networks).
    pub fn get_rpc_url(&self) -> Result<&str> {
        match self.rpc_url.as_deref() {
            Some(url) => Ok(url),
            None if self.is_local() => Ok(LOCAL_RPC_URL),
            None => Err(EvmError::MissingEnv(format!(
                "{} (or RPC_URL)",
                Self::rpc_env_name(&self.network)
            ))),
        }
    }

    /// Parse the deployer signer from the configured private key.
    pub fn signer(&self) -> Result<PrivateKeySigner> {
        let key = self
            .private_key
            .as_deref()
            .ok_or_else(|| EvmError::MissingEnv("DEPLOYER_PRIVATE_KEY".to_string()))?;

        key.trim()
            .parse::<PrivateKeySigner>()
            .map_err(|e| EvmError::InvalidPrivateKey(e.to_string()))
    }

    /// Load the address tables: the operator file if configured, else the embedded ones.
    pub fn network_tables(&self) -> Result<NetworkConfig> {
        let tables = match &self.networks_file {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    EvmError::InvalidConfig(format!(
                        "Failed to read networks file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                NetworkConfig::from_toml_str(&content)
            }
            None => NetworkConfig::embedded(),
        };

        tables.map_err(|e| EvmError::InvalidConfig(e.to_string()))
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        if self.network.trim().is_empty() {
            return Err(EvmError::InvalidConfig(
                "Network name cannot be empty".to_string(),
            ));
        }

        let url = self.get_rpc_url()?;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(EvmError::InvalidConfig(format!(
                "Invalid RPC URL format: {}",
                url
            )));
        }

        if self.poll_interval.is_zero() {
            return Err(EvmError::InvalidConfig(
                "Poll interval must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl std::fmt::Debug for EvmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Secrets are never printed.
        f.debug_struct("EvmConfig")
            .field("network", &self.network)
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field(
                "etherscan_api_key",
                &self.etherscan_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("etherscan_api_url", &self.etherscan_api_url)
            .field("networks_file", &self.networks_file)
            .field("artifacts_dir", &self.artifacts_dir)
            .field("deployments_dir", &self.deployments_dir)
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}

impl Default for EvmConfig {
    fn default() -> Self {
        Self::new(DEFAULT_NETWORK)
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
