//! Deployment record management.
//!
//! Each deployment is written to `<deployments-dir>/<network>.toml` so that a
//! failed verification can be retried later without redeploying:
//!
//! ```toml
//! network = "arbitrum"
//! chain_id = 42161
//! contract = "GeomeanOracleHook"
//! address = "0x..."
//! transaction_hash = "0x..."
//! block_number = 123456
//! vault = "0x..."
//! allowed_pool_factory = "0x..."
//! verified = false
//! deployed_at = 1760000000
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use alloy::primitives::{Address, B256};
use anyhow::{Context, Result};
use deploy_core::{CONTRACT_NAME, ConstructorArgs, PendingDeployment};
use serde::{Deserialize, Serialize};

/// Persisted summary of one deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    /// Network name (key into the address tables)
    pub network: String,

    /// Chain ID reported by the RPC node
    pub chain_id: u64,

    /// Deployed contract name
    pub contract: String,

    /// Deployed contract address
    pub address: Address,

    /// Contract-creation transaction hash
    pub transaction_hash: B256,

    /// Inclusion block
    pub block_number: u64,

    /// Constructor argument: vault
    pub vault: Address,

    /// Constructor argument: allowed pool factory
    pub allowed_pool_factory: Address,

    /// Whether explorer verification succeeded
    pub verified: bool,

    /// Unix timestamp (seconds) the record was created
    pub deployed_at: u64,
}

impl DeploymentRecord {
    /// Create a new, unverified record.
    pub fn new(
        network: impl Into<String>,
        chain_id: u64,
        deployment: &PendingDeployment,
        constructor_args: &ConstructorArgs,
    ) -> Self {
        let deployed_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();

        Self {
            network: network.into(),
            chain_id,
            contract: CONTRACT_NAME.to_string(),
            address: deployment.address,
            transaction_hash: deployment.transaction_hash,
            block_number: deployment.block_number,
            vault: constructor_args.vault,
            allowed_pool_factory: constructor_args.allowed_pool_factory,
            verified: false,
            deployed_at,
        }
    }

    /// Constructor arguments the contract was deployed with.
    pub fn constructor_args(&self) -> ConstructorArgs {
        ConstructorArgs::new(self.vault, self.allowed_pool_factory)
    }

    /// Mark verification as succeeded.
    pub fn mark_verified(&mut self) {
        self.verified = true;
    }

    /// Path of the record for `network` under `dir`.
    pub fn path(dir: &Path, network: &str) -> PathBuf {
        dir.join(format!("{}.toml", network))
    }

    /// Load the record for `network` from `dir`.
    pub fn load(dir: &Path, network: &str) -> Result<Self> {
        let path = Self::path(dir, network);
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read deployment record {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse deployment record {}", path.display()))
    }

    /// Load the record for `network`, or `None` if there isn't one.
    ///
    /// A record that exists but can't be read or parsed is an error.
    pub fn load_if_exists(dir: &Path, network: &str) -> Result<Option<Self>> {
        if !Self::path(dir, network).exists() {
            return Ok(None);
        }
        Self::load(dir, network).map(Some)
    }

    /// Write the record to `dir`, replacing any previous record for the network.
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;

        let path = Self::path(dir, &self.network);
        let content =
            toml::to_string_pretty(self).context("Failed to serialize deployment record")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write deployment record {}", path.display()))?;

        tracing::debug!(path = %path.display(), "Deployment record saved");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> DeploymentRecord {
        let deployment = PendingDeployment {
            address: Address::repeat_byte(0xaa),
            transaction_hash: B256::repeat_byte(0xbb),
            block_number: 42,
        };
        let args = ConstructorArgs::new(Address::repeat_byte(1), Address::repeat_byte(2));
        DeploymentRecord::new("sepolia", 11_155_111, &deployment, &args)
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut record = record();

        let path = record.save(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("sepolia.toml"));

        let loaded = DeploymentRecord::load(dir.path(), "sepolia").unwrap();
        assert_eq!(loaded, record);
        assert!(!loaded.verified);
        assert_eq!(loaded.contract, CONTRACT_NAME);

        record.mark_verified();
        record.save(dir.path()).unwrap();
        assert!(DeploymentRecord::load(dir.path(), "sepolia").unwrap().verified);
    }

    #[test]
    fn test_constructor_args_roundtrip() {
        let record = record();
        assert_eq!(
            record.constructor_args(),
            ConstructorArgs::new(Address::repeat_byte(1), Address::repeat_byte(2))
        );
    }

    #[test]
    fn test_load_if_exists() {
        let dir = tempfile::tempdir().unwrap();
        assert!(
            DeploymentRecord::load_if_exists(dir.path(), "sepolia")
                .unwrap()
                .is_none()
        );

        let record = record();
        record.save(dir.path()).unwrap();
        let loaded = DeploymentRecord::load_if_exists(dir.path(), "sepolia").unwrap();
        assert_eq!(loaded, Some(record));
    }

    #[test]
    fn test_load_if_exists_rejects_corrupt_record() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("sepolia.toml"), "address = 12").unwrap();

        let err = DeploymentRecord::load_if_exists(dir.path(), "sepolia").unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse deployment record"));
    }

    #[test]
    fn test_load_missing_record() {
        let dir = tempfile::tempdir().unwrap();
        let err = DeploymentRecord::load(dir.path(), "mainnet").unwrap_err();
        assert!(err.to_string().contains("mainnet.toml"));
    }
}
