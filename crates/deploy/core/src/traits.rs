//! Deployment abstraction traits.
//!
//! This module defines the infrastructure seams the orchestrator drives:
//! - ContractDeployer: contract creation and confirmation tracking
//! - SourceVerifier: block-explorer source verification

use alloy_primitives::{Address, B256};
use async_trait::async_trait;

use crate::resolver::AddressTable;
use crate::types::{ConstructorArgs, PendingDeployment, VerificationOutcome, VerificationRequest};

// ============================================================================
// Error Types
// ============================================================================

/// Network configuration errors.
///
/// Always raised before any on-chain interaction.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Network name must not be empty")]
    EmptyNetwork,

    #[error("No {table} address configured for network: {network}")]
    MissingAddress { table: AddressTable, network: String },

    #[error("Placeholder {table} address {value:?} for network {network}; configure a real address")]
    PlaceholderAddress {
        table: AddressTable,
        network: String,
        value: String,
    },

    #[error("Invalid {table} address {value:?} for network {network}: {reason}")]
    InvalidAddress {
        table: AddressTable,
        network: String,
        value: String,
        reason: String,
    },

    #[error("Invalid network tables: {0}")]
    InvalidTables(String),

    #[error("Network {0} is a local network and has no block explorer")]
    LocalNetwork(String),
}

/// Contract deployment errors.
#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error("Contract artifact error: {0}")]
    Artifact(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Deployment transaction {transaction_hash} reverted")]
    Reverted { transaction_hash: B256 },

    #[error("Receipt of deployment transaction {transaction_hash} has no contract address")]
    MissingContractAddress { transaction_hash: B256 },

    #[error("Failed waiting for confirmations: {0}")]
    Confirmations(String),
}

/// Source verification errors.
///
/// The contract stays deployed when verification fails; retry out-of-band.
#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("Explorer API key is not configured")]
    MissingApiKey,

    #[error("Explorer request failed: {0}")]
    Transport(String),

    #[error("Explorer rejected verification: {0}")]
    Rejected(String),

    #[error("Verification still pending after {attempts} status checks")]
    Timeout { attempts: u32 },

    #[error("Source metadata unavailable: {0}")]
    Source(String),
}

/// Top-level error returned by the orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Deployment(#[from] DeploymentError),

    #[error("Contract deployed at {} but confirmations failed", .deployment.address)]
    Unconfirmed {
        deployment: PendingDeployment,
        #[source]
        source: DeploymentError,
    },

    #[error("Verification of contract deployed at {address} failed")]
    Verification {
        address: Address,
        /// Present when the contract was deployed by this run.
        deployment: Option<PendingDeployment>,
        #[source]
        source: VerificationError,
    },
}

impl DeployError {
    /// The contract deployed by this run, if the failure happened after inclusion.
    pub fn deployment(&self) -> Option<&PendingDeployment> {
        match self {
            DeployError::Unconfirmed { deployment, .. } => Some(deployment),
            DeployError::Verification { deployment, .. } => deployment.as_ref(),
            _ => None,
        }
    }

    /// Address of the deployed contract, if the failure happened after deployment.
    pub fn deployed_address(&self) -> Option<Address> {
        match self {
            DeployError::Unconfirmed { deployment, .. } => Some(deployment.address),
            DeployError::Verification { address, .. } => Some(*address),
            _ => None,
        }
    }
}

// ============================================================================
// Infrastructure Traits
// ============================================================================

/// Contract creation on a concrete chain.
#[async_trait]
pub trait ContractDeployer: Send + Sync {
    /// Send the contract-creation transaction and wait for its inclusion.
    async fn deploy(&self, args: &ConstructorArgs) -> Result<PendingDeployment, DeploymentError>;

    /// Wait until the deployment has at least `confirmations` confirmations.
    ///
    /// The inclusion block counts as the first confirmation.
    async fn wait_for_confirmations(
        &self,
        deployment: &PendingDeployment,
        confirmations: u64,
    ) -> Result<(), DeploymentError>;
}

/// Block-explorer source verification.
#[async_trait]
pub trait SourceVerifier: Send + Sync {
    /// Verify the source of a deployed contract.
    async fn verify(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationOutcome, VerificationError>;

    /// Human-readable explorer name for logs (e.g., "Etherscan").
    fn explorer(&self) -> &str;
}
