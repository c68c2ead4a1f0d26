//! Common types for deployment and verification.

use std::fmt;

use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

/// Name of the contract this workspace deploys.
pub const CONTRACT_NAME: &str = "GeomeanOracleHook";

/// Constructor arguments of the hook contract.
///
/// Resolved once from the network tables and reused verbatim for both the
/// deployment transaction and the explorer verification request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorArgs {
    /// Balancer V3 vault the hook registers with.
    pub vault: Address,

    /// The only pool factory whose pools the hook accepts.
    pub allowed_pool_factory: Address,
}

impl ConstructorArgs {
    pub fn new(vault: Address, allowed_pool_factory: Address) -> Self {
        Self {
            vault,
            allowed_pool_factory,
        }
    }
}

impl fmt::Display for ConstructorArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "vault={}, allowed_pool_factory={}",
            self.vault, self.allowed_pool_factory
        )
    }
}

/// A deployment transaction that has been included in a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeployment {
    /// Address of the created contract.
    pub address: Address,

    /// Hash of the contract-creation transaction.
    pub transaction_hash: B256,

    /// Block in which the transaction was included.
    pub block_number: u64,
}

/// What the explorer answered to a verification request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// Source was submitted and accepted by this run.
    Verified,

    /// The explorer already had verified source for this address.
    AlreadyVerified,
}

/// Input of a single verification call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRequest {
    /// Deployed contract address.
    pub address: Address,

    /// Arguments the contract was constructed with.
    pub constructor_args: ConstructorArgs,
}

/// Final result of an orchestrated deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentResult {
    /// Network the contract was deployed to.
    pub network: String,

    /// Address of the deployed contract.
    pub address: Address,

    /// Hash of the deployment transaction.
    pub transaction_hash: B256,

    /// Block the deployment transaction was included in.
    pub block_number: u64,

    /// Constructor arguments used for the deployment.
    pub constructor_args: ConstructorArgs,

    /// `Some(true)` when verification ran and succeeded, `None` when it was
    /// skipped (local networks). A failed verification is an error, not `Some(false)`.
    pub verified: Option<bool>,
}

impl DeploymentResult {
    /// The on-chain part of the result.
    pub fn deployment(&self) -> PendingDeployment {
        PendingDeployment {
            address: self.address,
            transaction_hash: self.transaction_hash,
            block_number: self.block_number,
        }
    }
}
