//! Deployment orchestration.
//!
//! Sequences a single deployment:
//!
//! ```text
//! resolve addresses ──→ deploy (await inclusion) ──→ log address
//!                                                     │
//!                         local network? ── yes ──→ done
//!                                │
//!                                no
//!                                ↓
//!                    wait 5 confirmations ──→ verify ──→ done
//! ```
//!
//! Nothing is retried and nothing is rolled back. The caller turns the
//! returned `Result` into a process exit code with [`exit_code`].

use alloy_primitives::Address;

use crate::resolver::NetworkConfig;
use crate::traits::{ConfigurationError, ContractDeployer, DeployError, SourceVerifier};
use crate::types::{
    CONTRACT_NAME, ConstructorArgs, DeploymentResult, PendingDeployment, VerificationOutcome,
    VerificationRequest,
};

/// Networks without a block explorer; verification is skipped on these.
pub const LOCAL_NETWORKS: [&str; 2] = ["hardhat", "localhost"];

/// Confirmations to wait for before submitting source to the explorer.
pub const VERIFICATION_CONFIRMATIONS: u64 = 5;

/// Whether `network` is a local development network.
pub fn is_local_network(network: &str) -> bool {
    LOCAL_NETWORKS.contains(&network)
}

/// Process exit code for a result: 0 on success, 1 on any error.
pub fn exit_code<T, E>(result: &Result<T, E>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

/// Drives resolve → deploy → confirm → verify for one network.
pub struct DeploymentOrchestrator<'a, D: ?Sized, V: ?Sized> {
    config: &'a NetworkConfig,
    deployer: &'a D,
    verifier: &'a V,
}

impl<'a, D, V> DeploymentOrchestrator<'a, D, V>
where
    D: ContractDeployer + ?Sized,
    V: SourceVerifier + ?Sized,
{
    pub fn new(config: &'a NetworkConfig, deployer: &'a D, verifier: &'a V) -> Self {
        Self {
            config,
            deployer,
            verifier,
        }
    }

    /// Deploy the hook to `network`, verifying it unless the network is local.
    ///
    /// # Errors
    ///
    /// - [`DeployError::Configuration`] if either address is not configured;
    ///   the deployer is never called in that case.
    /// - [`DeployError::Deployment`] if the transaction fails or is not included.
    /// - [`DeployError::Unconfirmed`] / [`DeployError::Verification`] if the
    ///   contract was deployed but a later step failed.
    pub async fn run(&self, network: &str) -> Result<DeploymentResult, DeployError> {
        tracing::info!("Deploying {} to {}...", CONTRACT_NAME, network);

        let constructor_args = self.config.resolve(network)?;
        tracing::info!("Constructor arguments: {}", constructor_args);

        let deployment = self.deployer.deploy(&constructor_args).await?;

        tracing::info!(
            tx = %deployment.transaction_hash,
            block = deployment.block_number,
            "{} deployed to: {}",
            CONTRACT_NAME,
            deployment.address
        );

        let verified = if is_local_network(network) {
            tracing::debug!(network, "Local network, skipping verification");
            None
        } else {
            self.confirm_and_verify(&deployment, constructor_args).await?;
            Some(true)
        };

        Ok(DeploymentResult {
            network: network.to_string(),
            address: deployment.address,
            transaction_hash: deployment.transaction_hash,
            block_number: deployment.block_number,
            constructor_args,
            verified,
        })
    }

    /// Verify an already deployed hook. See [`verify_deployed`].
    pub async fn verify_existing(
        &self,
        network: &str,
        address: Address,
        recorded_args: Option<ConstructorArgs>,
    ) -> Result<VerificationOutcome, DeployError> {
        verify_deployed(self.config, self.verifier, network, address, recorded_args).await
    }

    async fn confirm_and_verify(
        &self,
        deployment: &PendingDeployment,
        constructor_args: ConstructorArgs,
    ) -> Result<VerificationOutcome, DeployError> {
        tracing::info!("Waiting for block confirmations...");

        self.deployer
            .wait_for_confirmations(deployment, VERIFICATION_CONFIRMATIONS)
            .await
            .map_err(|source| DeployError::Unconfirmed {
                deployment: deployment.clone(),
                source,
            })?;

        tracing::info!("Verifying contract on {}...", self.verifier.explorer());

        let request = VerificationRequest {
            address: deployment.address,
            constructor_args,
        };

        let outcome = self
            .verifier
            .verify(&request)
            .await
            .map_err(|source| DeployError::Verification {
                address: deployment.address,
                deployment: Some(deployment.clone()),
                source,
            })?;

        log_outcome(outcome, self.verifier.explorer());
        Ok(outcome)
    }
}

/// Verify an already deployed hook, e.g. after a failed verification.
///
/// `recorded_args` are the arguments the contract was actually deployed with
/// (from its deployment record). When present they are submitted as-is, even
/// if the tables have changed since; otherwise the tables are resolved.
/// Local networks are refused.
pub async fn verify_deployed<V>(
    config: &NetworkConfig,
    verifier: &V,
    network: &str,
    address: Address,
    recorded_args: Option<ConstructorArgs>,
) -> Result<VerificationOutcome, DeployError>
where
    V: SourceVerifier + ?Sized,
{
    if is_local_network(network) {
        return Err(ConfigurationError::LocalNetwork(network.to_string()).into());
    }

    let constructor_args = match recorded_args {
        Some(recorded) => {
            if let Ok(current) = config.resolve(network)
                && current != recorded
            {
                tracing::warn!(
                    "Address tables for {} changed since deployment ({} now, {} deployed); \
                     verifying with the deployed arguments",
                    network,
                    current,
                    recorded
                );
            }
            recorded
        }
        None => config.resolve(network)?,
    };
    let request = VerificationRequest {
        address,
        constructor_args,
    };

    tracing::info!("Verifying contract at {} on {}...", address, verifier.explorer());

    let outcome = verifier
        .verify(&request)
        .await
        .map_err(|source| DeployError::Verification {
            address,
            deployment: None,
            source,
        })?;

    log_outcome(outcome, verifier.explorer());
    Ok(outcome)
}

fn log_outcome(outcome: VerificationOutcome, explorer: &str) {
    match outcome {
        VerificationOutcome::Verified => tracing::info!("Contract verified on {}", explorer),
        VerificationOutcome::AlreadyVerified => {
            tracing::info!("Contract was already verified on {}", explorer)
        }
    }
}
