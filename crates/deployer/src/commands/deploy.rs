//! Deploy command
//!
//! Resolves the constructor arguments for the selected network, deploys the
//! hook, and on public networks waits for confirmations and verifies it.
//! A deployment record is written whenever a contract ends up on chain.

use std::result::Result as StdResult;

use anyhow::{Context, Result};
use clap::Parser;
use deploy_core::{
    CONTRACT_NAME, ConstructorArgs, DeployError, DeploymentOrchestrator, DeploymentResult,
};
use deploy_evm::{ContractArtifact, DeploymentRecord, EtherscanVerifier, EvmConfig, EvmDeployer};

use super::NetworkArgs;

/// Deploy the hook to a network and verify it
#[derive(Parser, Debug)]
pub struct Deploy {
    #[command(flatten)]
    pub target: NetworkArgs,
}

impl Deploy {
    pub async fn execute(self) -> Result<()> {
        let config = self.target.config();
        tracing::debug!(?config, "Resolved configuration");

        let tables = config.network_tables()?;

        // Unconfigured networks fail here, before connecting or signing anything.
        let constructor_args = tables.resolve(&config.network)?;

        if !config.is_local() && config.etherscan_api_key.is_none() {
            tracing::warn!("ETHERSCAN_API_KEY is not set; verification will fail after deployment");
        }

        let artifact = ContractArtifact::load(&config.artifacts_dir, CONTRACT_NAME)
            .context("Failed to load contract artifact")?;

        let deployer = EvmDeployer::new(&config, artifact.clone()).await?;
        let verifier = EtherscanVerifier::from_artifact(&config, deployer.chain_id(), &artifact);

        let orchestrator = DeploymentOrchestrator::new(&tables, &deployer, &verifier);

        let result = orchestrator.run(&config.network).await;

        if let Some(record) = record_for(
            &config.network,
            deployer.chain_id(),
            &constructor_args,
            &result,
        ) {
            save_record(&config, &record);
            if !record.verified && !config.is_local() {
                tracing::warn!(
                    "Contract remains deployed at {}; retry with `hook-deployer verify --network {}`",
                    record.address,
                    config.network
                );
            }
        }

        result.map(|_| ()).map_err(Into::into)
    }
}

/// Record to write for a run, if a contract ended up on chain.
///
/// Failures after inclusion still produce an unverified record so the
/// `verify` command can retry with the deployed arguments.
fn record_for(
    network: &str,
    chain_id: u64,
    constructor_args: &ConstructorArgs,
    result: &StdResult<DeploymentResult, DeployError>,
) -> Option<DeploymentRecord> {
    match result {
        Ok(result) => {
            let mut record = DeploymentRecord::new(
                &result.network,
                chain_id,
                &result.deployment(),
                &result.constructor_args,
            );
            if result.verified == Some(true) {
                record.mark_verified();
            }
            Some(record)
        }
        Err(err) => {
            let deployment = err.deployment()?;
            Some(DeploymentRecord::new(
                network,
                chain_id,
                deployment,
                constructor_args,
            ))
        }
    }
}

/// The record is a convenience; failing to write it doesn't fail the run.
fn save_record(config: &EvmConfig, record: &DeploymentRecord) {
    match record.save(&config.deployments_dir) {
        Ok(path) => tracing::info!("Deployment record written to {}", path.display()),
        Err(e) => tracing::warn!("Failed to write deployment record: {:#}", e),
    }
}
