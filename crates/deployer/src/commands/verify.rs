//! Verify command
//!
//! Retries source verification for a hook that is already deployed, e.g.
//! when verification failed or the explorer was down during `deploy`.

use alloy_primitives::Address;
use anyhow::{Context, Result};
use clap::Parser;
use deploy_core::{CONTRACT_NAME, ConfigurationError, ConstructorArgs, verify_deployed};
use deploy_evm::{ContractArtifact, DeploymentRecord, EtherscanVerifier, fetch_chain_id};

use super::NetworkArgs;

/// Verify an already deployed hook
#[derive(Parser, Debug)]
pub struct Verify {
    /// Deployed hook address (default: address from the network's deployment record)
    #[arg(long)]
    pub address: Option<Address>,

    #[command(flatten)]
    pub target: NetworkArgs,
}

impl Verify {
    pub async fn execute(self) -> Result<()> {
        let config = self.target.config();

        if config.is_local() {
            return Err(ConfigurationError::LocalNetwork(config.network.clone()).into());
        }

        let tables = config.network_tables()?;

        let mut record =
            DeploymentRecord::load_if_exists(&config.deployments_dir, &config.network)?;
        let (address, recorded_args) =
            select_target(self.address, record.as_ref()).ok_or_else(|| {
                anyhow::anyhow!(
                    "No --address given and no deployment record for {} in {}",
                    config.network,
                    config.deployments_dir.display()
                )
            })?;

        let chain_id = fetch_chain_id(config.get_rpc_url()?).await?;

        let artifact = ContractArtifact::load(&config.artifacts_dir, CONTRACT_NAME)
            .context("Failed to load contract artifact")?;
        let verifier = EtherscanVerifier::from_artifact(&config, chain_id, &artifact);

        verify_deployed(&tables, &verifier, &config.network, address, recorded_args).await?;

        if let Some(record) = record.as_mut().filter(|r| r.address == address) {
            record.mark_verified();
            record
                .save(&config.deployments_dir)
                .context("Failed to update deployment record")?;
        }

        Ok(())
    }
}

/// Address to verify and, when the record describes that address, the
/// arguments it was deployed with.
///
/// An explicit `--address` wins over the record; a record for a different
/// address says nothing about the flagged contract's arguments.
fn select_target(
    flag: Option<Address>,
    record: Option<&DeploymentRecord>,
) -> Option<(Address, Option<ConstructorArgs>)> {
    let address = flag.or(record.map(|r| r.address))?;
    let recorded_args = record
        .filter(|r| r.address == address)
        .map(DeploymentRecord::constructor_args);
    Some((address, recorded_args))
}
