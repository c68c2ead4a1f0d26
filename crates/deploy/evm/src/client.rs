//! JSON-RPC deployer.

use std::time::Duration;

use alloy::network::{EthereumWallet, ReceiptResponse, TransactionBuilder};
use alloy::primitives::{Address, B256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::transports::http::reqwest::Url;
use async_trait::async_trait;
use deploy_core::{ConstructorArgs, ContractDeployer, DeploymentError, PendingDeployment};

use crate::artifact::ContractArtifact;
use crate::config::EvmConfig;
use crate::contracts::deploy_code;
use crate::error::{EvmError, Result};

/// Confirmations of a transaction included at `inclusion` when the chain head is `head`.
///
/// The inclusion block itself is the first confirmation.
pub fn confirmations_at(head: u64, inclusion: u64) -> u64 {
    if head < inclusion {
        0
    } else {
        head - inclusion + 1
    }
}

/// Read the chain ID from `rpc_url` without a signer.
pub async fn fetch_chain_id(rpc_url: &str) -> Result<u64> {
    let url = parse_url(rpc_url)?;
    let provider = ProviderBuilder::new().connect_http(url);

    provider
        .get_chain_id()
        .await
        .map_err(|e| EvmError::Network(format!("Failed to get chain ID: {}", e)))
}

fn parse_url(rpc_url: &str) -> Result<Url> {
    rpc_url
        .parse()
        .map_err(|e| EvmError::InvalidConfig(format!("Invalid RPC URL {}: {}", rpc_url, e)))
}

/// Deploys the hook through a signing JSON-RPC provider.
pub struct EvmDeployer {
    provider: DynProvider,
    artifact: ContractArtifact,
    deployer: Address,
    chain_id: u64,
    poll_interval: Duration,
}

impl EvmDeployer {
    /// Connect to the configured node and query its chain ID.
    pub async fn new(config: &EvmConfig, artifact: ContractArtifact) -> Result<Self> {
        config.validate()?;

        let signer = config.signer()?;
        let deployer = signer.address();
        let url = parse_url(config.get_rpc_url()?)?;

        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(url)
            .erased();

        let chain_id = provider
            .get_chain_id()
            .await
            .map_err(|e| EvmError::Network(format!("Failed to get chain ID: {}", e)))?;

        tracing::info!(
            network = %config.network,
            chain_id,
            deployer = %deployer,
            "Connected to RPC node"
        );

        Ok(Self::with_provider(
            provider,
            artifact,
            deployer,
            chain_id,
            config.poll_interval,
        ))
    }

    /// Build a deployer around an existing provider.
    ///
    /// The provider must be able to send transactions from `deployer`.
    pub fn with_provider(
        provider: DynProvider,
        artifact: ContractArtifact,
        deployer: Address,
        chain_id: u64,
        poll_interval: Duration,
    ) -> Self {
        Self {
            provider,
            artifact,
            deployer,
            chain_id,
            poll_interval,
        }
    }

    /// Chain ID reported by the node.
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Address of the deploying account.
    pub fn deployer(&self) -> Address {
        self.deployer
    }

    /// Poll until the node returns a receipt for `transaction_hash`.
    async fn wait_for_receipt(
        &self,
        transaction_hash: B256,
    ) -> std::result::Result<TransactionReceipt, DeploymentError> {
        loop {
            let receipt = self
                .provider
                .get_transaction_receipt(transaction_hash)
                .await
                .map_err(|e| DeploymentError::Transport(e.to_string()))?;

            if let Some(receipt) = receipt {
                return Ok(receipt);
            }

            tracing::debug!(tx = %transaction_hash, "Waiting for inclusion");
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[async_trait]
impl ContractDeployer for EvmDeployer {
    async fn deploy(
        &self,
        args: &ConstructorArgs,
    ) -> std::result::Result<PendingDeployment, DeploymentError> {
        let code = deploy_code(&self.artifact.bytecode, args);
        let tx = TransactionRequest::default()
            .with_from(self.deployer)
            .with_deploy_code(code);

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| DeploymentError::Transport(e.to_string()))?;

        let transaction_hash = *pending.tx_hash();
        tracing::info!(tx = %transaction_hash, "Deployment transaction sent");

        let receipt = self.wait_for_receipt(transaction_hash).await?;

        if !receipt.status() {
            return Err(DeploymentError::Reverted { transaction_hash });
        }

        let address = receipt
            .contract_address
            .ok_or(DeploymentError::MissingContractAddress { transaction_hash })?;

        let block_number = match receipt.block_number {
            Some(number) => number,
            None => self
                .provider
                .get_block_number()
                .await
                .map_err(|e| DeploymentError::Transport(e.to_string()))?,
        };

        tracing::debug!(%address, block_number, gas_used = receipt.gas_used, "Deployment included");

        Ok(PendingDeployment {
            address,
            transaction_hash,
            block_number,
        })
    }

    async fn wait_for_confirmations(
        &self,
        deployment: &PendingDeployment,
        confirmations: u64,
    ) -> std::result::Result<(), DeploymentError> {
        loop {
            let head = self
                .provider
                .get_block_number()
                .await
                .map_err(|e| DeploymentError::Confirmations(e.to_string()))?;

            let current = confirmations_at(head, deployment.block_number);
            if current >= confirmations {
                tracing::debug!(head, current, "Confirmations reached");
                return Ok(());
            }

            tracing::debug!(head, current, required = confirmations, "Waiting for blocks");
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
