//! EVM backend for the GeomeanOracleHook deployer.
//!
//! This crate implements the `deploy-core` traits against a real chain:
//! - Hardhat artifact and build-info loading
//! - Constructor argument ABI encoding
//! - Contract creation and confirmation tracking over JSON-RPC (alloy)
//! - Source verification through the Etherscan API
//! - Deployment records for out-of-band verification retries
//!
//! # Architecture
//!
//! ```text
//! deploy-core (DeploymentOrchestrator)
//!        │
//!        ├──→ EvmDeployer        ──→ JSON-RPC node
//!        └──→ EtherscanVerifier  ──→ Etherscan API v2
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use deploy_core::{CONTRACT_NAME, DeploymentOrchestrator, NetworkConfig};
//! use deploy_evm::{ContractArtifact, EtherscanVerifier, EvmConfig, EvmDeployer};
//!
//! let config = EvmConfig::from_env();
//! let tables = NetworkConfig::embedded()?;
//! let artifact = ContractArtifact::load(&config.artifacts_dir, CONTRACT_NAME)?;
//!
//! let deployer = EvmDeployer::new(&config, artifact.clone()).await?;
//! let verifier = EtherscanVerifier::from_artifact(&config, deployer.chain_id(), &artifact);
//!
//! let result = DeploymentOrchestrator::new(&tables, &deployer, &verifier)
//!     .run(&config.network)
//!     .await?;
//! ```

pub mod artifact;
pub mod client;
pub mod config;
pub mod contracts;
pub mod error;
pub mod etherscan;

pub use artifact::{ArtifactError, BuildInfo, ContractArtifact};
pub use client::{EvmDeployer, confirmations_at, fetch_chain_id};
pub use config::{DeploymentRecord, EvmConfig};
pub use error::{EvmError, Result};
pub use etherscan::{EtherscanVerifier, VerificationSource};
