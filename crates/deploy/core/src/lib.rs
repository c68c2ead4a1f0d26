//! Deployment abstraction layer for the GeomeanOracleHook contract.
//!
//! This crate holds everything that does not depend on a concrete chain client.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: DeploymentOrchestrator (resolve → deploy → confirm → verify)
//!
//! Layer 1: NetworkConfig (network → vault / allowed pool factory tables)
//!
//! Layer 0: ContractDeployer, SourceVerifier (chain infrastructure)
//! ```
//!
//! - **Layer 0** is implemented by a backend crate (e.g. `deploy-evm`) and by
//!   the in-memory mocks used in tests.
//! - **Layer 1** is a pure lookup with no side effects.
//! - **Layer 2** owns the sequencing and the local-network rule, and returns a
//!   single `Result` that the binary turns into an exit code.
//!
//! # Usage
//!
//! ```ignore
//! use deploy_core::{DeploymentOrchestrator, NetworkConfig};
//!
//! let config = NetworkConfig::embedded()?;
//! let orchestrator = DeploymentOrchestrator::new(&config, &deployer, &verifier);
//! let result = orchestrator.run("arbitrum").await?;
//! println!("deployed to {}", result.address);
//! ```

pub mod orchestrator;
pub mod resolver;
pub mod traits;
pub mod types;

#[cfg(test)]
pub mod mock;

// Re-export all traits and errors
pub use traits::{
    ConfigurationError, ContractDeployer, DeployError, DeploymentError, SourceVerifier,
    VerificationError,
};

// Re-export resolver
pub use resolver::{AddressTable, NetworkConfig, NetworkStatus, TableEntry};

// Re-export orchestrator
pub use orchestrator::{
    DeploymentOrchestrator, LOCAL_NETWORKS, VERIFICATION_CONFIRMATIONS, exit_code,
    is_local_network, verify_deployed,
};

// Re-export all types
pub use types::{
    CONTRACT_NAME, ConstructorArgs, DeploymentResult, PendingDeployment, VerificationOutcome,
    VerificationRequest,
};

#[cfg(test)]
pub use mock::{MockCall, MockChain};
