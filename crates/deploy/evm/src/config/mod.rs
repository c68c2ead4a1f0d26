//! EVM configuration and deployment records.

pub mod deployment;
pub mod network;

// Re-export commonly used items
pub use deployment::DeploymentRecord;
pub use network::{DEFAULT_ETHERSCAN_API_URL, EvmConfig, LOCAL_RPC_URL};
