//! Error types for EVM backend setup.

use thiserror::Error;

use crate::artifact::ArtifactError;

/// Errors that can occur while setting up the EVM backend.
///
/// Failures during deployment itself are reported through
/// `deploy_core::DeploymentError` / `VerificationError`.
#[derive(Debug, Error)]
pub enum EvmError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{0} is not set")]
    MissingEnv(String),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, EvmError>;
