//! Etherscan source verification.
//!
//! Verification submits the Solidity standard-JSON input the contract was
//! compiled from, then polls until the explorer reports a result:
//!
//! 1. `verifysourcecode` (POST) → GUID
//! 2. `checkverifystatus` (GET) until verified or failed
//!
//! A freshly deployed contract may not be indexed yet, in which case the
//! submission is retried a bounded number of times.
//!
//! ## Modules
//!
//! - [`client`]: verifier implementing `deploy_core::SourceVerifier`
//! - [`types`]: response envelope and status classification

pub mod client;
pub mod types;

pub use client::{EtherscanVerifier, VerificationSource};
pub use types::{CheckStatus, EtherscanResponse, SubmitStatus};
