//! Solidity bindings for the deployed contracts.

pub mod geomean_oracle_hook;

pub use geomean_oracle_hook::{GeomeanOracleHook, deploy_code, encode_constructor_args};
