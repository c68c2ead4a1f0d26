//! Operator-maintained address tables.

use std::fs;

use deploy_core::{ConfigurationError, is_local_network};
use deploy_evm::EvmConfig;

const TABLES: &str = r#"
[vault]
sepolia = "0xba1333333333a1ba1108e8412f11850a5c319ba9"
hardhat = "0x0000000000000000000000000000000000000001"

[allowed_pool_factory]
sepolia = "0x0000000000000000000000000000000000001234"
hardhat = "0x0000000000000000000000000000000000000002"
"#;

#[test]
fn networks_file_overrides_embedded_tables() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("networks.toml");
    fs::write(&path, TABLES).unwrap();

    let config = EvmConfig::new("sepolia").with_networks_file(path);
    let tables = config.network_tables().unwrap();

    assert_eq!(tables.networks(), vec!["hardhat", "sepolia"]);

    let args = tables.resolve("sepolia").unwrap();
    assert_eq!(
        args.vault.to_string().to_lowercase(),
        "0xba1333333333a1ba1108e8412f11850a5c319ba9"
    );
    assert_eq!(
        args.allowed_pool_factory.to_string().to_lowercase(),
        "0x0000000000000000000000000000000000001234"
    );

    assert!(is_local_network("hardhat"));
    assert!(tables.resolve("hardhat").is_ok());
}

#[test]
fn unknown_network_is_a_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("networks.toml");
    fs::write(&path, TABLES).unwrap();

    let tables = EvmConfig::new("polygon")
        .with_networks_file(path)
        .network_tables()
        .unwrap();

    let err = tables.resolve("polygon").unwrap_err();
    assert!(matches!(err, ConfigurationError::MissingAddress { .. }));
    assert_eq!(
        err.to_string(),
        "No Vault address configured for network: polygon"
    );
}

#[test]
fn malformed_networks_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("networks.toml");
    fs::write(&path, "[vault]\nsepolia = 1\n").unwrap();

    let config = EvmConfig::new("sepolia").with_networks_file(path);
    assert!(config.network_tables().is_err());
}
