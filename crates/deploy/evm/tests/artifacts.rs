//! Hardhat artifact layout tests.

use std::fs;
use std::path::Path;

use deploy_evm::{ArtifactError, ContractArtifact, VerificationSource};

const SOURCE: &str = "contracts/GeomeanOracleHook.sol";
const NAME: &str = "GeomeanOracleHook";

fn write_project(root: &Path, bytecode: &str) {
    let contract_dir = root.join(SOURCE);
    let build_info_dir = root.join("build-info");
    fs::create_dir_all(&contract_dir).unwrap();
    fs::create_dir_all(&build_info_dir).unwrap();

    let artifact = serde_json::json!({
        "_format": "hh-sol-artifact-1",
        "contractName": NAME,
        "sourceName": SOURCE,
        "abi": [],
        "bytecode": bytecode,
        "deployedBytecode": "0x",
        "linkReferences": {},
        "deployedLinkReferences": {}
    });
    fs::write(
        contract_dir.join(format!("{}.json", NAME)),
        artifact.to_string(),
    )
    .unwrap();

    let debug = serde_json::json!({
        "_format": "hh-sol-dbg-1",
        "buildInfo": "../../build-info/abc123.json"
    });
    fs::write(
        contract_dir.join(format!("{}.dbg.json", NAME)),
        debug.to_string(),
    )
    .unwrap();

    let build_info = serde_json::json!({
        "_format": "hh-sol-build-info-1",
        "id": "abc123",
        "solcVersion": "0.8.24",
        "solcLongVersion": "0.8.24+commit.e11b9ed9",
        "input": {
            "language": "Solidity",
            "sources": { SOURCE: { "content": "contract GeomeanOracleHook {}" } },
            "settings": { "optimizer": { "enabled": true, "runs": 200 } }
        },
        "output": {}
    });
    fs::write(build_info_dir.join("abc123.json"), build_info.to_string()).unwrap();
}

#[test]
fn loads_artifact_and_build_info() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path(), "0x60806040");

    let artifact = ContractArtifact::load(dir.path(), NAME).unwrap();
    assert_eq!(artifact.contract_name, NAME);
    assert_eq!(artifact.bytecode, vec![0x60, 0x80, 0x60, 0x40]);
    assert_eq!(
        artifact.fully_qualified_name(),
        "contracts/GeomeanOracleHook.sol:GeomeanOracleHook"
    );

    let source = VerificationSource::from_artifact(&artifact).unwrap();
    assert_eq!(source.compiler_version, "v0.8.24+commit.e11b9ed9");
    assert_eq!(source.contract_name, artifact.fully_qualified_name());

    let input: serde_json::Value = serde_json::from_str(&source.standard_json_input).unwrap();
    assert_eq!(input["language"], "Solidity");
}

#[test]
fn missing_artifact_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = ContractArtifact::load(dir.path(), NAME).unwrap_err();
    assert!(matches!(err, ArtifactError::NotFound { .. }));
}

#[test]
fn duplicate_artifacts_are_ambiguous() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path(), "0x6080");
    write_project(&dir.path().join("nested"), "0x6080");

    let err = ContractArtifact::load(dir.path(), NAME).unwrap_err();
    match err {
        ArtifactError::Ambiguous { paths, .. } => assert_eq!(paths.len(), 2),
        other => panic!("expected ambiguity, got {:?}", other),
    }
}

#[test]
fn missing_build_info_only_affects_verification() {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path(), "0x6080");
    fs::remove_dir_all(dir.path().join("build-info")).unwrap();

    let artifact = ContractArtifact::load(dir.path(), NAME).unwrap();
    assert!(matches!(
        VerificationSource::from_artifact(&artifact),
        Err(ArtifactError::Io { .. })
    ));
}
