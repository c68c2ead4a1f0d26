//! Hardhat compilation artifacts.
//!
//! Hardhat writes, for every contract:
//!
//! ```text
//! artifacts/
//!   contracts/GeomeanOracleHook.sol/
//!     GeomeanOracleHook.json       ← bytecode, sourceName, contractName
//!     GeomeanOracleHook.dbg.json   ← { "buildInfo": "../../build-info/<id>.json" }
//!   build-info/<id>.json           ← solcLongVersion, standard-JSON input
//! ```
//!
//! Deployment needs the creation bytecode; verification needs the build-info.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors raised while reading artifacts.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("No artifact for {name} under {dir}; compile the contracts first")]
    NotFound { name: String, dir: PathBuf },

    #[error("Multiple artifacts named {name}: {paths:?}")]
    Ambiguous { name: String, paths: Vec<PathBuf> },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Bytecode of {0} is empty (abstract contract or interface?)")]
    EmptyBytecode(String),

    #[error("Bytecode of {name} has unlinked libraries: {libraries:?}")]
    Unlinked { name: String, libraries: Vec<String> },

    #[error("Invalid bytecode hex: {0}")]
    InvalidBytecode(String),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    contract_name: String,
    source_name: String,
    bytecode: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DebugFile {
    build_info: String,
}

/// Compiled contract as needed for deployment.
#[derive(Debug, Clone)]
pub struct ContractArtifact {
    /// Contract name (e.g., "GeomeanOracleHook")
    pub contract_name: String,

    /// Source path inside the project (e.g., "contracts/GeomeanOracleHook.sol")
    pub source_name: String,

    /// Creation bytecode without constructor arguments
    pub bytecode: Vec<u8>,

    /// Path of the artifact JSON this was loaded from
    pub path: PathBuf,
}

impl ContractArtifact {
    /// Find and load the artifact for `contract_name` under `artifacts_dir`.
    pub fn load(artifacts_dir: &Path, contract_name: &str) -> Result<Self, ArtifactError> {
        let path = find_artifact(artifacts_dir, contract_name)?;
        Self::from_file(&path)
    }

    /// Load an artifact from an explicit path.
    pub fn from_file(path: &Path) -> Result<Self, ArtifactError> {
        let raw: RawArtifact = read_json(path)?;
        let bytecode = decode_bytecode(&raw.contract_name, &raw.bytecode)?;

        tracing::debug!(
            contract = %raw.contract_name,
            source = %raw.source_name,
            bytes = bytecode.len(),
            "Loaded contract artifact"
        );

        Ok(Self {
            contract_name: raw.contract_name,
            source_name: raw.source_name,
            bytecode,
            path: path.to_path_buf(),
        })
    }

    /// `<sourceName>:<contractName>`, the form Etherscan expects.
    pub fn fully_qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }

    /// Path of the `.dbg.json` file next to the artifact.
    pub fn debug_path(&self) -> PathBuf {
        self.path.with_file_name(format!("{}.dbg.json", self.contract_name))
    }

    /// Load the build-info the artifact was compiled from.
    pub fn build_info(&self) -> Result<BuildInfo, ArtifactError> {
        let debug_path = self.debug_path();
        let debug: DebugFile = read_json(&debug_path)?;

        let base = debug_path.parent().unwrap_or_else(|| Path::new("."));
        BuildInfo::from_file(&base.join(debug.build_info))
    }
}

/// Compiler input and version for one Hardhat compilation job.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    /// Full compiler version, e.g. `0.8.24+commit.e11b9ed9`
    pub solc_long_version: String,

    /// Solidity standard-JSON input
    pub input: serde_json::Value,
}

impl BuildInfo {
    pub fn from_file(path: &Path) -> Result<Self, ArtifactError> {
        read_json(path)
    }

    /// Compiler version in Etherscan's format, e.g. `v0.8.24+commit.e11b9ed9`.
    pub fn compiler_version(&self) -> String {
        format!("v{}", self.solc_long_version)
    }

    /// Standard-JSON input serialized for submission.
    pub fn standard_json_input(&self) -> String {
        self.input.to_string()
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let content = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn decode_bytecode(name: &str, bytecode: &str) -> Result<Vec<u8>, ArtifactError> {
    let hex_str = bytecode.strip_prefix("0x").unwrap_or(bytecode);

    if hex_str.is_empty() {
        return Err(ArtifactError::EmptyBytecode(name.to_string()));
    }

    // Unlinked library references look like `__$<34 hex chars>$__`.
    let libraries: Vec<String> = hex_str
        .match_indices("__$")
        .filter_map(|(start, _)| hex_str.get(start..start + 40))
        .map(str::to_string)
        .collect();

    if !libraries.is_empty() {
        return Err(ArtifactError::Unlinked {
            name: name.to_string(),
            libraries,
        });
    }

    hex::decode(hex_str).map_err(|e| ArtifactError::InvalidBytecode(e.to_string()))
}

/// Search `dir` recursively for `<contract_name>.json`, skipping build-info.
fn find_artifact(dir: &Path, contract_name: &str) -> Result<PathBuf, ArtifactError> {
    let file_name = format!("{}.json", contract_name);
    let mut found = Vec::new();
    collect_artifacts(dir, &file_name, &mut found)?;

    match found.len() {
        0 => Err(ArtifactError::NotFound {
            name: contract_name.to_string(),
            dir: dir.to_path_buf(),
        }),
        1 => Ok(found.remove(0)),
        _ => {
            found.sort();
            Err(ArtifactError::Ambiguous {
                name: contract_name.to_string(),
                paths: found,
            })
        }
    }
}

fn collect_artifacts(
    dir: &Path,
    file_name: &str,
    found: &mut Vec<PathBuf>,
) -> Result<(), ArtifactError> {
    if !dir.is_dir() {
        return Ok(());
    }

    let entries = fs::read_dir(dir).map_err(|source| ArtifactError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries.filter_map(|entry| entry.ok()) {
        let path = entry.path();

        if path.is_dir() {
            if path.file_name().and_then(|n| n.to_str()) == Some("build-info") {
                continue;
            }
            collect_artifacts(&path, file_name, found)?;
        } else if path.file_name().and_then(|n| n.to_str()) == Some(file_name) {
            found.push(path);
        }
    }

    Ok(())
}
