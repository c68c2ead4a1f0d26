//! Network configuration resolver.
//!
//! Two static tables map a network name to the addresses the hook is
//! constructed with. The tables are written as TOML:
//!
//! ```toml
//! [vault]
//! mainnet = "0x..."
//!
//! [allowed_pool_factory]
//! mainnet = "0x..."
//! ```
//!
//! Each table is consulted independently, so a network must appear in both.
//! Resolution is a pure lookup: it never touches the network.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use alloy_primitives::Address;
use serde::Deserialize;

use crate::traits::ConfigurationError;
use crate::types::ConstructorArgs;

/// Tables compiled into the binary. Entries are placeholders that must be
/// replaced (or overridden by an operator file) before a real deployment.
const EMBEDDED_TABLES: &str = include_str!("../networks.toml");

/// Which of the two address tables an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressTable {
    Vault,
    AllowedPoolFactory,
}

impl fmt::Display for AddressTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressTable::Vault => f.write_str("Vault"),
            AddressTable::AllowedPoolFactory => f.write_str("allowed pool factory"),
        }
    }
}

/// Immutable network → address tables.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkConfig {
    #[serde(default)]
    vault: BTreeMap<String, String>,

    #[serde(default)]
    allowed_pool_factory: BTreeMap<String, String>,
}

impl NetworkConfig {
    /// Tables embedded at build time.
    pub fn embedded() -> Result<Self, ConfigurationError> {
        Self::from_toml_str(EMBEDDED_TABLES)
    }

    /// Parse tables from a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigurationError> {
        toml::from_str(content).map_err(|e| ConfigurationError::InvalidTables(e.to_string()))
    }

    /// Build tables from in-memory entries.
    pub fn from_tables<V, F, K, S>(vault: V, allowed_pool_factory: F) -> Self
    where
        V: IntoIterator<Item = (K, S)>,
        F: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<String>,
    {
        Self {
            vault: vault
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            allowed_pool_factory: allowed_pool_factory
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Vault address configured for `network`.
    pub fn vault_address(&self, network: &str) -> Result<Address, ConfigurationError> {
        self.lookup(AddressTable::Vault, network)
    }

    /// Allowed pool factory address configured for `network`.
    pub fn allowed_pool_factory(&self, network: &str) -> Result<Address, ConfigurationError> {
        self.lookup(AddressTable::AllowedPoolFactory, network)
    }

    /// Resolve both constructor arguments for `network`.
    ///
    /// The vault table is consulted first; the first failure is returned.
    pub fn resolve(&self, network: &str) -> Result<ConstructorArgs, ConfigurationError> {
        let vault = self.vault_address(network)?;
        let allowed_pool_factory = self.allowed_pool_factory(network)?;

        tracing::debug!(network, %vault, %allowed_pool_factory, "Resolved network addresses");

        Ok(ConstructorArgs::new(vault, allowed_pool_factory))
    }

    /// Every network name present in at least one table, sorted.
    pub fn networks(&self) -> Vec<&str> {
        self.vault
            .keys()
            .chain(self.allowed_pool_factory.keys())
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Per-table readiness of `network`.
    pub fn status(&self, network: &str) -> NetworkStatus {
        NetworkStatus {
            network: network.to_string(),
            vault: TableEntry::from_lookup(self.vault_address(network)),
            allowed_pool_factory: TableEntry::from_lookup(self.allowed_pool_factory(network)),
        }
    }

    fn table(&self, table: AddressTable) -> &BTreeMap<String, String> {
        match table {
            AddressTable::Vault => &self.vault,
            AddressTable::AllowedPoolFactory => &self.allowed_pool_factory,
        }
    }

    fn lookup(&self, table: AddressTable, network: &str) -> Result<Address, ConfigurationError> {
        if network.trim().is_empty() {
            return Err(ConfigurationError::EmptyNetwork);
        }

        let value = self.table(table).get(network).ok_or_else(|| {
            ConfigurationError::MissingAddress {
                table,
                network: network.to_string(),
            }
        })?;

        parse_address(table, network, value)
    }
}

/// Parse a configured address, rejecting placeholders.
fn parse_address(
    table: AddressTable,
    network: &str,
    value: &str,
) -> Result<Address, ConfigurationError> {
    let trimmed = value.trim();

    if is_placeholder(trimmed) {
        return Err(ConfigurationError::PlaceholderAddress {
            table,
            network: network.to_string(),
            value: value.to_string(),
        });
    }

    let invalid = |reason: String| ConfigurationError::InvalidAddress {
        table,
        network: network.to_string(),
        value: value.to_string(),
        reason,
    };

    let Some(hex) = trimmed.strip_prefix("0x") else {
        return Err(invalid("address must be 0x-prefixed".to_string()));
    };

    // Mixed case means the author supplied an EIP-55 checksum; hold them to it.
    let mixed_case =
        hex.chars().any(|c| c.is_ascii_lowercase()) && hex.chars().any(|c| c.is_ascii_uppercase());

    let address = if mixed_case {
        Address::parse_checksummed(trimmed, None).map_err(|e| invalid(e.to_string()))?
    } else {
        trimmed
            .parse::<Address>()
            .map_err(|e| invalid(e.to_string()))?
    };

    if address == Address::ZERO {
        return Err(ConfigurationError::PlaceholderAddress {
            table,
            network: network.to_string(),
            value: value.to_string(),
        });
    }

    Ok(address)
}

fn is_placeholder(value: &str) -> bool {
    value.is_empty() || value == "0x" || value.contains("...")
}

/// State of one table entry, for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEntry {
    Ready(Address),
    Missing,
    Unusable(String),
}

impl TableEntry {
    fn from_lookup(result: Result<Address, ConfigurationError>) -> Self {
        match result {
            Ok(address) => TableEntry::Ready(address),
            Err(ConfigurationError::MissingAddress { .. }) => TableEntry::Missing,
            Err(e) => TableEntry::Unusable(e.to_string()),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, TableEntry::Ready(_))
    }
}

/// Readiness of a network across both tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkStatus {
    pub network: String,
    pub vault: TableEntry,
    pub allowed_pool_factory: TableEntry,
}

impl NetworkStatus {
    pub fn is_ready(&self) -> bool {
        self.vault.is_ready() && self.allowed_pool_factory.is_ready()
    }
}
