//! Ethereum Address Types
//!
//! An [`EthAddress`] is the canonical identifier of a bridged ERC-20 contract
//! (and of Ethereum-side recipients). It keeps the exact string it was parsed
//! from, because that string is embedded in bank denoms, and the decoded
//! 20 raw bytes, which define equality and ordering.
//!
//! ## Validation
//!
//! A string is a valid address iff it matches `^0x[0-9a-fA-F]{40}$`, which also
//! pins its length to [`ETH_ADDRESS_LEN`] characters.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use cosmwasm_schema::cw_serde;
use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::TokenError;

/// Length of an address string, `0x` prefix included
pub const ETH_ADDRESS_LEN: usize = 42;

/// The all-zero Ethereum address
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

// ============================================================================
// EthAddress
// ============================================================================

/// A validated Ethereum address.
///
/// Serialises as its original string. Deserialising re-runs validation, so a
/// stored or received `EthAddress` is always well formed.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EthAddress {
    address: String,
    bytes: [u8; 20],
}

impl EthAddress {
    /// Parse and validate an address string (mixed case allowed)
    pub fn new(address: &str) -> Result<Self, TokenError> {
        let bytes = parse_eth_address(address)?;
        Ok(Self {
            address: address.to_string(),
            bytes,
        })
    }

    /// Build an address from raw bytes, rendered in lowercase hex
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self {
            address: format!("0x{}", hex::encode(bytes)),
            bytes,
        }
    }

    pub fn zero() -> Self {
        Self::from_bytes([0u8; 20])
    }

    pub fn as_str(&self) -> &str {
        &self.address
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.bytes
    }

    pub fn is_zero(&self) -> bool {
        self.bytes == [0u8; 20]
    }

    /// Re-check the stored string against the address format
    pub fn validate(&self) -> Result<(), TokenError> {
        let bytes = parse_eth_address(&self.address)?;
        if bytes != self.bytes {
            return Err(TokenError::InvalidAddress {
                reason: format!("address({}) does not match its raw bytes", self.address),
            });
        }
        Ok(())
    }
}

/// Validate `^0x[0-9a-fA-F]{40}$` and decode the 20 raw bytes.
pub fn parse_eth_address(address: &str) -> Result<[u8; 20], TokenError> {
    if address.is_empty() {
        return Err(TokenError::InvalidAddress {
            reason: "empty".to_string(),
        });
    }

    let hex_str = address
        .strip_prefix("0x")
        .ok_or_else(|| TokenError::InvalidAddress {
            reason: format!("address({}) is missing the 0x prefix", address),
        })?;

    if !hex_str.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(TokenError::InvalidAddress {
            reason: format!("address({}) contains non-hex characters", address),
        });
    }

    if address.len() != ETH_ADDRESS_LEN {
        return Err(TokenError::InvalidAddress {
            reason: format!(
                "address({}) of the wrong length exp({}) actual({})",
                address,
                ETH_ADDRESS_LEN,
                address.len()
            ),
        });
    }

    let decoded = hex::decode(hex_str).map_err(|e| TokenError::InvalidAddress {
        reason: format!("Invalid hex: {}", e),
    })?;

    let mut result = [0u8; 20];
    result.copy_from_slice(&decoded);
    Ok(result)
}

impl PartialEq for EthAddress {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for EthAddress {}

impl Hash for EthAddress {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl PartialOrd for EthAddress {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EthAddress {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bytes.cmp(&other.bytes)
    }
}

impl fmt::Display for EthAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

impl TryFrom<String> for EthAddress {
    type Error = TokenError;

    fn try_from(address: String) -> Result<Self, Self::Error> {
        let bytes = parse_eth_address(&address)?;
        Ok(Self { address, bytes })
    }
}

impl TryFrom<&str> for EthAddress {
    type Error = TokenError;

    fn try_from(address: &str) -> Result<Self, Self::Error> {
        Self::new(address)
    }
}

impl From<EthAddress> for String {
    fn from(addr: EthAddress) -> Self {
        addr.address
    }
}

impl JsonSchema for EthAddress {
    fn schema_name() -> String {
        "EthAddress".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        String::json_schema(gen)
    }
}

// ============================================================================
// OptionalEthAddress
// ============================================================================

/// An Ethereum address that may be absent.
///
/// Kept in the `{ is_nil, optional }` shape relayers already decode; use
/// [`OptionalEthAddress::get`] or the `Option` conversions on the Rust side.
#[cw_serde]
pub struct OptionalEthAddress {
    pub is_nil: bool,
    pub optional: Option<EthAddress>,
}

impl OptionalEthAddress {
    pub fn nil() -> Self {
        Self {
            is_nil: true,
            optional: None,
        }
    }

    pub fn new(address: &str) -> Result<Self, TokenError> {
        Ok(Some(EthAddress::new(address)?).into())
    }

    pub fn get(&self) -> Result<&EthAddress, TokenError> {
        if self.is_nil {
            return Err(TokenError::NilAddress);
        }
        self.optional.as_ref().ok_or(TokenError::NilAddress)
    }

    pub fn set(&mut self, address: Option<EthAddress>) {
        *self = address.into();
    }
}

impl Default for OptionalEthAddress {
    fn default() -> Self {
        Self::nil()
    }
}

impl From<Option<EthAddress>> for OptionalEthAddress {
    fn from(address: Option<EthAddress>) -> Self {
        Self {
            is_nil: address.is_none(),
            optional: address,
        }
    }
}

impl From<OptionalEthAddress> for Option<EthAddress> {
    fn from(value: OptionalEthAddress) -> Self {
        if value.is_nil {
            None
        } else {
            value.optional
        }
    }
}
