//! Chain-specific types and error definitions.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// Re-export the node and gas settings from the config module to avoid duplication
pub use crate::config::schema::{GasParams, NodeConfig};

/// A 32-byte on-chain account address.
///
/// Parses both the long (`0x` + 64 hex digits) and the short (`0x1`) forms.
/// Always displays in the long form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountAddress(pub [u8; 32]);

impl AccountAddress {
    pub const LENGTH: usize = 32;

    /// The framework address `0x1`.
    pub const ONE: Self = {
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        Self(bytes)
    };

    pub fn from_hex(s: &str) -> AptosResult<Self> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        if digits.is_empty() || digits.len() > Self::LENGTH * 2 {
            return Err(AptosError::Address(s.to_string()));
        }

        // Short forms are left-padded with zeros
        let padded = format!("{:0>64}", digits);
        let decoded = hex::decode(&padded).map_err(|_| AptosError::Address(s.to_string()))?;

        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&decoded);
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for AccountAddress {
    type Err = AptosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for AccountAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_string())
        } else {
            // BCS: fixed 32 bytes, no length prefix
            serializer.serialize_newtype_struct("AccountAddress", &self.0)
        }
    }
}

impl<'de> Deserialize<'de> for AccountAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::from_hex(&s).map_err(serde::de::Error::custom)
        } else {
            #[derive(Deserialize)]
            #[serde(rename = "AccountAddress")]
            struct Raw([u8; 32]);
            Raw::deserialize(deserializer).map(|raw| Self(raw.0))
        }
    }
}

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainId(pub u8);

impl From<u8> for ChainId {
    fn from(id: u8) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u8 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur while talking to the node, the oracle, or the signer.
#[derive(Debug, Error)]
pub enum AptosError {
    /// The remote service answered with a status >= 400.
    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not have the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// BCS encoding failed.
    #[error("Encoding error: {0}")]
    Encoding(#[from] bcs::Error),

    /// Invalid private key or signing failure.
    #[error("Account error: {0}")]
    Account(String),

    #[error("Invalid account address: {0}")]
    Address(String),

    #[error("Invalid type tag: {0}")]
    TypeTag(String),

    /// A function id that is not `address::module::function`.
    #[error("Invalid function id: {0}")]
    FunctionId(String),

    /// Symbol missing from the token table.
    #[error("Unknown token symbol: {0}")]
    UnknownToken(String),

    /// Two token entries share a symbol, ignoring case.
    #[error("Duplicate token symbol: {0}")]
    DuplicateToken(String),

    #[error("Price unavailable for {0}")]
    PriceUnavailable(String),

    /// A negative, non-finite, or out-of-range amount.
    #[error("Invalid amount: {0}")]
    Amount(String),
}

impl AptosError {
    /// HTTP status carried by an API error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            AptosError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for chain operations.
pub type AptosResult<T> = Result<T, AptosError>;
