//! Token identity as it appears in events and table keys.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::blockchain::types::AccountAddress;

/// Identity of a token's shared data: creator, collection, and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenDataId {
    pub creator: AccountAddress,
    pub collection: String,
    pub name: String,
}

/// Full token identity. Two tokens are the same only if every field matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenId {
    pub token_data_id: TokenDataId,
    #[serde(
        serialize_with = "serialize_u64_string",
        deserialize_with = "deserialize_u64_lenient"
    )]
    pub property_version: u64,
}

impl TokenId {
    pub fn new(creator: AccountAddress, collection: &str, name: &str, property_version: u64) -> Self {
        Self {
            token_data_id: TokenDataId {
                creator,
                collection: collection.to_string(),
                name: name.to_string(),
            },
            property_version,
        }
    }

    pub fn creator(&self) -> AccountAddress {
        self.token_data_id.creator
    }

    pub fn collection(&self) -> &str {
        &self.token_data_id.collection
    }

    pub fn name(&self) -> &str {
        &self.token_data_id.name
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}#{}",
            self.token_data_id.creator,
            self.token_data_id.collection,
            self.token_data_id.name,
            self.property_version
        )
    }
}

// The node encodes u64 as a JSON string
fn serialize_u64_string<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_string())
}

fn deserialize_u64_lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(u64),
    }

    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s.parse().map_err(serde::de::Error::custom),
        StringOrNumber::Number(n) => Ok(n),
    }
}
