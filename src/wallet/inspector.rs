//! Coin balances and NFT holdings of an account.

use std::collections::{BTreeMap, HashSet};

use crate::blockchain::client::{Event, NodeClient, TableItemRequest};
use crate::blockchain::types::{AccountAddress, AptosError, AptosResult};
use crate::wallet::types::TokenId;

const COIN_RESOURCE_MARKER: &str = "0x1::coin";
const TOKEN_STORE: &str = "0x3::token::TokenStore";
const DEPOSIT_EVENTS_FIELD: &str = "deposit_events";
const TOKEN_ID_TYPE: &str = "0x3::token::TokenId";
const TOKEN_TYPE: &str = "0x3::token::Token";

/// Coin balances are reported with this fixed precision.
const COIN_SCALE: f64 = 100_000_000.0;

/// Read-only view over an account's holdings.
#[derive(Debug, Clone)]
pub struct WalletInspector {
    client: NodeClient,
}

impl WalletInspector {
    pub fn new(client: NodeClient) -> Self {
        Self { client }
    }

    /// Every coin store of `address`, keyed by resource type, in whole units.
    pub async fn get_all_tokens(&self, address: AccountAddress) -> AptosResult<BTreeMap<String, f64>> {
        let resources = self.client.account_resources(address).await?;

        let mut balances = BTreeMap::new();
        for resource in resources
            .iter()
            .filter(|r| r.resource_type.contains(COIN_RESOURCE_MARKER))
        {
            match coin_value(&resource.data) {
                Some(value) => {
                    balances.insert(resource.resource_type.clone(), value as f64 / COIN_SCALE);
                }
                None => tracing::debug!(
                    resource = %resource.resource_type,
                    "Coin resource without a balance, skipping"
                ),
            }
        }

        tracing::debug!(address = %address, coins = balances.len(), "Read coin balances");
        Ok(balances)
    }

    /// Tokens `address` has received and still holds, in first-deposit order.
    ///
    /// Each entry is the identity the token table reports, so two deposits
    /// resolving to the same stored token count once. Lookups that fail with
    /// an error status or an unreadable body are skipped.
    pub async fn get_all_nfts(&self, address: AccountAddress) -> AptosResult<Vec<TokenId>> {
        let resources = self.client.account_resources(address).await?;
        let Some(store) = resources.iter().find(|r| r.resource_type == TOKEN_STORE) else {
            tracing::debug!(address = %address, "No token store");
            return Ok(Vec::new());
        };

        let handle = store.data["tokens"]["handle"]
            .as_str()
            .ok_or_else(|| AptosError::InvalidResponse("TokenStore without tokens.handle".to_string()))?
            .to_string();

        let events = self
            .client
            .account_events(address, TOKEN_STORE, DEPOSIT_EVENTS_FIELD)
            .await?;
        let candidates = dedup_deposits(&events);

        let mut held: Vec<TokenId> = Vec::with_capacity(candidates.len());
        for token in candidates {
            let request = TableItemRequest {
                key_type: TOKEN_ID_TYPE.to_string(),
                value_type: TOKEN_TYPE.to_string(),
                key: serde_json::to_value(&token)
                    .map_err(|e| AptosError::InvalidResponse(e.to_string()))?,
            };

            let item = match self.client.table_item(&handle, &request).await {
                Ok(item) => item,
                Err(AptosError::Api { status, .. }) => {
                    tracing::debug!(token = %token, status = status, "Token no longer held");
                    continue;
                }
                Err(AptosError::InvalidResponse(reason)) => {
                    tracing::warn!(token = %token, reason = %reason, "Unreadable table item, skipping");
                    continue;
                }
                Err(e) => return Err(e),
            };

            // The stored value names the identity actually held
            let resolved: TokenId = match serde_json::from_value(item["id"].clone()) {
                Ok(resolved) => resolved,
                Err(e) => {
                    tracing::warn!(token = %token, error = %e, "Table item without a token id, skipping");
                    continue;
                }
            };
            if resolved != token {
                tracing::debug!(requested = %token, resolved = %resolved, "Token resolved to another identity");
            }
            if !held.contains(&resolved) {
                held.push(resolved);
            }
        }

        tracing::info!(
            address = %address,
            deposits = events.len(),
            held = held.len(),
            "Resolved NFT holdings"
        );
        Ok(held)
    }
}

fn coin_value(data: &serde_json::Value) -> Option<u64> {
    let value = &data["coin"]["value"];
    value
        .as_str()
        .and_then(|s| s.parse().ok())
        .or_else(|| value.as_u64())
}

/// Token identities from deposit events, duplicates removed, first occurrence kept.
///
/// Events whose payload is not a token id are ignored.
pub fn dedup_deposits(events: &[Event]) -> Vec<TokenId> {
    let mut seen = HashSet::new();
    let mut tokens = Vec::new();

    for event in events {
        let token: TokenId = match serde_json::from_value(event.data["id"].clone()) {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "Deposit event without a token id");
                continue;
            }
        };
        if seen.insert(token.clone()) {
            tokens.push(token);
        }
    }

    tokens
}
