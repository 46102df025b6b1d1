//! Node REST client.
//!
//! # Responsibilities
//! - Read account state (sequence number, resources, events, table items)
//! - Read and cache the chain id
//! - Submit BCS-encoded signed transactions
//! - Map every status >= 400 to `AptosError::Api` with the body attached
//!
//! No request is ever retried here.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::OnceCell;

use crate::blockchain::signer::TransactionSubmitter;
use crate::blockchain::transaction::SignedTransaction;
use crate::blockchain::types::{AccountAddress, AptosError, AptosResult, ChainId, NodeConfig};
use crate::observability::metrics;

/// Content type for BCS-encoded signed transactions.
pub const SIGNED_TRANSACTION_CONTENT_TYPE: &str = "application/x.aptos.signed_transaction+bcs";

/// A resource stored under an account.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MoveResource {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub data: serde_json::Value,
}

/// An event emitted under an account's event handle.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Event {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub sequence_number: Option<String>,
    #[serde(rename = "type", default)]
    pub event_type: Option<String>,
    pub data: serde_json::Value,
}

/// Body of a table item lookup.
#[derive(Debug, Clone, Serialize)]
pub struct TableItemRequest {
    pub key_type: String,
    pub value_type: String,
    pub key: serde_json::Value,
}

#[derive(Deserialize)]
struct AccountData {
    sequence_number: String,
}

#[derive(Deserialize)]
struct LedgerInfo {
    chain_id: u8,
}

#[derive(Deserialize)]
struct PendingTransaction {
    hash: String,
}

/// Node REST client. Cheap to clone; clones share the cached chain id.
#[derive(Clone)]
pub struct NodeClient {
    http: Client,
    base_url: String,
    chain_id: std::sync::Arc<OnceCell<ChainId>>,
}

impl NodeClient {
    /// Create a new node client.
    ///
    /// # Arguments
    /// * `config` - Node configuration (base URL and timeout)
    pub fn new(config: &NodeConfig) -> AptosResult<Self> {
        let base: url::Url = config.url.parse().map_err(|e| {
            AptosError::InvalidResponse(format!("Invalid node URL '{}': {}", config.url, e))
        })?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        tracing::debug!(node_url = %base, "Node client initialized");

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            chain_id: Default::default(),
        })
    }

    /// Create a client for a base URL with default settings.
    pub fn from_url(url: &str) -> AptosResult<Self> {
        Self::new(&NodeConfig {
            url: url.to_string(),
            ..NodeConfig::default()
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Current sequence number of an account. Never cached.
    pub async fn account_sequence_number(&self, address: AccountAddress) -> AptosResult<u64> {
        let url = format!("{}/accounts/{}", self.base_url, address);
        let data: AccountData = self.get_json("account", &url).await?;
        data.sequence_number.parse().map_err(|_| {
            AptosError::InvalidResponse(format!(
                "sequence_number '{}' is not an integer",
                data.sequence_number
            ))
        })
    }

    /// Chain id from the ledger info. Read once, then cached.
    pub async fn chain_id(&self) -> AptosResult<ChainId> {
        let chain_id = self
            .chain_id
            .get_or_try_init(|| async {
                let info: LedgerInfo = self.get_json("ledger_info", &self.base_url).await?;
                tracing::debug!(chain_id = info.chain_id, "Fetched chain id");
                Ok::<_, AptosError>(ChainId(info.chain_id))
            })
            .await?;
        Ok(*chain_id)
    }

    pub async fn account_resources(&self, address: AccountAddress) -> AptosResult<Vec<MoveResource>> {
        let url = format!("{}/accounts/{}/resources", self.base_url, address);
        self.get_json("resources", &url).await
    }

    /// Events stored under `event_handle` / `field_name` for an account.
    pub async fn account_events(
        &self,
        address: AccountAddress,
        event_handle: &str,
        field_name: &str,
    ) -> AptosResult<Vec<Event>> {
        let url = format!(
            "{}/accounts/{}/events/{}/{}",
            self.base_url, address, event_handle, field_name
        );
        self.get_json("events", &url).await
    }

    /// Look up one item of an on-chain table.
    pub async fn table_item(
        &self,
        handle: &str,
        request: &TableItemRequest,
    ) -> AptosResult<serde_json::Value> {
        let url = format!("{}/tables/{}/item", self.base_url, handle);
        let response = self.http.post(&url).json(request).send().await?;
        let response = check_status("table_item", response).await?;
        decode_json("table_item", response).await
    }

    /// POST the signed transaction bytes and return the transaction hash.
    pub async fn submit_transaction(&self, signed: &SignedTransaction) -> AptosResult<String> {
        let url = format!("{}/transactions", self.base_url);
        let body = signed.to_bcs()?;
        let raw = signed.raw_transaction();

        tracing::debug!(
            sender = %raw.sender,
            sequence_number = raw.sequence_number,
            bytes = body.len(),
            "Submitting transaction"
        );

        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, SIGNED_TRANSACTION_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;
        let response = check_status("transactions", response).await?;

        let pending: PendingTransaction = response.json().await.map_err(|e| {
            AptosError::InvalidResponse(format!("Submission response without hash: {}", e))
        })?;

        tracing::info!(
            sender = %raw.sender,
            sequence_number = raw.sequence_number,
            hash = %pending.hash,
            "Transaction submitted"
        );

        Ok(pending.hash)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, url: &str) -> AptosResult<T> {
        let response = self.http.get(url).send().await?;
        let response = check_status(endpoint, response).await?;
        decode_json(endpoint, response).await
    }
}

#[async_trait]
impl TransactionSubmitter for NodeClient {
    async fn submit(&self, signed: &SignedTransaction) -> AptosResult<String> {
        self.submit_transaction(signed).await
    }
}

impl std::fmt::Debug for NodeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeClient")
            .field("base_url", &self.base_url)
            .field("chain_id", &self.chain_id.get())
            .finish()
    }
}

/// Turn a status >= 400 into an API error carrying the body.
async fn check_status(endpoint: &str, response: Response) -> AptosResult<Response> {
    let status = response.status().as_u16();
    if status < 400 {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!(endpoint = endpoint, status = status, body = %body, "Node returned error status");
    metrics::record_api_error(endpoint, status);

    Err(AptosError::Api { status, body })
}

/// Parse a successful response body. A body that arrives but does not decode
/// is an invalid response; a body that never arrives stays a transport error.
pub(crate) async fn decode_json<T: DeserializeOwned>(endpoint: &str, response: Response) -> AptosResult<T> {
    response.json().await.map_err(|e| {
        if e.is_decode() {
            tracing::warn!(endpoint = endpoint, error = %e, "Undecodable response body");
            AptosError::InvalidResponse(format!("{}: {}", endpoint, e))
        } else {
            AptosError::Transport(e)
        }
    })
}
