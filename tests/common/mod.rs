//! In-process stub of the node REST API and the price oracle.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use aptos_toolkit::blockchain::{Account, AccountAddress, NodeClient, TxBuilder, TxSender};
use aptos_toolkit::blockchain::clock::FixedClock;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{header::CONTENT_TYPE, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use ed25519_dalek::SigningKey;
use serde_json::{json, Value};
use sha3::{Digest, Sha3_256};
use tokio::net::TcpListener;

pub const BCS_CONTENT_TYPE: &str = "application/x.aptos.signed_transaction+bcs";

/// Mutable view of the chain the stub serves.
#[derive(Default)]
pub struct NodeState {
    pub chain_id: u8,
    pub sequence_numbers: HashMap<String, u64>,
    pub resources: HashMap<String, Value>,
    pub deposit_events: HashMap<String, Value>,
    /// Token names whose table lookup succeeds.
    pub held_tokens: HashSet<String>,
    /// Token names whose table lookup answers 500.
    pub failing_tokens: HashSet<String>,
    /// Token names whose table lookup answers 200 with a body that is not JSON.
    pub malformed_tokens: HashSet<String>,
    /// Token name → name of the identity the table lookup reports back.
    pub resolved_as: HashMap<String, String>,
    pub prices: HashMap<String, Value>,
    /// Forced status and body for every price request.
    pub price_error: Option<(u16, String)>,
    /// Forced status and body for every submission.
    pub submit_error: Option<(u16, String)>,
    pub submitted: Vec<Vec<u8>>,
    pub ledger_reads: usize,
    pub table_reads: usize,
    pub event_reads: usize,
}

pub type SharedState = Arc<Mutex<NodeState>>;

pub struct StubNode {
    pub node_url: String,
    pub oracle_url: String,
    pub state: SharedState,
}

impl StubNode {
    pub fn client(&self) -> NodeClient {
        NodeClient::from_url(&self.node_url).unwrap()
    }

    /// Sender for a fixed test account, with the wall clock frozen at `now_secs`.
    pub fn sender(&self, now_secs: u64) -> TxSender {
        let builder = TxBuilder::new(self.client()).with_clock(Arc::new(FixedClock::from_secs(now_secs)));
        TxSender::new(Arc::new(test_account()), builder)
    }

    pub fn submissions(&self) -> usize {
        self.state.lock().unwrap().submitted.len()
    }
}

pub fn test_account() -> Account {
    Account::from_signing_key(SigningKey::from_bytes(&[42u8; 32]))
}

/// Start the stub on an ephemeral port.
pub async fn start_stub_node() -> StubNode {
    let state: SharedState = Arc::new(Mutex::new(NodeState {
        chain_id: 4,
        ..NodeState::default()
    }));

    let app = Router::new()
        .route("/v1", get(ledger_info))
        .route("/v1/accounts/{address}", get(account))
        .route("/v1/accounts/{address}/resources", get(resources))
        .route("/v1/accounts/{address}/events/{handle}/{field}", get(events))
        .route("/v1/tables/{handle}/item", post(table_item))
        .route("/v1/transactions", post(submit))
        .route("/fiat-prices", get(fiat_prices))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    StubNode {
        node_url: format!("http://{}/v1", addr),
        oracle_url: format!("http://{}", addr),
        state,
    }
}

fn not_found(message: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"message": message, "error_code": "resource_not_found"})),
    )
}

async fn ledger_info(State(state): State<SharedState>) -> Json<Value> {
    let mut state = state.lock().unwrap();
    state.ledger_reads += 1;
    Json(json!({"chain_id": state.chain_id, "ledger_version": "1000"}))
}

async fn account(
    State(state): State<SharedState>,
    Path(address): Path<String>,
) -> (StatusCode, Json<Value>) {
    let state = state.lock().unwrap();
    match state.sequence_numbers.get(&address) {
        Some(seq) => (
            StatusCode::OK,
            Json(json!({"sequence_number": seq.to_string(), "authentication_key": address})),
        ),
        None => not_found("Account not found"),
    }
}

async fn resources(
    State(state): State<SharedState>,
    Path(address): Path<String>,
) -> (StatusCode, Json<Value>) {
    let state = state.lock().unwrap();
    match state.resources.get(&address) {
        Some(list) => (StatusCode::OK, Json(list.clone())),
        None => not_found("Account not found"),
    }
}

async fn events(
    State(state): State<SharedState>,
    Path((address, handle, field)): Path<(String, String, String)>,
) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    state.event_reads += 1;
    if handle != "0x3::token::TokenStore" || field != "deposit_events" {
        return not_found("Unknown event handle");
    }
    match state.deposit_events.get(&address) {
        Some(list) => (StatusCode::OK, Json(list.clone())),
        None => (StatusCode::OK, Json(json!([]))),
    }
}

async fn table_item(
    State(state): State<SharedState>,
    Path(_handle): Path<String>,
    Json(request): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.table_reads += 1;

    if request["key_type"] != "0x3::token::TokenId" || request["value_type"] != "0x3::token::Token" {
        return (StatusCode::BAD_REQUEST, Json(json!({"message": "bad table types"}))).into_response();
    }

    let name = request["key"]["token_data_id"]["name"].as_str().unwrap_or_default().to_string();
    if state.failing_tokens.contains(&name) {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"message": "internal"}))).into_response();
    }
    if state.malformed_tokens.contains(&name) {
        return (StatusCode::OK, "<html>gateway page</html>").into_response();
    }
    if !state.held_tokens.contains(&name) {
        return not_found("Table Item not found").into_response();
    }

    let mut id = request["key"].clone();
    if let Some(resolved) = state.resolved_as.get(&name) {
        id["token_data_id"]["name"] = json!(resolved);
    }
    (StatusCode::OK, Json(json!({"amount": "1", "id": id, "token_properties": {}}))).into_response()
}

async fn submit(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    let mut state = state.lock().unwrap();

    if let Some((status, body)) = state.submit_error.clone() {
        return (StatusCode::from_u16(status).unwrap(), body);
    }

    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
    if content_type != Some(BCS_CONTENT_TYPE) {
        return (StatusCode::UNSUPPORTED_MEDIA_TYPE, "unsupported content type".to_string());
    }

    if state.submitted.iter().any(|b| b.as_slice() == body.as_ref()) {
        return (
            StatusCode::BAD_REQUEST,
            json!({"message": "Invalid transaction: SEQUENCE_NUMBER_TOO_OLD", "vm_error_code": 3}).to_string(),
        );
    }

    // First 32 bytes of the BCS body are the sender address
    if body.len() > 32 {
        let sender = format!("0x{}", hex::encode(&body[..32]));
        if let Some(seq) = state.sequence_numbers.get_mut(&sender) {
            *seq += 1;
        }
    }

    let hash = format!("0x{}", hex::encode(Sha3_256::digest(&body)));
    state.submitted.push(body.to_vec());
    (StatusCode::ACCEPTED, json!({"hash": hash}).to_string())
}

async fn fiat_prices(
    State(state): State<SharedState>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let state = state.lock().unwrap();
    if let Some((status, body)) = state.price_error.clone() {
        return (StatusCode::from_u16(status).unwrap(), body).into_response();
    }

    let currency = query.get("currencies").cloned().unwrap_or_default();
    match state.prices.get(&currency) {
        Some(price) => Json(json!([{"currency": currency, "price": price}])).into_response(),
        None => Json(json!([])).into_response(),
    }
}

/// Register an account with a starting sequence number.
pub fn seed_account(state: &SharedState, address: AccountAddress, sequence_number: u64) {
    state
        .lock()
        .unwrap()
        .sequence_numbers
        .insert(address.to_string(), sequence_number);
}

/// A deposit event for token `name` in collection "Col".
pub fn deposit_event(creator: AccountAddress, name: &str) -> Value {
    json!({
        "version": "10",
        "sequence_number": "0",
        "type": "0x3::token::DepositEvent",
        "data": {
            "amount": "1",
            "id": {
                "token_data_id": {"creator": creator.to_string(), "collection": "Col", "name": name},
                "property_version": "0"
            }
        }
    })
}
