//! Raw transaction construction.
//!
//! # Responsibilities
//! - Fetch a fresh sequence number for every build (never cached)
//! - Stamp the chain id and the expiration (now + offset)
//! - Assemble the entry function payload

use std::sync::Arc;

use crate::blockchain::client::NodeClient;
use crate::blockchain::clock::{Clock, SystemClock};
use crate::blockchain::transaction::{EntryFunction, RawTransaction, TransactionPayload};
use crate::blockchain::types::{AccountAddress, AptosResult, GasParams};

/// Default expiration window in seconds.
pub const DEFAULT_EXPIRATION_SECS: u64 = 600;

/// Builds raw transactions against a node.
#[derive(Clone)]
pub struct TxBuilder {
    client: NodeClient,
    clock: Arc<dyn Clock>,
    expiration_offset_secs: u64,
}

impl TxBuilder {
    /// Create a builder using the system clock and the default expiration window.
    pub fn new(client: NodeClient) -> Self {
        Self {
            client,
            clock: Arc::new(SystemClock),
            expiration_offset_secs: DEFAULT_EXPIRATION_SECS,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_expiration_offset(mut self, secs: u64) -> Self {
        self.expiration_offset_secs = secs;
        self
    }

    /// Build a raw transaction for `entry` sent by `sender`.
    ///
    /// Performs one read for the sequence number and, on first use, one for the chain id.
    pub async fn build(
        &self,
        sender: AccountAddress,
        entry: EntryFunction,
        gas: GasParams,
    ) -> AptosResult<RawTransaction> {
        self.build_at(sender, entry, gas, self.clock.now_secs()).await
    }

    /// Like [`build`](Self::build), but the expiration counts from `valid_from_secs`
    /// instead of now. Used for transactions signed ahead of their submission time.
    /// A base in the past is clamped to now.
    pub async fn build_at(
        &self,
        sender: AccountAddress,
        entry: EntryFunction,
        gas: GasParams,
        valid_from_secs: u64,
    ) -> AptosResult<RawTransaction> {
        let sequence_number = self.client.account_sequence_number(sender).await?;
        let chain_id = self.client.chain_id().await?;
        let base = valid_from_secs.max(self.clock.now_secs());
        let expiration_timestamp_secs = base.saturating_add(self.expiration_offset_secs);

        tracing::debug!(
            sender = %sender,
            function = %entry.function_id(),
            sequence_number = sequence_number,
            expiration = expiration_timestamp_secs,
            "Built raw transaction"
        );

        Ok(RawTransaction {
            sender,
            sequence_number,
            payload: TransactionPayload::EntryFunction(entry),
            max_gas_amount: gas.max_gas_amount,
            gas_unit_price: gas.gas_unit_price,
            expiration_timestamp_secs,
            chain_id,
        })
    }

    pub fn client(&self) -> &NodeClient {
        &self.client
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }
}

impl std::fmt::Debug for TxBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TxBuilder")
            .field("client", &self.client)
            .field("expiration_offset_secs", &self.expiration_offset_secs)
            .finish()
    }
}
