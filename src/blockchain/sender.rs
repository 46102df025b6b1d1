//! Build, sign, and submit in one step.
//!
//! `TxSender` is the sign-and-submit capability every action component is
//! composed with. It owns the account, the builder, and a submitter handle.

use std::sync::Arc;

use crate::blockchain::account::Account;
use crate::blockchain::builder::TxBuilder;
use crate::blockchain::signer::{sign, TransactionSubmitter};
use crate::blockchain::transaction::{EntryFunction, SignedTransaction};
use crate::blockchain::types::{AccountAddress, AptosResult, GasParams};
use crate::observability::metrics;

#[derive(Clone)]
pub struct TxSender {
    account: Arc<Account>,
    builder: TxBuilder,
    submitter: Arc<dyn TransactionSubmitter>,
}

impl TxSender {
    /// Sender that submits through the builder's own node client.
    pub fn new(account: Arc<Account>, builder: TxBuilder) -> Self {
        let submitter: Arc<dyn TransactionSubmitter> = Arc::new(builder.client().clone());
        Self {
            account,
            builder,
            submitter,
        }
    }

    /// Sender with a separate submission path.
    pub fn with_submitter(
        account: Arc<Account>,
        builder: TxBuilder,
        submitter: Arc<dyn TransactionSubmitter>,
    ) -> Self {
        Self {
            account,
            builder,
            submitter,
        }
    }

    pub fn address(&self) -> AccountAddress {
        self.account.address()
    }

    pub fn builder(&self) -> &TxBuilder {
        &self.builder
    }

    pub fn submitter(&self) -> Arc<dyn TransactionSubmitter> {
        self.submitter.clone()
    }

    /// Build and sign without submitting.
    pub async fn prepare(&self, entry: EntryFunction, gas: GasParams) -> AptosResult<SignedTransaction> {
        let raw = self.builder.build(self.account.address(), entry, gas).await?;
        sign(raw, &self.account)
    }

    /// Build and sign a transaction meant to be submitted at `valid_from_secs`.
    pub async fn prepare_at(
        &self,
        entry: EntryFunction,
        gas: GasParams,
        valid_from_secs: u64,
    ) -> AptosResult<SignedTransaction> {
        let raw = self
            .builder
            .build_at(self.account.address(), entry, gas, valid_from_secs)
            .await?;
        sign(raw, &self.account)
    }

    /// Build, sign, and submit. `action` labels the log line and metric.
    pub async fn send(&self, action: &str, entry: EntryFunction, gas: GasParams) -> AptosResult<String> {
        let signed = self.prepare(entry, gas).await?;
        let hash = self.submitter.submit(&signed).await?;

        metrics::record_submission(action);
        tracing::info!(action = action, sender = %self.account.address(), hash = %hash, "Action submitted");

        Ok(hash)
    }
}

impl std::fmt::Debug for TxSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TxSender")
            .field("account", &self.account)
            .field("builder", &self.builder)
            .finish_non_exhaustive()
    }
}
