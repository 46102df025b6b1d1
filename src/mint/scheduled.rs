//! Time-triggered submission of a pre-signed mint.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

use crate::blockchain::clock::Clock;
use crate::blockchain::signer::TransactionSubmitter;
use crate::blockchain::transaction::SignedTransaction;
use crate::blockchain::types::AptosResult;
use crate::mint::minter::PreparedMint;
use crate::observability::metrics;

/// Terminal result of a scheduled mint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MintOutcome {
    /// Submitted at the target; carries the transaction hash.
    Submitted(String),
    /// The target had already passed when the wait started, or the signed
    /// transaction expires before the target. Nothing was sent.
    WindowMissed,
    /// Shutdown arrived during the wait. Nothing was sent.
    Cancelled,
}

impl MintOutcome {
    fn label(&self) -> &'static str {
        match self {
            MintOutcome::Submitted(_) => "submitted",
            MintOutcome::WindowMissed => "window_missed",
            MintOutcome::Cancelled => "cancelled",
        }
    }
}

/// A signed mint armed for a wall-clock target.
pub struct ScheduledMint {
    signed: SignedTransaction,
    target: Duration,
    submitter: Arc<dyn TransactionSubmitter>,
    clock: Arc<dyn Clock>,
}

impl ScheduledMint {
    /// Arm `prepared` for `target`, a duration since the Unix epoch.
    pub fn new(
        prepared: PreparedMint,
        target: Duration,
        submitter: Arc<dyn TransactionSubmitter>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            signed: prepared.into_signed(),
            target,
            submitter,
            clock,
        }
    }

    pub fn target(&self) -> Duration {
        self.target
    }

    pub fn signed(&self) -> &SignedTransaction {
        &self.signed
    }

    /// Wait for the target, then submit once.
    ///
    /// A submission failure is returned as an error; it is never retried.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) -> AptosResult<MintOutcome> {
        let now = self.clock.now();
        let expiration_secs = self.signed.raw_transaction().expiration_timestamp_secs;
        let outcome = if now > self.target {
            tracing::warn!(
                target_secs = self.target.as_secs(),
                late_ms = (now - self.target).as_millis() as u64,
                "Mint window already passed"
            );
            MintOutcome::WindowMissed
        } else if expiration_secs <= self.target.as_secs() {
            // The node would reject it as expired at the target
            tracing::warn!(
                target_secs = self.target.as_secs(),
                expiration = expiration_secs,
                "Signed mint expires before its target"
            );
            MintOutcome::WindowMissed
        } else {
            let wait = self.target - now;
            tracing::info!(
                target_secs = self.target.as_secs(),
                wait_ms = wait.as_millis() as u64,
                "Mint armed"
            );

            tokio::select! {
                _ = tokio::time::sleep(wait) => {
                    let hash = self.submitter.submit(&self.signed).await?;
                    tracing::info!(hash = %hash, "Scheduled mint submitted");
                    MintOutcome::Submitted(hash)
                }
                _ = wait_for_shutdown(&mut shutdown) => {
                    tracing::info!("Scheduled mint cancelled");
                    MintOutcome::Cancelled
                }
            }
        };

        metrics::record_mint_outcome(outcome.label());
        Ok(outcome)
    }

    /// Run on its own task.
    pub fn spawn(self, shutdown: broadcast::Receiver<()>) -> JoinHandle<AptosResult<MintOutcome>> {
        tokio::spawn(self.run(shutdown))
    }
}

impl std::fmt::Debug for ScheduledMint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduledMint")
            .field("target", &self.target)
            .field("signed", &self.signed)
            .finish_non_exhaustive()
    }
}

/// Resolves on a shutdown signal. A closed channel never resolves.
async fn wait_for_shutdown(shutdown: &mut broadcast::Receiver<()>) {
    match shutdown.recv().await {
        Ok(()) | Err(RecvError::Lagged(_)) => {}
        Err(RecvError::Closed) => std::future::pending().await,
    }
}
