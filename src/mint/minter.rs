//! Building and signing mints.

use std::time::Duration;

use crate::blockchain::clock::Clock;
use crate::blockchain::sender::TxSender;
use crate::blockchain::transaction::SignedTransaction;
use crate::blockchain::types::{AptosResult, GasParams};
use crate::mint::profile::MintProfile;
use crate::mint::scheduled::ScheduledMint;

/// Builds, signs, and submits mint transactions for one account.
#[derive(Debug, Clone)]
pub struct Minter {
    sender: TxSender,
    gas: GasParams,
}

impl Minter {
    pub fn new(sender: TxSender, gas: GasParams) -> Self {
        Self { sender, gas }
    }

    pub fn with_gas(mut self, gas: GasParams) -> Self {
        self.gas = gas;
        self
    }

    /// Build and sign a mint now; nothing is submitted.
    pub async fn prepare(&self, profile: &MintProfile, quantity: u64) -> AptosResult<PreparedMint> {
        let now = self.sender.builder().clock().now_secs();
        self.prepare_for(profile, quantity, now).await
    }

    /// Build and sign a mint whose expiration window opens at `valid_from_secs`.
    async fn prepare_for(
        &self,
        profile: &MintProfile,
        quantity: u64,
        valid_from_secs: u64,
    ) -> AptosResult<PreparedMint> {
        let signed = self
            .sender
            .prepare_at(profile.entry(quantity)?, self.gas, valid_from_secs)
            .await?;

        tracing::info!(
            function = %profile.function_id(),
            quantity = quantity,
            sequence_number = signed.raw_transaction().sequence_number,
            expiration = signed.raw_transaction().expiration_timestamp_secs,
            "Mint prepared"
        );

        Ok(PreparedMint { signed })
    }

    /// Mint immediately. Returns the transaction hash.
    pub async fn mint_now(&self, profile: &MintProfile, quantity: u64) -> AptosResult<String> {
        self.sender.send("mint", profile.entry(quantity)?, self.gas).await
    }

    /// Prepare a mint and arm it for `target_secs` (Unix time).
    ///
    /// The expiration counts from the target, so a long wait does not outlive it.
    pub async fn schedule(
        &self,
        profile: &MintProfile,
        quantity: u64,
        target_secs: u64,
    ) -> AptosResult<ScheduledMint> {
        let prepared = self.prepare_for(profile, quantity, target_secs).await?;
        Ok(ScheduledMint::new(
            prepared,
            Duration::from_secs(target_secs),
            self.sender.submitter(),
            self.sender.builder().clock(),
        ))
    }
}

/// A built and signed mint that has not been submitted.
#[derive(Debug, Clone)]
pub struct PreparedMint {
    signed: SignedTransaction,
}

impl PreparedMint {
    pub fn new(signed: SignedTransaction) -> Self {
        Self { signed }
    }

    pub fn signed(&self) -> &SignedTransaction {
        &self.signed
    }

    pub(crate) fn into_signed(self) -> SignedTransaction {
        self.signed
    }
}
