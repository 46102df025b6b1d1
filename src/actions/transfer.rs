//! Native coin transfers.

use crate::blockchain::sender::TxSender;
use crate::blockchain::transaction::{EntryFunction, MoveValue};
use crate::blockchain::types::{AccountAddress, AptosResult, GasParams};

const TRANSFER_FUNCTION: &str = "0x1::aptos_account::transfer";

/// Sends the native coin between accounts.
#[derive(Debug, Clone)]
pub struct Transfers {
    sender: TxSender,
    gas: GasParams,
}

impl Transfers {
    pub fn new(sender: TxSender, gas: GasParams) -> Self {
        Self { sender, gas }
    }

    /// Transfer `amount` base units to `receiver`. Returns the transaction hash.
    pub async fn transfer(&self, receiver: AccountAddress, amount: u64) -> AptosResult<String> {
        tracing::info!(receiver = %receiver, amount = amount, "Transferring");
        self.sender
            .send("transfer", transfer_entry(receiver, amount)?, self.gas)
            .await
    }
}

/// `0x1::aptos_account::transfer(receiver, amount)`.
pub fn transfer_entry(receiver: AccountAddress, amount: u64) -> AptosResult<EntryFunction> {
    EntryFunction::new(
        TRANSFER_FUNCTION.parse()?,
        vec![],
        &[MoveValue::Address(receiver), MoveValue::U64(amount)],
    )
}
