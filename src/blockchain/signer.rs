//! Signing and the shared submission capability.

use async_trait::async_trait;

use crate::blockchain::account::Account;
use crate::blockchain::transaction::{
    Ed25519PublicKey, Ed25519Signature, RawTransaction, SignedTransaction, TransactionAuthenticator,
};
use crate::blockchain::types::AptosResult;

/// Something that can put a signed transaction on chain.
///
/// Implementations perform exactly one network write per call and never retry:
/// a blind resend is unsafe once the sequence number may have been consumed.
#[async_trait]
pub trait TransactionSubmitter: Send + Sync {
    /// Submit and return the transaction hash.
    async fn submit(&self, signed: &SignedTransaction) -> AptosResult<String>;
}

/// Sign a raw transaction with the account key. No network access.
pub fn sign(raw: RawTransaction, account: &Account) -> AptosResult<SignedTransaction> {
    let message = raw.signing_message()?;
    let signature = account.sign(&message);

    let authenticator = TransactionAuthenticator::Ed25519 {
        public_key: Ed25519PublicKey(account.public_key().to_bytes()),
        signature: Ed25519Signature(signature.to_bytes()),
    };

    Ok(SignedTransaction::new(raw, authenticator))
}
