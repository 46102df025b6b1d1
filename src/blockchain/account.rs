//! Account keys and address derivation.
//!
//! # Security
//! - Private keys are loaded from a hex string or an environment variable
//! - Keys are never logged or serialized

use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use sha3::{Digest, Sha3_256};

use crate::blockchain::types::{AccountAddress, AptosError, AptosResult};

/// Environment variable name for the private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "APTOS_PRIVATE_KEY";

/// Authentication scheme byte for single Ed25519 keys.
const ED25519_SCHEME: u8 = 0x00;

/// An Ed25519 account: signing key plus its derived address.
pub struct Account {
    signing_key: SigningKey,
    address: AccountAddress,
}

impl Account {
    /// Create an account from a hex-encoded 32-byte private key.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    pub fn from_private_key(private_key_hex: &str) -> AptosResult<Self> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let bytes = hex::decode(key_hex)
            .map_err(|e| AptosError::Account(format!("Invalid private key format: {}", e)))?;
        let secret: [u8; 32] = bytes.try_into().map_err(|_| {
            AptosError::Account("Invalid private key format: expected 32 bytes".to_string())
        })?;

        let account = Self::from_signing_key(SigningKey::from_bytes(&secret));

        tracing::info!(address = %account.address, "Account loaded");

        Ok(account)
    }

    /// Load the account from the `APTOS_PRIVATE_KEY` environment variable.
    pub fn from_env() -> AptosResult<Self> {
        let private_key = std::env::var(PRIVATE_KEY_ENV_VAR).map_err(|_| {
            AptosError::Account(format!("Environment variable {} not set", PRIVATE_KEY_ENV_VAR))
        })?;

        Self::from_private_key(&private_key)
    }

    pub fn from_signing_key(signing_key: SigningKey) -> Self {
        let address = derive_address(&signing_key.verifying_key());
        Self {
            signing_key,
            address,
        }
    }

    pub fn address(&self) -> AccountAddress {
        self.address
    }

    pub fn public_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Sign arbitrary bytes with the account key.
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.signing_key.sign(message)
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Derive the account address: SHA3-256(public key || scheme byte).
pub fn derive_address(public_key: &VerifyingKey) -> AccountAddress {
    let mut hasher = Sha3_256::new();
    hasher.update(public_key.as_bytes());
    hasher.update([ED25519_SCHEME]);
    AccountAddress(hasher.finalize().into())
}
