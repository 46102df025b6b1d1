//! Chain access: accounts, transactions, and the node client.
//!
//! # Data Flow
//! ```text
//! Private key (hex / environment)
//!     → account.rs (key, address derivation, signing)
//! Entry function + args
//!     → builder.rs (sequence number, chain id, expiration)
//!     → signer.rs (pure signing)
//!     → client.rs (POST /transactions, hash or API error)
//! sender.rs composes the three for every action component
//! ```
//!
//! # Security Constraints
//! - Never log private keys
//! - No automatic retries on submission

pub mod account;
pub mod builder;
pub mod client;
pub mod clock;
pub mod sender;
pub mod signer;
pub mod transaction;
pub mod types;

pub use account::Account;
pub use builder::TxBuilder;
pub use client::NodeClient;
pub use clock::{Clock, FixedClock, SystemClock};
pub use sender::TxSender;
pub use signer::{sign, TransactionSubmitter};
pub use transaction::{EntryFunction, FunctionId, MoveValue, RawTransaction, SignedTransaction, TypeTag};
pub use types::{AccountAddress, AptosError, AptosResult, ChainId};
