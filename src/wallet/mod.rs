//! Read-only wallet inspection.
//!
//! # Data Flow
//! ```text
//! GET /accounts/{addr}/resources
//!     → coin stores → symbol balances
//!     → TokenStore handle
//! GET .../events/0x3::token::TokenStore/deposit_events
//!     → dedup by token identity (first occurrence wins)
//!     → POST /tables/{handle}/item per identity
//!     → identities still held
//! ```

pub mod inspector;
pub mod types;

pub use inspector::{dedup_deposits, WalletInspector};
pub use types::{TokenDataId, TokenId};
