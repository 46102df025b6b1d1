//! NFT minting, immediate or timed.
//!
//! # Data Flow
//! ```text
//! MintProfile + quantity
//!     → Minter::prepare (build + sign once)      → PreparedMint
//!     → PreparedMint::arm(target)                → ScheduledMint (armed)
//!     → ScheduledMint::run                        → MintOutcome (fired)
//! ```
//!
//! # Design Decisions
//! - The transaction is signed before the wait; only the POST is deferred
//! - A target already in the past is a terminal outcome, not an error
//! - The wait is cancelled by the shutdown broadcast

pub mod minter;
pub mod profile;
pub mod scheduled;

pub use minter::{Minter, PreparedMint};
pub use profile::MintProfile;
pub use scheduled::{MintOutcome, ScheduledMint};
