//! Aptos client automation toolkit.
//!
//! Builds, signs, and submits entry function transactions over the node REST
//! API: transfers, Liquidswap swaps, NFT mints (immediate or timed), and
//! marketplace listings, plus read-only wallet inspection.
//!
//! # Architecture Overview
//!
//! ```text
//!   actions / mint ──▶ blockchain::TxSender ──▶ builder ──▶ signer ──▶ client ──▶ Node
//!        │                                                                    ▲
//!        └──▶ oracle (fiat prices, swap sizing)                               │
//!   wallet ───────────────────────────────────────────────────────────────────┘
//!
//!   config / observability / lifecycle: cross-cutting
//! ```

// Core subsystems
pub mod blockchain;
pub mod config;
pub mod oracle;

// Components
pub mod actions;
pub mod mint;
pub mod toolkit;
pub mod wallet;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use blockchain::{Account, AptosError, AptosResult, NodeClient, TxSender};
pub use config::ToolkitConfig;
pub use lifecycle::Shutdown;
pub use toolkit::Toolkit;
