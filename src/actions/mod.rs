//! Transaction-producing actions.
//!
//! Each component is composed with a [`TxSender`](crate::blockchain::TxSender)
//! and owns only the knowledge of which entry function to call and how to
//! encode its arguments.

pub mod marketplace;
pub mod swap;
pub mod transfer;

pub use marketplace::{BlueMoveMarket, Listing, TopazMarket};
pub use swap::LiquidSwap;
pub use transfer::Transfers;
