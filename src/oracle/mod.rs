//! Fiat price oracle and swap sizing.
//!
//! # Data Flow
//! ```text
//! symbol → client.rs (GET /fiat-prices?currencies=symbol) → f64 price
//! prices + token table → swap.rs (scaled input, minimum output)
//! ```
//!
//! Prices are read fresh for every swap; there is no cache and no staleness check.

pub mod client;
pub mod swap;

pub use client::{HttpPriceOracle, PriceOracle};
pub use swap::{compute_swap_amounts, SwapAmounts, TokenInfo, TokenTable};
