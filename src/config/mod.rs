//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ToolkitConfig (validated, immutable)
//!     → passed explicitly to each component
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - The token table is a value handed to components, not global state

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::ToolkitConfig;
pub use schema::{GasConfig, GasParams, MarketplaceConfig, NodeConfig, ObservabilityConfig};
pub use schema::{OracleConfig, SwapConfig, TokenConfig};
