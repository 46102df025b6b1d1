//! Lifecycle management.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Logging → Metrics endpoint (optional)
//!
//! Shutdown (shutdown.rs):
//!     trigger() → every subscriber's recv() resolves → waits abort cleanly
//!
//! Signals (signals.rs):
//!     Ctrl-C → Shutdown::trigger
//! ```
//!
//! # Design Decisions
//! - One broadcast coordinator per process
//! - A scheduled mint waiting on its target returns `Cancelled` on shutdown

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use signals::shutdown_on_ctrl_c;
pub use startup::init_observability;
