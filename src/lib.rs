//! # gearadmin
//!
//! A blocking administrative client for Gearman-compatible job servers:
//! - Line-oriented text protocol (status, version, workers, maxqueue,
//!   shutdown)
//! - One persistent TCP connection, one command outstanding at a time
//! - Cooperative polling with a configurable response timeout
//! - Order-based response correlation with explicit timeout recovery
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      AdminSession                            │
//! │        (blocking execute + convenience operations)           │
//! └──────────────┬──────────────────────────────┬───────────────┘
//!                │                              │
//!                ▼                              ▼
//!   ┌───────────────────────┐      ┌───────────────────────┐
//!   │   ConnectionDriver    │      │  AdminCommandHandler  │
//!   │  (socket + readiness  │─────▶│  (buffers + response  │
//!   │      poll loop)       │ feeds│    classification)    │
//!   └───────────────────────┘      └───────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use gearadmin::{AdminSession, Config};
//!
//! # fn main() -> gearadmin::Result<()> {
//! let config = Config::builder()
//!     .server_addr("127.0.0.1:4730")
//!     .build();
//!
//! let mut session = AdminSession::connect(&config)?;
//! let status = session.status()?;
//! print!("{}", status);
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;

pub mod network;
pub mod protocol;
pub mod session;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use config::Config;
pub use error::{AdminError, Result};
pub use protocol::{AdminCommand, AdminResponse, CommandType};
pub use session::AdminSession;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of gearadmin
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
