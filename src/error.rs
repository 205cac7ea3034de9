//! Error types for gearadmin
//!
//! Provides a unified error type for all operations.

use std::time::Duration;
use thiserror::Error;

use crate::protocol::CommandType;

/// Result type alias using AdminError
pub type Result<T> = std::result::Result<T, AdminError>;

/// Unified error type for gearadmin operations
#[derive(Debug, Error)]
pub enum AdminError {
    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Connection closed by server")]
    ConnectionClosed,

    // -------------------------------------------------------------------------
    // Correlation Errors
    // -------------------------------------------------------------------------
    #[error("No response within {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("Received an unexpected response: got {actual}, expecting {expected}")]
    ResponseMismatch {
        expected: CommandType,
        actual: CommandType,
    },

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Session State Errors
    // -------------------------------------------------------------------------
    #[error("Invalid session state: {0}")]
    InvalidState(String),
}
