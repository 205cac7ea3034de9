//! Response definitions
//!
//! Represents classified responses from the server.

use super::CommandType;

/// A classified server response
///
/// The payload is opaque text: for single-line responses the line with its
/// terminator stripped, for multi-line responses the raw block exactly as
/// received, including the final `.` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminResponse {
    /// The command type this response answers
    pub command_type: CommandType,

    /// Raw response payload
    pub payload: String,
}

impl AdminResponse {
    /// Create a new response
    pub fn new(command_type: CommandType, payload: impl Into<String>) -> Self {
        Self {
            command_type,
            payload: payload.into(),
        }
    }

    /// Split into the (type, payload) pair handed back to callers
    pub fn into_parts(self) -> (CommandType, String) {
        (self.command_type, self.payload)
    }
}
