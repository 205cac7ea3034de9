//! Command Handler
//!
//! Owns the per-connection send/receive buffers and classifies buffered
//! server output into typed responses.
//!
//! The administrative protocol has no request identifiers, so the handler
//! keeps a FIFO of the command types it has sent; incoming lines are framed
//! according to the oldest unanswered command (single-line vs. `.`-terminated
//! multi-line) and completed responses queue up oldest-first.

use std::collections::VecDeque;

use bytes::BytesMut;

use crate::error::{AdminError, Result};
use crate::protocol::{
    encode_command_line, split_line, strip_line_ending, AdminResponse, CommandType, MAX_LINE_SIZE,
    RESPONSE_TERMINATOR,
};

/// First token of a server-side error report line (`ERR <code> <text>`)
const ERROR_LINE_TOKEN: &str = "ERR";

/// Whether a line is a server error report
fn is_error_line(content: &str) -> bool {
    content.split_whitespace().next() == Some(ERROR_LINE_TOKEN)
}

/// Buffers and classifies traffic for a single connection
pub struct AdminCommandHandler {
    /// Raw bytes queued for transmission
    outbound: Vec<u8>,

    /// Received bytes not yet framed into complete lines
    inbound: BytesMut,

    /// Command types awaiting a response, oldest first
    expected: VecDeque<CommandType>,

    /// Lines of an in-progress multi-line response block
    partial: String,

    /// Completed responses, oldest first
    responses: VecDeque<AdminResponse>,
}

impl AdminCommandHandler {
    /// Create a handler with empty buffers
    pub fn new() -> Self {
        Self {
            outbound: Vec::new(),
            inbound: BytesMut::with_capacity(4096),
            expected: VecDeque::new(),
            partial: String::new(),
            responses: VecDeque::new(),
        }
    }

    // =========================================================================
    // Outbound
    // =========================================================================

    /// Buffer a command line for transmission
    ///
    /// Classifies the verb so the eventual response can be framed; rejects
    /// lines whose verb the server does not understand.
    pub fn send_text_command(&mut self, line: &str) -> Result<()> {
        let command_type = CommandType::classify_line(line).ok_or_else(|| {
            AdminError::Protocol(format!("Attempted to send an unknown server command: {:?}", line))
        })?;

        tracing::debug!("Queueing command {:?} ({})", line, command_type);

        self.expected.push_back(command_type);
        self.outbound.extend_from_slice(&encode_command_line(line));
        Ok(())
    }

    /// Remove and return all bytes queued for transmission
    ///
    /// Returns `None` when nothing is pending.
    pub fn take_outbound(&mut self) -> Option<Vec<u8>> {
        if self.outbound.is_empty() {
            return None;
        }
        Some(std::mem::take(&mut self.outbound))
    }

    // =========================================================================
    // Inbound
    // =========================================================================

    /// Feed received bytes into the handler
    ///
    /// Frames complete lines and classifies them against the oldest
    /// unanswered command. Fails if the server sends data with no command
    /// outstanding, or sends a line the protocol cannot produce.
    pub fn receive_data(&mut self, bytes: &[u8]) -> Result<()> {
        self.inbound.extend_from_slice(bytes);

        while let Some(raw_line) = split_line(&mut self.inbound) {
            let line = std::str::from_utf8(&raw_line).map_err(|e| {
                AdminError::Protocol(format!("Response line is not valid UTF-8: {}", e))
            })?;
            self.receive_line(line)?;
        }

        // A partial line larger than any legal response line means the peer
        // is not speaking this protocol.
        if self.inbound.len() > MAX_LINE_SIZE {
            return Err(AdminError::Protocol(format!(
                "Response line exceeds {} bytes without a terminator",
                MAX_LINE_SIZE
            )));
        }

        Ok(())
    }

    /// Classify one complete raw line (terminator included)
    fn receive_line(&mut self, raw_line: &str) -> Result<()> {
        let expected = match self.expected.front() {
            Some(t) => *t,
            None => {
                return Err(AdminError::Protocol(format!(
                    "Received an unexpected server response: {:?}",
                    strip_line_ending(raw_line)
                )))
            }
        };

        tracing::trace!("Received line for {}: {:?}", expected, raw_line);

        if expected.is_multiline() {
            let content = strip_line_ending(raw_line);

            // A server error report arrives as a single ERR line even for
            // multi-line commands and ends the response immediately.
            let block_done = content == RESPONSE_TERMINATOR
                || (self.partial.is_empty() && is_error_line(content));

            self.partial.push_str(raw_line);
            if block_done {
                let payload = std::mem::take(&mut self.partial);
                self.complete_response(payload);
            }
        } else {
            self.complete_response(strip_line_ending(raw_line).to_string());
        }

        Ok(())
    }

    /// Move the oldest expectation into the completed-response queue
    fn complete_response(&mut self, payload: String) {
        // Guarded by receive_line: an expectation is always queued here.
        if let Some(command_type) = self.expected.pop_front() {
            tracing::debug!("Completed {} response ({} bytes)", command_type, payload.len());
            self.responses.push_back(AdminResponse::new(command_type, payload));
        }
    }

    // =========================================================================
    // Response Queue
    // =========================================================================

    /// Whether at least one completed response is buffered
    pub fn has_response(&self) -> bool {
        !self.responses.is_empty()
    }

    /// Remove and return the oldest completed response
    ///
    /// Fails if called with no response available.
    pub fn pop_response(&mut self) -> Result<(CommandType, String)> {
        self.responses
            .pop_front()
            .map(AdminResponse::into_parts)
            .ok_or_else(|| {
                AdminError::InvalidState(
                    "Attempted to pop a response that is not ready".to_string(),
                )
            })
    }

    /// Number of commands sent but not yet answered
    pub fn pending_commands(&self) -> usize {
        self.expected.len()
    }

    /// Number of completed responses waiting to be popped
    pub fn pending_responses(&self) -> usize {
        self.responses.len()
    }

    /// Discard all buffered state: queued output, unframed input, pending
    /// expectations, partial blocks, and completed responses
    ///
    /// Used to re-establish correlation after a timeout.
    pub fn reset(&mut self) {
        let dropped = self.expected.len() + self.responses.len();
        if dropped > 0 {
            tracing::debug!(
                "Discarding {} stale expectation(s)/response(s)",
                dropped
            );
        }
        self.outbound.clear();
        self.inbound.clear();
        self.expected.clear();
        self.partial.clear();
        self.responses.clear();
    }
}

impl Default for AdminCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
