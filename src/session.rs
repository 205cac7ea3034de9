//! Administrative Session
//!
//! The blocking request/response core: sends one command at a time over one
//! connection and polls cooperatively until the correlated response arrives
//! or the timeout elapses.
//!
//! ## Correlation Model
//!
//! The administrative protocol has no request identifiers; the oldest
//! buffered response answers the oldest unanswered command. Correctness
//! therefore depends on strict one-at-a-time usage, which `execute` enforces
//! structurally: every call sends exactly one command and consumes (or times
//! out on) exactly one response before returning. The only way a command can
//! be left outstanding is a timeout, after which the session refuses further
//! commands until [`AdminSession::recover`] discards the stale state.

use std::time::Duration;

use crate::config::Config;
use crate::error::{AdminError, Result};
use crate::network::{AdminCommandHandler, ConnectionDriver, TcpDriver};
use crate::protocol::{AdminCommand, CommandType};

/// Blocking administrative session over a single server connection
///
/// Generic over the [`ConnectionDriver`] so tests can substitute a scripted
/// in-memory driver for the TCP one.
pub struct AdminSession<D: ConnectionDriver = TcpDriver> {
    /// I/O readiness collaborator
    driver: D,

    /// Buffering/classification collaborator, bound 1:1 to the connection
    handler: AdminCommandHandler,

    /// Default wait for a server response
    response_timeout: Duration,

    /// Set when a timeout leaves a command unanswered; cleared by `recover`
    correlation_lost: bool,
}

impl AdminSession<TcpDriver> {
    /// Connect to the server described by `config`
    pub fn connect(config: &Config) -> Result<Self> {
        let driver = TcpDriver::connect(config)?;
        Ok(Self::with_driver(driver, config))
    }
}

impl<D: ConnectionDriver> AdminSession<D> {
    /// Create a session over an already-established driver
    pub fn with_driver(driver: D, config: &Config) -> Self {
        Self {
            driver,
            handler: AdminCommandHandler::new(),
            response_timeout: config.response_timeout,
            correlation_lost: false,
        }
    }

    // =========================================================================
    // Command Execution
    // =========================================================================

    /// Execute a typed command with the session's default timeout
    pub fn execute(&mut self, command: &AdminCommand) -> Result<String> {
        self.execute_with_timeout(command, self.response_timeout)
    }

    /// Execute a typed command with an explicit timeout
    pub fn execute_with_timeout(
        &mut self,
        command: &AdminCommand,
        timeout: Duration,
    ) -> Result<String> {
        self.execute_raw(&command.format_line(), command.command_type(), timeout)
    }

    /// Execute a pre-formatted command line, expecting a response of
    /// `expected` type
    ///
    /// Blocks the calling thread for up to `timeout`:
    /// 1. Buffers the line (plus terminator) for transmission
    /// 2. Drives the connection's poll loop while the handler reports no
    ///    buffered response
    /// 3. On timeout with no response, fails with [`AdminError::Timeout`]
    ///    and poisons the session until [`AdminSession::recover`]
    /// 4. Otherwise pops the oldest response; a type other than `expected`
    ///    fails with [`AdminError::ResponseMismatch`] (response consumed)
    ///
    /// Exactly one outbound write; on success exactly one response consumed.
    /// Driver and handler errors propagate unmodified, and no retries are
    /// performed at this layer.
    pub fn execute_raw(
        &mut self,
        line: &str,
        expected: CommandType,
        timeout: Duration,
    ) -> Result<String> {
        if self.correlation_lost {
            return Err(AdminError::InvalidState(
                "Response correlation lost after a timeout; call recover() \
                 before issuing further commands"
                    .to_string(),
            ));
        }

        tracing::debug!("Executing {:?}, expecting {} response", line, expected);

        self.handler.send_text_command(line)?;
        self.wait_until_server_responds(expected, timeout)
    }

    /// Poll until the handler holds a response, then validate and return it
    fn wait_until_server_responds(
        &mut self,
        expected: CommandType,
        timeout: Duration,
    ) -> Result<String> {
        self.driver
            .poll_until(&mut self.handler, |h| !h.has_response(), timeout)?;

        if !self.handler.has_response() {
            tracing::warn!("No {} response within {:?}", expected, timeout);
            self.correlation_lost = true;
            return Err(AdminError::Timeout { timeout });
        }

        let (actual, payload) = self.handler.pop_response()?;
        if actual != expected {
            return Err(AdminError::ResponseMismatch { expected, actual });
        }

        Ok(payload)
    }

    // =========================================================================
    // Derived Convenience Operations
    // =========================================================================

    /// Query per-function queue and worker counts
    pub fn status(&mut self) -> Result<String> {
        self.execute(&AdminCommand::Status)
    }

    /// Query the server version
    pub fn version(&mut self) -> Result<String> {
        self.execute(&AdminCommand::Version)
    }

    /// List connected workers
    pub fn workers(&mut self) -> Result<String> {
        self.execute(&AdminCommand::Workers)
    }

    /// Cap the queue depth for a function
    pub fn max_queue(&mut self, task: &str, max_size: u32) -> Result<String> {
        self.execute(&AdminCommand::max_queue(task, max_size))
    }

    /// Request a server shutdown
    pub fn shutdown(&mut self, graceful: bool) -> Result<String> {
        self.execute(&AdminCommand::shutdown(graceful))
    }

    // =========================================================================
    // Recovery
    // =========================================================================

    /// Re-establish correlation after a timeout
    ///
    /// Discards every piece of stale handler state: queued output, unframed
    /// input, pending expectations, and partial multi-line blocks.
    ///
    /// This restores the session only when no late response remains in
    /// flight (e.g. the server is known to have dropped the command). Bytes
    /// that arrive on the wire after recovery are indistinguishable from the
    /// next command's response; if a late response may still be coming, drop
    /// the session and reconnect instead.
    pub fn recover(&mut self) {
        tracing::debug!("Recovering session correlation");
        self.handler.reset();
        self.correlation_lost = false;
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Whether a timeout has left the session awaiting recovery
    pub fn correlation_lost(&self) -> bool {
        self.correlation_lost
    }

    /// The session's default response timeout
    pub fn response_timeout(&self) -> Duration {
        self.response_timeout
    }

    /// Number of commands sent but not yet answered
    pub fn pending_commands(&self) -> usize {
        self.handler.pending_commands()
    }

    /// Number of completed responses buffered but not yet popped
    pub fn pending_responses(&self) -> usize {
        self.handler.pending_responses()
    }
}
