//! Command definitions
//!
//! Represents administrative commands sent to the server.

use std::fmt;

/// Administrative command verbs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Status,
    Version,
    Workers,
    MaxQueue,
    Shutdown,
}

impl CommandType {
    /// All known verbs, used for classification
    pub const ALL: [CommandType; 5] = [
        CommandType::Status,
        CommandType::Version,
        CommandType::Workers,
        CommandType::MaxQueue,
        CommandType::Shutdown,
    ];

    /// The protocol verb for this command type
    pub fn verb(&self) -> &'static str {
        match self {
            CommandType::Status => "status",
            CommandType::Version => "version",
            CommandType::Workers => "workers",
            CommandType::MaxQueue => "maxqueue",
            CommandType::Shutdown => "shutdown",
        }
    }

    /// Whether the server answers this command with a multi-line block
    /// terminated by a lone `.` line (vs. a single line)
    pub fn is_multiline(&self) -> bool {
        matches!(self, CommandType::Status | CommandType::Workers)
    }

    /// Classify a command line by its first whitespace-delimited token
    ///
    /// Returns `None` for verbs the server does not understand.
    pub fn classify_line(line: &str) -> Option<CommandType> {
        let verb = line.split_whitespace().next()?;
        CommandType::ALL.iter().copied().find(|t| t.verb() == verb)
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// A typed administrative command
///
/// Immutable once constructed; lives for the duration of one
/// request/response cycle.
#[derive(Debug, Clone)]
pub enum AdminCommand {
    /// Query per-function queue and worker counts
    Status,

    /// Query the server version
    Version,

    /// List connected workers
    Workers,

    /// Cap the queue depth for a function
    MaxQueue { task: String, max_size: u32 },

    /// Request a server shutdown
    Shutdown { graceful: bool },
}

impl AdminCommand {
    /// Build a MAXQUEUE command
    pub fn max_queue(task: impl Into<String>, max_size: u32) -> Self {
        AdminCommand::MaxQueue {
            task: task.into(),
            max_size,
        }
    }

    /// Build a SHUTDOWN command
    pub fn shutdown(graceful: bool) -> Self {
        AdminCommand::Shutdown { graceful }
    }

    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            AdminCommand::Status => CommandType::Status,
            AdminCommand::Version => CommandType::Version,
            AdminCommand::Workers => CommandType::Workers,
            AdminCommand::MaxQueue { .. } => CommandType::MaxQueue,
            AdminCommand::Shutdown { .. } => CommandType::Shutdown,
        }
    }

    /// Format the protocol line for this command (verb plus space-joined
    /// arguments, without the line terminator)
    pub fn format_line(&self) -> String {
        match self {
            AdminCommand::Status => "status".to_string(),
            AdminCommand::Version => "version".to_string(),
            AdminCommand::Workers => "workers".to_string(),
            AdminCommand::MaxQueue { task, max_size } => {
                format!("maxqueue {} {}", task, max_size)
            }
            AdminCommand::Shutdown { graceful: true } => "shutdown graceful".to_string(),
            AdminCommand::Shutdown { graceful: false } => "shutdown".to_string(),
        }
    }
}
