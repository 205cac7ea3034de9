//! Protocol Module
//!
//! Defines the administrative text protocol spoken with the job server.
//!
//! ## Protocol Format (Line-Oriented Text)
//!
//! ### Request Format
//! ```text
//! ┌─────────┬──────────────────────┬──────┐
//! │  verb   │  space-joined args   │ "\n" │
//! └─────────┴──────────────────────┴──────┘
//! ```
//!
//! ### Commands
//! - `status`            - per-function queue counts (multi-line response)
//! - `workers`           - connected worker list (multi-line response)
//! - `version`           - server version (single-line response)
//! - `maxqueue fn size`  - cap a function's queue depth (single-line response)
//! - `shutdown [graceful]` - stop the server (single-line response)
//!
//! ### Response Format
//! Single-line responses are one `\n`-terminated line. Multi-line responses
//! are a block of lines terminated by a line containing only `.`:
//! ```text
//! ┌────────────────────┐
//! │ func\t5\t2\t3\n    │
//! │ ...\n              │
//! │ .\n                │
//! └────────────────────┘
//! ```
//!
//! Server errors are reported as a single line starting with `ERR`.
//!
//! The protocol carries no request identifiers; responses are correlated to
//! commands purely by order of issue.

mod codec;
mod command;
mod response;

pub use codec::{
    encode_command_line, split_line, strip_line_ending, MAX_LINE_SIZE, RESPONSE_TERMINATOR,
};
pub use command::{AdminCommand, CommandType};
pub use response::AdminResponse;
