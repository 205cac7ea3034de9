//! Protocol codec
//!
//! Line framing helpers for the administrative text protocol.
//!
//! ## Wire Format
//!
//! Requests and responses are `\n`-terminated lines of UTF-8 text. Servers
//! answering multi-line commands terminate the block with a line containing
//! only [`RESPONSE_TERMINATOR`]. Some servers emit `\r\n`; the trailing `\r`
//! is tolerated and stripped wherever a line's content is inspected.

use bytes::{Bytes, BytesMut};

/// Line that terminates a multi-line response block
pub const RESPONSE_TERMINATOR: &str = ".";

/// Maximum bytes a single response line may occupy (64 KB)
///
/// A line longer than this means the peer is not speaking the
/// administrative protocol.
pub const MAX_LINE_SIZE: usize = 64 * 1024;

/// Encode a command line for transmission
///
/// Appends the protocol-mandated `\n` terminator.
pub fn encode_command_line(line: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(line.len() + 1);
    bytes.extend_from_slice(line.as_bytes());
    bytes.push(b'\n');
    bytes
}

/// Split one complete line (terminator included) off the front of `buf`
///
/// Returns `None` when no complete line has been buffered yet.
pub fn split_line(buf: &mut BytesMut) -> Option<Bytes> {
    let newline = buf.iter().position(|&b| b == b'\n')?;
    Some(buf.split_to(newline + 1).freeze())
}

/// Strip a trailing `\r\n` or `\n` from a line
pub fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}
