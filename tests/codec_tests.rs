//! Codec Tests
//!
//! Tests for command formatting, verb classification, and line framing.

use bytes::BytesMut;
use gearadmin::protocol::{
    encode_command_line, split_line, strip_line_ending, AdminCommand, CommandType,
};

// =============================================================================
// Command Formatting Tests
// =============================================================================

#[test]
fn test_format_status() {
    assert_eq!(AdminCommand::Status.format_line(), "status");
}

#[test]
fn test_format_version() {
    assert_eq!(AdminCommand::Version.format_line(), "version");
}

#[test]
fn test_format_workers() {
    assert_eq!(AdminCommand::Workers.format_line(), "workers");
}

#[test]
fn test_format_maxqueue() {
    let cmd = AdminCommand::max_queue("resize_image", 32);
    assert_eq!(cmd.format_line(), "maxqueue resize_image 32");
}

#[test]
fn test_format_shutdown_graceful() {
    assert_eq!(
        AdminCommand::shutdown(true).format_line(),
        "shutdown graceful"
    );
}

#[test]
fn test_format_shutdown_immediate() {
    assert_eq!(AdminCommand::shutdown(false).format_line(), "shutdown");
}

#[test]
fn test_command_types() {
    assert_eq!(AdminCommand::Status.command_type(), CommandType::Status);
    assert_eq!(AdminCommand::Version.command_type(), CommandType::Version);
    assert_eq!(AdminCommand::Workers.command_type(), CommandType::Workers);
    assert_eq!(
        AdminCommand::max_queue("t", 1).command_type(),
        CommandType::MaxQueue
    );
    assert_eq!(
        AdminCommand::shutdown(true).command_type(),
        CommandType::Shutdown
    );
}

// =============================================================================
// Verb Classification Tests
// =============================================================================

#[test]
fn test_classify_bare_verbs() {
    assert_eq!(CommandType::classify_line("status"), Some(CommandType::Status));
    assert_eq!(CommandType::classify_line("version"), Some(CommandType::Version));
    assert_eq!(CommandType::classify_line("workers"), Some(CommandType::Workers));
}

#[test]
fn test_classify_verbs_with_args() {
    assert_eq!(
        CommandType::classify_line("maxqueue resize_image 32"),
        Some(CommandType::MaxQueue)
    );
    assert_eq!(
        CommandType::classify_line("shutdown graceful"),
        Some(CommandType::Shutdown)
    );
}

#[test]
fn test_classify_unknown_verb() {
    assert_eq!(CommandType::classify_line("frobnicate"), None);
    assert_eq!(CommandType::classify_line(""), None);
}

#[test]
fn test_classify_is_token_based() {
    // "statusx" is not "status"; the whole first token must match
    assert_eq!(CommandType::classify_line("statusx"), None);
}

#[test]
fn test_multiline_shapes() {
    assert!(CommandType::Status.is_multiline());
    assert!(CommandType::Workers.is_multiline());
    assert!(!CommandType::Version.is_multiline());
    assert!(!CommandType::MaxQueue.is_multiline());
    assert!(!CommandType::Shutdown.is_multiline());
}

// =============================================================================
// Line Framing Tests
// =============================================================================

#[test]
fn test_encode_appends_terminator() {
    assert_eq!(encode_command_line("status"), b"status\n");
    assert_eq!(
        encode_command_line("maxqueue resize_image 32"),
        b"maxqueue resize_image 32\n"
    );
}

#[test]
fn test_split_line_complete() {
    let mut buf = BytesMut::from(&b"OK\nleftover"[..]);
    let line = split_line(&mut buf).unwrap();
    assert_eq!(&line[..], b"OK\n");
    assert_eq!(&buf[..], b"leftover");
}

#[test]
fn test_split_line_incomplete() {
    let mut buf = BytesMut::from(&b"partial line without terminator"[..]);
    assert!(split_line(&mut buf).is_none());
    // Buffer untouched
    assert_eq!(&buf[..], b"partial line without terminator");
}

#[test]
fn test_split_line_multiple() {
    let mut buf = BytesMut::from(&b"one\ntwo\nthree\n"[..]);
    assert_eq!(&split_line(&mut buf).unwrap()[..], b"one\n");
    assert_eq!(&split_line(&mut buf).unwrap()[..], b"two\n");
    assert_eq!(&split_line(&mut buf).unwrap()[..], b"three\n");
    assert!(split_line(&mut buf).is_none());
}

#[test]
fn test_split_line_empty_line() {
    let mut buf = BytesMut::from(&b"\n"[..]);
    assert_eq!(&split_line(&mut buf).unwrap()[..], b"\n");
}

#[test]
fn test_strip_line_ending() {
    assert_eq!(strip_line_ending("OK\n"), "OK");
    assert_eq!(strip_line_ending("OK\r\n"), "OK");
    assert_eq!(strip_line_ending("OK"), "OK");
    assert_eq!(strip_line_ending("\n"), "");
}
