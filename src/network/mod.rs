//! Network Module
//!
//! Connection driving and per-connection command handling.
//!
//! ## Architecture
//! - `AdminCommandHandler` owns the per-connection buffers and classifies
//!   server output into typed responses
//! - `ConnectionDriver` owns the socket and the readiness/poll loop
//! - The session layer composes the two; neither knows about the other's
//!   internals beyond these seams

mod driver;
mod handler;

pub use driver::{ConnectionDriver, TcpDriver};
pub use handler::AdminCommandHandler;
