//! Fake MailMind backend for integration testing
//!
//! This module provides an in-process HTTP server that speaks enough
//! HTTP/1.1 to exercise the transport and session end-to-end:
//!
//! TCP accept -> parse request line + headers + body -> scripted response
//!
//! ## Module layout
//!
//! - `server` -- TCP listener, connection handling, hit counters
//! - `script` -- scripted per-route behaviors and the builder
//! - `http` -- minimal request parsing and response writing

mod http;
pub mod script;
mod server;

pub use script::{Behavior, ScriptBuilder};
pub use server::FakeApiServer;
