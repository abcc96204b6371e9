//! MailMind client core
//!
//! The session and transport core of an AI-assisted email client:
//! a bounded-retry HTTP [`Transport`], a [`MailBackend`] seam with
//! live ([`HttpBackend`]) and demo ([`DemoBackend`]) implementations,
//! and the in-memory [`MailboxSession`] holding the message list and
//! selection the UI renders.
//!
//! Rendering, the mock data beyond demo mode, and the language-model
//! backend itself are external collaborators; nothing here persists
//! past the session.

mod assistant;
mod backend;
mod config;
mod demo;
mod error;
mod message;
mod session;
mod transport;

pub use assistant::{AssistantTask, Tone};
pub use backend::{HttpBackend, MailBackend};
pub use config::ClientConfig;
pub use demo::{DemoBackend, sample_messages};
pub use error::{Error, Result};
pub use message::{Category, Message, Sentiment, Urgency};
pub use session::{Filter, MailboxSession};
pub use transport::Transport;
