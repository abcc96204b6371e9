//! Backend seam between the session and the mail service
//!
//! The session talks to a [`MailBackend`], never to HTTP directly.
//! [`HttpBackend`] implements the trait against the live service;
//! [`DemoBackend`](crate::demo::DemoBackend) implements it over an
//! in-memory store. Which one a session gets is a pure environment
//! switch made at construction time.

use crate::assistant::AssistantTask;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::message::Message;
use crate::transport::Transport;
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::debug;

/// Operations the mailbox session requires from a backend.
///
/// All methods take `&self`: a backend is shared between concurrent
/// in-flight operations and must not require exclusive access.
pub trait MailBackend {
    /// Trigger a server-side pull of new mail. The response carries
    /// no meaningful payload beyond success/failure.
    fn sync(&self) -> impl Future<Output = Result<()>>;

    /// Fetch the current message collection.
    fn list(&self) -> impl Future<Output = Result<Vec<Message>>>;

    /// Batch delete by remote id. Returns the count the backend
    /// reports as deleted.
    fn delete(&self, remote_ids: &[String]) -> impl Future<Output = Result<usize>>;

    /// Batch move to a label by remote id. Returns the count moved.
    fn move_to_label(
        &self,
        remote_ids: &[String],
        label_id: &str,
    ) -> impl Future<Output = Result<usize>>;

    /// Forward an assistant task and return the resulting text
    /// verbatim.
    fn assistant(&self, task: &AssistantTask) -> impl Future<Output = Result<String>>;
}

// Endpoint paths owned by the external service.
const SYNC_MAIL: &str = "/gmail/fetch";
const LIST_MAIL: &str = "/gmail/list";
const DELETE_MAIL: &str = "/gmail/delete";
const MOVE_MAIL: &str = "/gmail/move";
const ASSISTANT_SUMMARIZE: &str = "/assistant/gemini/summarize";
const ASSISTANT_ACTIONS: &str = "/assistant/gemini/actions";
const ASSISTANT_REWRITE: &str = "/assistant/gemini/rewrite";
const ASSISTANT_REPLY: &str = "/assistant/reply";

#[derive(Deserialize)]
struct ListResponse {
    emails: Vec<Message>,
}

#[derive(Serialize)]
struct DeleteRequest<'a> {
    gmail_ids: &'a [String],
}

#[derive(Deserialize)]
struct DeleteResponse {
    deleted: usize,
}

#[derive(Serialize)]
struct MoveRequest<'a> {
    gmail_ids: &'a [String],
    label_id: &'a str,
}

#[derive(Deserialize)]
struct MoveResponse {
    moved: usize,
}

#[derive(Serialize)]
struct PromptRequest<'a> {
    prompt: &'a str,
}

#[derive(Serialize)]
struct RewriteRequest<'a> {
    text: &'a str,
    tone: &'a str,
}

#[derive(Debug, Deserialize)]
struct AssistantResponse {
    reply: String,
}

/// Live backend over the HTTP [`Transport`].
pub struct HttpBackend {
    transport: Transport,
}

impl HttpBackend {
    /// Build a live backend from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            transport: Transport::new(config)?,
        })
    }

    /// Wrap an existing transport.
    #[must_use]
    pub const fn from_transport(transport: Transport) -> Self {
        Self { transport }
    }
}

impl MailBackend for HttpBackend {
    async fn sync(&self) -> Result<()> {
        // Success/failure is all that matters here; the body shape
        // varies between deployments.
        let _: serde_json::Value = self.transport.get_json(SYNC_MAIL).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Message>> {
        let response: ListResponse = self.transport.get_json(LIST_MAIL).await?;
        debug!("Listed {} messages", response.emails.len());
        Ok(response.emails)
    }

    async fn delete(&self, remote_ids: &[String]) -> Result<usize> {
        let request = DeleteRequest {
            gmail_ids: remote_ids,
        };
        let response: DeleteResponse = self.transport.post_json(DELETE_MAIL, &request).await?;
        Ok(response.deleted)
    }

    async fn move_to_label(&self, remote_ids: &[String], label_id: &str) -> Result<usize> {
        let request = MoveRequest {
            gmail_ids: remote_ids,
            label_id,
        };
        let response: MoveResponse = self.transport.post_json(MOVE_MAIL, &request).await?;
        Ok(response.moved)
    }

    async fn assistant(&self, task: &AssistantTask) -> Result<String> {
        let response: AssistantResponse = match task {
            AssistantTask::Summarize { prompt } => {
                self.transport
                    .post_json(ASSISTANT_SUMMARIZE, &PromptRequest { prompt })
                    .await?
            }
            AssistantTask::ExtractActions { prompt } => {
                self.transport
                    .post_json(ASSISTANT_ACTIONS, &PromptRequest { prompt })
                    .await?
            }
            AssistantTask::Rewrite { text, tone } => {
                self.transport
                    .post_json(
                        ASSISTANT_REWRITE,
                        &RewriteRequest {
                            text,
                            tone: tone.as_str(),
                        },
                    )
                    .await?
            }
            AssistantTask::DraftReply { prompt } => {
                self.transport
                    .post_json(ASSISTANT_REPLY, &PromptRequest { prompt })
                    .await?
            }
        };
        Ok(response.reply)
    }
}
