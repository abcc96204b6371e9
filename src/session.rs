//! Mailbox session state
//!
//! Holds the authoritative local view of the mailbox: the ordered
//! message list and the set of selected remote ids. Every mutation
//! goes through the backend first and is applied locally only at the
//! completion point, all-or-nothing; no operation leaves the session
//! partially updated.
//!
//! Concurrent refreshes are not deduplicated. The convenience
//! [`MailboxSession::refresh`] awaits inline, but a driver may hold
//! several fetches in flight via [`MailboxSession::begin_refresh`]
//! and apply results as they arrive with
//! [`MailboxSession::complete_refresh`]; whichever response is
//! applied last determines `messages`. There are no request ordering
//! tokens and no cancellation; the transport timeout is the only
//! bound on an outstanding call.

use crate::assistant::AssistantTask;
use crate::backend::MailBackend;
use crate::error::Result;
use crate::message::{Category, Message, Urgency};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info};

/// A display filter over the loaded messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Everything except spam and trash.
    Inbox,
    /// High-urgency messages only.
    Urgent,
    /// A single category.
    Category(Category),
}

impl Filter {
    fn matches(&self, message: &Message) -> bool {
        match self {
            Self::Inbox => !matches!(message.category.as_str(), "Spam" | "Trash"),
            Self::Urgent => message.urgency == Urgency::High,
            Self::Category(category) => message.category == *category,
        }
    }
}

/// In-memory mailbox state over a [`MailBackend`].
///
/// The session owns no ambient state: construct one explicitly and
/// pass it by reference to whatever owns the UI loop.
pub struct MailboxSession<B: MailBackend> {
    backend: Arc<B>,
    messages: Vec<Message>,
    selected: HashSet<String>,
    loading: bool,
    assistant_busy: bool,
}

impl<B: MailBackend> MailboxSession<B> {
    /// Create an empty session over the given backend.
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
            messages: Vec::new(),
            selected: HashSet::new(),
            loading: false,
            assistant_busy: false,
        }
    }

    /// The currently loaded messages, in load order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The currently selected remote ids.
    #[must_use]
    pub const fn selected(&self) -> &HashSet<String> {
        &self.selected
    }

    /// Whether a refresh is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether an assistant call is in flight.
    #[must_use]
    pub const fn is_assistant_busy(&self) -> bool {
        self.assistant_busy
    }

    /// Sync server-side, fetch the full list, and replace `messages`
    /// wholesale. Selection is intersected with the surviving ids at
    /// completion. On failure nothing is touched and the error is
    /// surfaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the sync or list call fails.
    pub async fn refresh(&mut self) -> Result<&[Message]> {
        let fetch = self.begin_refresh();
        let result = fetch.await;
        self.complete_refresh(result)?;
        Ok(&self.messages)
    }

    /// Start an independent refresh fetch and mark the session
    /// loading.
    ///
    /// The returned future is detached from the session borrow, so a
    /// caller may hold several in flight at once; each one is a fresh
    /// request (no deduplication, no lock). Apply the outcome with
    /// [`MailboxSession::complete_refresh`].
    pub fn begin_refresh(&mut self) -> impl Future<Output = Result<Vec<Message>>> + use<B> {
        self.loading = true;
        debug!("Refreshing mailbox");
        let backend = Arc::clone(&self.backend);
        async move {
            backend.sync().await?;
            backend.list().await
        }
    }

    /// Apply the outcome of a refresh fetch.
    ///
    /// On success `messages` is replaced wholesale and any selected id
    /// no longer present is dropped. On failure the previous state
    /// stays visible. Either way the loading flag clears. When
    /// several refreshes are in flight, the last-applied response
    /// wins.
    ///
    /// # Errors
    ///
    /// Returns the fetch error unchanged, with local state untouched.
    pub fn complete_refresh(&mut self, result: Result<Vec<Message>>) -> Result<()> {
        self.loading = false;
        let messages = result?;
        info!("Mailbox refreshed: {} messages", messages.len());
        self.messages = messages;
        let loaded: HashSet<&str> = self.messages.iter().map(|m| m.remote_id.as_str()).collect();
        self.selected.retain(|id| loaded.contains(id.as_str()));
        Ok(())
    }

    /// Flip membership of `remote_id` in the selection.
    ///
    /// Always succeeds, even for an id not currently loaded; a stale
    /// selection is tolerated until the next refresh or delete pass
    /// reconciles it.
    pub fn toggle_select(&mut self, remote_id: impl Into<String>) {
        let remote_id = remote_id.into();
        if !self.selected.remove(&remote_id) {
            self.selected.insert(remote_id);
        }
    }

    /// Select every currently loaded message.
    pub fn select_all(&mut self) {
        self.selected = self
            .messages
            .iter()
            .map(|m| m.remote_id.clone())
            .collect();
    }

    /// Drop the entire selection.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Delete the selected messages as one atomic batch.
    ///
    /// An empty selection is a no-op returning 0 with no backend
    /// call. On success every matching record is removed from
    /// `messages` and the selection is cleared; the returned count is
    /// whatever the backend reported. On failure both `messages` and
    /// `selected` are left exactly as they were.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged, with local state
    /// untouched.
    pub async fn delete_selected(&mut self) -> Result<usize> {
        if self.selected.is_empty() {
            return Ok(0);
        }

        let ids: Vec<String> = self.selected.iter().cloned().collect();
        let deleted = self.backend.delete(&ids).await?;

        self.messages
            .retain(|message| !self.selected.contains(&message.remote_id));
        self.selected.clear();
        info!("Deleted {} messages", deleted);
        Ok(deleted)
    }

    /// Move the selected messages to a label as one atomic batch.
    ///
    /// Labels live server-side, so local records are not touched; the
    /// selection clears on success. An empty selection is a no-op
    /// returning 0 with no backend call.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged, with local state
    /// untouched.
    pub async fn move_selected(&mut self, label_id: &str) -> Result<usize> {
        if self.selected.is_empty() {
            return Ok(0);
        }

        let ids: Vec<String> = self.selected.iter().cloned().collect();
        let moved = self.backend.move_to_label(&ids, label_id).await?;

        self.selected.clear();
        info!("Moved {} messages to {}", moved, label_id);
        Ok(moved)
    }

    /// Forward an assistant task and return the resulting text
    /// verbatim.
    ///
    /// No message record is mutated; only the transient busy flag is
    /// set for the duration of the call. Rewrite output is meant for
    /// the caller's draft buffer.
    ///
    /// # Errors
    ///
    /// Returns the backend error unchanged.
    pub async fn assistant(&mut self, task: &AssistantTask) -> Result<String> {
        debug!("Assistant task: {}", task.kind());
        self.assistant_busy = true;
        let result = self.backend.assistant(task).await;
        self.assistant_busy = false;
        result
    }

    /// Messages passing the given display filter, in load order.
    #[must_use]
    pub fn filtered(&self, filter: &Filter) -> Vec<&Message> {
        self.messages.iter().filter(|m| filter.matches(m)).collect()
    }

    /// Count of unread messages across the whole mailbox.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.messages.iter().filter(|m| !m.is_read).count()
    }

    /// Per-category message totals.
    #[must_use]
    pub fn category_counts(&self) -> HashMap<Category, usize> {
        let mut counts = HashMap::new();
        for message in &self.messages {
            *counts.entry(message.category.clone()).or_insert(0) += 1;
        }
        counts
    }
}
