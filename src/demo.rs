//! In-memory demo backend
//!
//! Stands in for the live service when demo mode is on: a seeded
//! message store for list/delete and canned assistant replies. The
//! generator is deterministic (everything derives from the record
//! index) so demo sessions are reproducible.

use crate::assistant::{AssistantTask, Tone};
use crate::backend::MailBackend;
use crate::error::Result;
use crate::message::{Category, Message, Sentiment, Urgency};
use chrono::{Duration, Utc};
use std::sync::{Mutex, MutexGuard, PoisonError};

const CATEGORIES: [Category; 5] = [
    Category::Billing,
    Category::Work,
    Category::Personal,
    Category::Promotions,
    Category::Spam,
];

const SENDERS: [&str; 5] = [
    "amazon.com",
    "google.com",
    "boss@company.com",
    "mom@gmail.com",
    "newsletter@tech.com",
];

const SUBJECTS: [&str; 5] = [
    "Your invoice for AWS Services",
    "Project Sync: Q4 Goals",
    "Dinner this weekend?",
    "50% OFF everything!",
    "You won a lottery (Claim now)",
];

const SUMMARY_REPLY: &str = "\u{2022} The sender is asking about Q4 goals.\n\
                             \u{2022} An AWS invoice needs review.\n\
                             \u{2022} Deadline is Friday.";

const ACTIONS_REPLY: &str = "- [ ] Review Q4 Goal Documents\n\
                             - [ ] Check AWS Invoice discrepancies\n\
                             - [ ] Reply by Friday";

const REWRITE_PROFESSIONAL: &str = "Dear Recipient,\n\nPlease find the attached documents \
    regarding our Q4 objectives. I would appreciate your review at your earliest \
    convenience.\n\nSincerely,\nUser";

const REWRITE_FRIENDLY: &str =
    "Hey!\n\nHere are the docs for Q4. Take a look when you have a sec!\n\nCheers,\nUser";

const REWRITE_CONCISE: &str = "Attached are the Q4 docs. Please review.";

/// Generate `count` sample messages with rotating fixtures.
#[must_use]
pub fn sample_messages(count: usize) -> Vec<Message> {
    let now = Utc::now();
    (0..count)
        .map(|i| {
            let n = i + 1;
            Message {
                local_id: format!("msg_{n:04}"),
                remote_id: format!("g_{n:04}"),
                subject: format!("{} #{n}", SUBJECTS[i % SUBJECTS.len()]),
                from_address: format!("contact@{}", SENDERS[i % SENDERS.len()]),
                snippet: format!(
                    "This is a preview of the email content for message {n}. \
                     It contains important details regarding..."
                ),
                body: format!(
                    "Hi there,\n\nI hope this email finds you well.\n\nThis is a full \
                     body content mock for message {n}. It contains significantly more \
                     details than the snippet. We need to discuss the Q4 goals and the \
                     AWS invoice discrepancies.\n\nPlease review the attached documents \
                     by Friday.\n\nBest,\nSender"
                ),
                category: CATEGORIES[i % CATEGORIES.len()].clone(),
                received_at: now - Duration::hours(7 * i as i64),
                is_read: i % 3 != 0,
                is_starred: i % 5 == 0,
                urgency: if i % 3 == 2 {
                    Urgency::High
                } else {
                    Urgency::Normal
                },
                sentiment: if i % 2 == 0 {
                    Sentiment::Positive
                } else {
                    Sentiment::Neutral
                },
            }
        })
        .collect()
}

/// Demo backend over an in-memory store.
pub struct DemoBackend {
    store: Mutex<Vec<Message>>,
}

impl DemoBackend {
    /// A demo backend seeded with 15 sample messages.
    #[must_use]
    pub fn new() -> Self {
        Self::with_messages(sample_messages(15))
    }

    /// A demo backend seeded with explicit messages.
    #[must_use]
    pub fn with_messages(messages: Vec<Message>) -> Self {
        Self {
            store: Mutex::new(messages),
        }
    }

    fn store(&self) -> MutexGuard<'_, Vec<Message>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for DemoBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MailBackend for DemoBackend {
    async fn sync(&self) -> Result<()> {
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Message>> {
        Ok(self.store().clone())
    }

    async fn delete(&self, remote_ids: &[String]) -> Result<usize> {
        let mut store = self.store();
        let before = store.len();
        store.retain(|message| !remote_ids.contains(&message.remote_id));
        Ok(before - store.len())
    }

    async fn move_to_label(&self, remote_ids: &[String], _label_id: &str) -> Result<usize> {
        // Labels live server-side; the demo store has nothing to
        // relabel, so this only reports the count.
        Ok(remote_ids.len())
    }

    async fn assistant(&self, task: &AssistantTask) -> Result<String> {
        let reply = match task {
            AssistantTask::Summarize { .. } => SUMMARY_REPLY.to_string(),
            AssistantTask::ExtractActions { .. } => ACTIONS_REPLY.to_string(),
            AssistantTask::Rewrite { text, tone } => match tone {
                Tone::Professional => REWRITE_PROFESSIONAL.to_string(),
                Tone::Friendly => REWRITE_FRIENDLY.to_string(),
                Tone::Concise => REWRITE_CONCISE.to_string(),
                // Unknown tone: hand the draft back unchanged.
                Tone::Custom(_) => text.clone(),
            },
            AssistantTask::DraftReply { prompt } => format!(
                "Here is a drafted response based on your request: \"{prompt}\"\n\n\
                 Dear Sender,\n\nThank you for your email. I have reviewed the \
                 contents and...\n\nBest,\nUser"
            ),
        };
        Ok(reply)
    }
}
