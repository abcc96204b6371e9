//! Mailbox message records
//!
//! Provides the `Message` record plus strongly-typed enums for the
//! label fields the backend sends as raw strings. Serde names follow
//! the backend's JSON contract exactly (`gmail_id`, `from_email`,
//! `isRead`, ...), so records round-trip through the list endpoint
//! unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single mailbox entry as loaded from the backend.
///
/// Text fields are immutable once loaded. `is_read` and `is_starred`
/// are rendered and locally mutable but not wired to any backend
/// mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique per record, assigned at creation, never reused.
    #[serde(rename = "id")]
    pub local_id: String,
    /// Opaque external identifier used for delete/list correlation.
    #[serde(rename = "gmail_id")]
    pub remote_id: String,
    pub subject: String,
    #[serde(rename = "from_email")]
    pub from_address: String,
    pub snippet: String,
    pub body: String,
    pub category: Category,
    #[serde(rename = "date")]
    pub received_at: DateTime<Utc>,
    #[serde(rename = "isRead")]
    pub is_read: bool,
    #[serde(rename = "isStarred")]
    pub is_starred: bool,
    pub urgency: Urgency,
    #[serde(default)]
    pub sentiment: Sentiment,
}

/// A mailbox category label.
///
/// The backend assigns one of a fixed label set; anything it sends
/// outside that set is preserved verbatim in [`Category::Other`].
/// Categories drive display filtering only.
///
/// # Examples
///
/// ```
/// use mailmind_client::Category;
///
/// let billing = Category::Billing;
/// assert_eq!(billing.as_str(), "Billing");
///
/// let other = Category::from("Receipts");
/// assert_eq!(other.as_str(), "Receipts");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Billing,
    Work,
    Personal,
    Promotions,
    Spam,
    /// A label outside the fixed set, preserved verbatim.
    Other(String),
}

impl Category {
    /// The category label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Billing => "Billing",
            Self::Work => "Work",
            Self::Personal => "Personal",
            Self::Promotions => "Promotions",
            Self::Spam => "Spam",
            Self::Other(label) => label,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        match s {
            "Billing" => Self::Billing,
            "Work" => Self::Work,
            "Personal" => Self::Personal,
            "Promotions" => Self::Promotions,
            "Spam" => Self::Spam,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

/// Message urgency as classified by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Urgency {
    Normal,
    High,
}

/// Message sentiment as classified by the backend.
///
/// Not every deployment sends this field; missing values default to
/// [`Sentiment::Neutral`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
}
