//! Assistant invocation types
//!
//! Provides strongly-typed requests for the language-model endpoints
//! instead of raw strings. Each task carries the text payload the
//! backend expects; the response is always a single text blob handed
//! back to the caller verbatim.

use std::fmt;

/// A request to the assistant backend.
///
/// The session forwards the task to a kind-specific endpoint and
/// returns the resulting text. Rewrite output is meant for the
/// caller's draft buffer; everything else is display-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantTask {
    /// Summarize an email body into a few bullet points.
    Summarize { prompt: String },
    /// Extract a checklist of action items from an email body.
    ExtractActions { prompt: String },
    /// Rewrite draft text in the requested tone.
    Rewrite { text: String, tone: Tone },
    /// Draft a reply from a free-form prompt.
    DraftReply { prompt: String },
}

impl AssistantTask {
    /// Short label for logging and display.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Summarize { .. } => "summarize",
            Self::ExtractActions { .. } => "extract-actions",
            Self::Rewrite { .. } => "rewrite",
            Self::DraftReply { .. } => "draft-reply",
        }
    }
}

/// A rewrite tone.
///
/// The well-known tones match the labels the backend's rewrite prompt
/// understands. Arbitrary tones use [`Tone::Custom`] and are passed
/// through as-is.
///
/// # Examples
///
/// ```
/// use mailmind_client::Tone;
///
/// let tone = Tone::Professional;
/// assert_eq!(tone.as_str(), "Professional");
///
/// let custom = Tone::from("Pirate");
/// assert_eq!(custom.as_str(), "Pirate");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tone {
    Professional,
    Friendly,
    Concise,
    /// A tone outside the well-known set, passed through verbatim.
    Custom(String),
}

impl Tone {
    /// The tone label as the backend expects it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Professional => "Professional",
            Self::Friendly => "Friendly",
            Self::Concise => "Concise",
            Self::Custom(label) => label,
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Tone {
    fn from(s: &str) -> Self {
        match s {
            "Professional" => Self::Professional,
            "Friendly" => Self::Friendly,
            "Concise" => Self::Concise,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<String> for Tone {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}
