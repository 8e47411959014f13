//! Advisory text provider capability.
//!
//! The provider is an injected, opaque text source (typically a remote
//! language model). Core code depends only on this trait.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// What the provider is told about the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightContext {
    pub active_habit_names: Vec<String>,
    pub total_completions: usize,
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsightError {
    /// Transport or provider-side failure.
    Unavailable(String),
    /// Provider answered with something unusable.
    MalformedResponse(String),
    TimedOut(Duration),
    /// The worker ended without answering.
    WorkerLost,
}

impl Display for InsightError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(details) => write!(f, "insight provider unavailable: {details}"),
            Self::MalformedResponse(details) => {
                write!(f, "insight provider returned malformed response: {details}")
            }
            Self::TimedOut(limit) => {
                write!(f, "insight provider timed out after {}ms", limit.as_millis())
            }
            Self::WorkerLost => write!(f, "insight worker exited without a result"),
        }
    }
}

impl Error for InsightError {}

impl InsightError {
    /// Stable, content-free label for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "unavailable",
            Self::MalformedResponse(_) => "malformed_response",
            Self::TimedOut(_) => "timed_out",
            Self::WorkerLost => "worker_lost",
        }
    }
}

/// Produces one short advisory text for a context.
///
/// Implementations may block; callers bound them with a timeout.
pub trait InsightProvider: Send + Sync {
    fn provider_id(&self) -> &str;
    fn generate(&self, context: &InsightContext) -> Result<String, InsightError>;
}
