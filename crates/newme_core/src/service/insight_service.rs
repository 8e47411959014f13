//! Daily advisory text with caching and fallback.
//!
//! # Responsibility
//! - Ask the injected provider at most once per successful calendar day.
//! - Bound each request with a timeout on a worker thread.
//! - Mask every failure behind a static fallback text.
//!
//! # Invariants
//! - Callers always receive displayable text; provider errors never escape.
//! - Only successful answers (including the empty-response substitute) are
//!   cached; failures are retried on the next call, never within one call.

use crate::insight::provider::{InsightContext, InsightError, InsightProvider};
use chrono::NaiveDate;
use log::{info, warn};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_FALLBACK_TEXT: &str = "Friend, today is your day. Every step, however small, \
    builds a mountain of change. I'm proud of you!";
const DEFAULT_EMPTY_RESPONSE_TEXT: &str = "Nice one, friend. Just showing up today means \
    you're on the right track. Every tick wakes up a better you.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightConfig {
    pub timeout: Duration,
    /// Shown when the provider fails or times out.
    pub fallback_text: String,
    /// Shown (and cached) when the provider answers with blank text.
    pub empty_response_text: String,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            fallback_text: DEFAULT_FALLBACK_TEXT.to_string(),
            empty_response_text: DEFAULT_EMPTY_RESPONSE_TEXT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightSource {
    Cached,
    Provider,
    EmptyResponse,
    Fallback,
}

impl InsightSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cached => "cached",
            Self::Provider => "provider",
            Self::EmptyResponse => "empty_response",
            Self::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insight {
    pub text: String,
    pub source: InsightSource,
}

pub struct InsightService {
    provider: Arc<dyn InsightProvider>,
    config: InsightConfig,
    cache: Option<(NaiveDate, String)>,
}

impl InsightService {
    pub fn new(provider: Arc<dyn InsightProvider>) -> Self {
        Self::with_config(provider, InsightConfig::default())
    }

    pub fn with_config(provider: Arc<dyn InsightProvider>, config: InsightConfig) -> Self {
        Self {
            provider,
            config,
            cache: None,
        }
    }

    /// Cached text for `today`, if any.
    pub fn cached_for(&self, today: NaiveDate) -> Option<&str> {
        match &self.cache {
            Some((day, text)) if *day == today => Some(text.as_str()),
            _ => None,
        }
    }

    /// Returns today's advisory text.
    pub fn insight_for(&mut self, today: NaiveDate, context: &InsightContext) -> Insight {
        if let Some(text) = self.cached_for(today) {
            return Insight {
                text: text.to_string(),
                source: InsightSource::Cached,
            };
        }

        let started_at = Instant::now();
        let outcome = self.request(context);
        self.settle_timed(today, outcome, started_at)
    }

    /// Applies the caching and fallback rules to an answer obtained outside
    /// the service, e.g. by a host that performs the request itself.
    pub fn settle(&mut self, today: NaiveDate, outcome: Result<String, InsightError>) -> Insight {
        self.settle_timed(today, outcome, Instant::now())
    }

    fn settle_timed(
        &mut self,
        today: NaiveDate,
        outcome: Result<String, InsightError>,
        started_at: Instant,
    ) -> Insight {
        match outcome {
            Ok(text) => {
                let (text, source) = if text.trim().is_empty() {
                    (
                        self.config.empty_response_text.clone(),
                        InsightSource::EmptyResponse,
                    )
                } else {
                    (text, InsightSource::Provider)
                };
                info!(
                    "event=insight_fetch module=insight status=ok provider={} duration_ms={} empty={}",
                    self.provider.provider_id(),
                    started_at.elapsed().as_millis(),
                    source == InsightSource::EmptyResponse
                );
                self.cache = Some((today, text.clone()));
                Insight { text, source }
            }
            Err(err) => {
                warn!(
                    "event=insight_fetch module=insight status=fallback provider={} duration_ms={} error_kind={}",
                    self.provider.provider_id(),
                    started_at.elapsed().as_millis(),
                    err.kind()
                );
                Insight {
                    text: self.config.fallback_text.clone(),
                    source: InsightSource::Fallback,
                }
            }
        }
    }

    fn request(&self, context: &InsightContext) -> Result<String, InsightError> {
        let (sender, receiver) = mpsc::channel();
        let provider = Arc::clone(&self.provider);
        let context = context.clone();

        std::thread::Builder::new()
            .name("newme-insight".to_string())
            .spawn(move || {
                // The receiver is gone after a timeout; nothing to report then.
                let _ = sender.send(provider.generate(&context));
            })
            .map_err(|err| InsightError::Unavailable(format!("failed to spawn worker: {err}")))?;

        match receiver.recv_timeout(self.config.timeout) {
            Ok(result) => result,
            Err(mpsc::RecvTimeoutError::Timeout) => Err(InsightError::TimedOut(self.config.timeout)),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(InsightError::WorkerLost),
        }
    }
}
