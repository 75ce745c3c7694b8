//! Best-effort topic enrichment.
//!
//! # Responsibility
//! - Turn a topic string into a short text summary before a session is saved.
//!
//! # Invariants
//! - Enrichment never fails its caller; every failure degrades to `""`.
//! - Blank topics are never looked up.

mod wikipedia;

pub use wikipedia::{WikipediaEnricher, DEFAULT_BASE_URL};

/// Source of short topic summaries.
pub trait Enricher {
    /// Returns a summary for `topic`, or an empty string.
    fn summarize(&self, topic: &str) -> String;
}

/// Enricher that never looks anything up.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEnrichment;

impl Enricher for NoEnrichment {
    fn summarize(&self, _topic: &str) -> String {
        String::new()
    }
}

impl<F> Enricher for F
where
    F: Fn(&str) -> String,
{
    fn summarize(&self, topic: &str) -> String {
        self(topic)
    }
}
