//! Wikipedia summary lookup.
//!
//! Primary lookup is the REST summary endpoint for the exact topic. When that
//! does not answer with success, the opensearch endpoint resolves the topic
//! to a page title and the summary is fetched once more for that title.

use super::Enricher;
use log::{debug, warn};
use serde::Deserialize;
use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

pub const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct PageSummary {
    #[serde(default)]
    extract: String,
}

pub struct WikipediaEnricher {
    agent: ureq::Agent,
    base_url: String,
}

enum Lookup {
    Found(String),
    Missing,
}

enum LookupError {
    Transport(Box<ureq::Error>),
    Body(std::io::Error),
}

impl Display for LookupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "{err}"),
            Self::Body(err) => write!(f, "unreadable response body: {err}"),
        }
    }
}

impl From<ureq::Error> for LookupError {
    fn from(value: ureq::Error) -> Self {
        Self::Transport(Box::new(value))
    }
}

impl From<std::io::Error> for LookupError {
    fn from(value: std::io::Error) -> Self {
        Self::Body(value)
    }
}

impl WikipediaEnricher {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    /// Builds an enricher against a custom host, e.g. a mirror or proxy.
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn summary(&self, title: &str) -> Result<Lookup, LookupError> {
        let url = format!(
            "{}/api/rest_v1/page/summary/{}",
            self.base_url,
            encode_component(title)
        );
        match self.agent.get(&url).call() {
            Ok(response) => {
                let page: PageSummary = response.into_json()?;
                Ok(Lookup::Found(page.extract))
            }
            Err(ureq::Error::Status(code, _)) => {
                debug!("event=enrich_summary module=enrich status=miss http_status={code}");
                Ok(Lookup::Missing)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn search_title(&self, topic: &str) -> Result<Option<String>, LookupError> {
        let url = format!("{}/w/api.php", self.base_url);
        let response = self
            .agent
            .get(&url)
            .query("action", "opensearch")
            .query("search", topic)
            .query("limit", "1")
            .query("format", "json")
            .call()?;
        let body: serde_json::Value = response.into_json()?;
        Ok(first_search_title(&body))
    }

    fn lookup(&self, topic: &str) -> Result<String, LookupError> {
        if let Lookup::Found(extract) = self.summary(topic)? {
            return Ok(extract);
        }
        match self.search_title(topic)? {
            Some(title) => match self.summary(&title)? {
                Lookup::Found(extract) => Ok(extract),
                Lookup::Missing => Ok(String::new()),
            },
            None => Ok(String::new()),
        }
    }
}

impl Default for WikipediaEnricher {
    fn default() -> Self {
        Self::new()
    }
}

impl Enricher for WikipediaEnricher {
    fn summarize(&self, topic: &str) -> String {
        let topic = topic.trim();
        if topic.is_empty() {
            return String::new();
        }

        let started_at = Instant::now();
        match self.lookup(topic) {
            Ok(extract) => {
                debug!(
                    "event=enrich module=enrich status=ok duration_ms={} chars={}",
                    started_at.elapsed().as_millis(),
                    extract.chars().count()
                );
                extract
            }
            Err(err) => {
                warn!(
                    "event=enrich module=enrich status=degraded duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                String::new()
            }
        }
    }
}

/// Opensearch answers `[query, [titles], [descriptions], [urls]]`.
fn first_search_title(body: &serde_json::Value) -> Option<String> {
    body.get(1)?
        .get(0)?
        .as_str()
        .filter(|title| !title.is_empty())
        .map(str::to_string)
}

/// Percent-encodes one URL path segment (RFC 3986 unreserved set kept).
fn encode_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(char::from(byte))
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::{encode_component, first_search_title, WikipediaEnricher};
    use crate::enrich::Enricher;
    use std::time::Duration;

    #[test]
    fn encodes_spaces_and_unicode() {
        assert_eq!(encode_component("Rust (language)"), "Rust%20%28language%29");
        assert_eq!(encode_component("é"), "%C3%A9");
    }

    #[test]
    fn reads_first_opensearch_title() {
        let body = serde_json::json!(["rust", ["Rust (programming language)"], [""], [""]]);
        assert_eq!(
            first_search_title(&body).as_deref(),
            Some("Rust (programming language)")
        );
        assert_eq!(first_search_title(&serde_json::json!(["x", []])), None);
    }

    #[test]
    fn unreachable_host_degrades_to_empty_summary() {
        let enricher =
            WikipediaEnricher::with_base_url("http://127.0.0.1:9", Duration::from_millis(200));
        assert_eq!(enricher.summarize("Ownership"), "");
        assert_eq!(enricher.summarize("   "), "");
    }
}
