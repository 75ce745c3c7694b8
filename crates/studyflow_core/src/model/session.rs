//! Study session record.
//!
//! # Invariants
//! - `subject` and `topic` are non-empty after trimming.
//! - `duration` is a positive number of minutes.
//! - `status == Done` implies `completed_at` is set. No ordering between
//!   `start` and `completed_at` is enforced.

use super::{require_text, Record, RecordId, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPriority {
    Low,
    #[default]
    Normal,
    High,
}

impl Display for SessionPriority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Low => "Low",
            Self::Normal => "Normal",
            Self::High => "High",
        })
    }
}

impl FromStr for SessionPriority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "normal" => Ok(Self::Normal),
            "high" => Ok(Self::High),
            _ => Err(ValidationError::UnknownValue {
                field: "priority",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Planned,
    Done,
}

/// Validated add/edit form input for a study session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDraft {
    subject: String,
    topic: String,
    duration: u32,
    start: DateTime<Utc>,
    priority: SessionPriority,
    tags: Vec<String>,
    notes: String,
}

impl SessionDraft {
    /// Builds a draft from raw form values.
    ///
    /// `tags` is the comma separated form input; blank entries are dropped.
    pub fn new(
        subject: &str,
        topic: &str,
        duration: u32,
        start: DateTime<Utc>,
        priority: SessionPriority,
        tags: &str,
        notes: &str,
    ) -> Result<Self, ValidationError> {
        let subject = require_text("subject", subject)?;
        let topic = require_text("topic", topic)?;
        if duration == 0 {
            return Err(ValidationError::NonPositiveDuration);
        }
        Ok(Self {
            subject,
            topic,
            duration,
            start,
            priority,
            tags: parse_tags(tags),
            notes: notes.to_string(),
        })
    }

    /// Uses an already-split tag list instead of the parsed form input.
    ///
    /// Tags are kept verbatim, commas included; blank entries are dropped.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags
            .into_iter()
            .filter(|tag| !tag.trim().is_empty())
            .collect();
        self
    }

    /// Topic used as the enrichment lookup key.
    pub fn topic(&self) -> &str {
        &self.topic
    }
}

/// Splits comma separated tag input into trimmed, non-empty tags.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// One planned or finished study block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: RecordId,
    pub subject: String,
    pub topic: String,
    /// Minutes.
    pub duration: u32,
    pub start: DateTime<Utc>,
    #[serde(default)]
    pub priority: SessionPriority,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub status: SessionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl StudySession {
    /// Creates a new `planned` session.
    pub fn planned(id: RecordId, draft: SessionDraft, summary: String) -> Self {
        Self {
            id,
            subject: draft.subject,
            topic: draft.topic,
            duration: draft.duration,
            start: draft.start,
            priority: draft.priority,
            tags: draft.tags,
            notes: draft.notes,
            summary,
            status: SessionStatus::Planned,
            completed_at: None,
        }
    }

    /// Returns this session with form fields replaced by `draft`.
    ///
    /// `status` and `completed_at` are not part of the form and carry over.
    pub fn revised(&self, draft: SessionDraft, summary: String) -> Self {
        Self {
            status: self.status,
            completed_at: self.completed_at,
            ..Self::planned(self.id, draft, summary)
        }
    }

    /// Marks the session done at `at`. Repeated calls refresh the timestamp.
    pub fn complete(&mut self, at: DateTime<Utc>) {
        self.status = SessionStatus::Done;
        self.completed_at = Some(at);
    }

    pub fn is_done(&self) -> bool {
        self.status == SessionStatus::Done
    }

    /// Duration in hours, unrounded.
    pub fn hours(&self) -> f64 {
        f64::from(self.duration) / 60.0
    }
}

impl Record for StudySession {
    fn id(&self) -> RecordId {
        self.id
    }

    fn with_id(self, id: RecordId) -> Self {
        Self { id, ..self }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("subject", &self.subject)?;
        require_text("topic", &self.topic)?;
        if self.duration == 0 {
            return Err(ValidationError::NonPositiveDuration);
        }
        if self.tags.iter().any(|tag| tag.trim().is_empty()) {
            return Err(ValidationError::EmptyTag);
        }
        if self.is_done() && self.completed_at.is_none() {
            return Err(ValidationError::MissingCompletedAt(self.id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_tags, SessionDraft, SessionPriority, SessionStatus, StudySession};
    use crate::model::{Record, RecordId, ValidationError};
    use chrono::{TimeZone, Utc};

    fn draft(subject: &str, topic: &str, duration: u32) -> Result<SessionDraft, ValidationError> {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        SessionDraft::new(
            subject,
            topic,
            duration,
            start,
            SessionPriority::High,
            " a, ,b ",
            "",
        )
    }

    fn planned(id: i64) -> StudySession {
        StudySession::planned(RecordId::new(id), draft("CS", "Rust", 25).unwrap(), String::new())
    }

    #[test]
    fn with_tags_keeps_commas_inside_a_tag() {
        let draft = draft("CS", "Rust", 25)
            .unwrap()
            .with_tags(vec!["a, b".into(), " ".into(), "c".into()]);
        let session = StudySession::planned(RecordId::new(1), draft, String::new());
        assert_eq!(session.tags, vec!["a, b".to_string(), "c".to_string()]);
        assert!(session.validate().is_ok());
    }

    #[test]
    fn draft_trims_and_validates() {
        assert_eq!(
            draft(" ", "Rust", 25).unwrap_err(),
            ValidationError::EmptyField("subject")
        );
        assert_eq!(
            draft("CS", "", 25).unwrap_err(),
            ValidationError::EmptyField("topic")
        );
        assert_eq!(
            draft("CS", "Rust", 0).unwrap_err(),
            ValidationError::NonPositiveDuration
        );

        let trimmed = draft(" CS ", " Rust ", 25).unwrap();
        let session = StudySession::planned(RecordId::new(1), trimmed, String::new());
        assert_eq!(session.subject, "CS");
        assert_eq!(session.topic, "Rust");
        assert_eq!(session.tags, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(session.status, SessionStatus::Planned);
    }

    #[test]
    fn revised_carries_completion_forward() {
        let mut session = planned(3);
        let done_at = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        session.complete(done_at);

        let revised = session.revised(draft("Math", "Limits", 50).unwrap(), "summary".into());
        assert_eq!(revised.id, RecordId::new(3));
        assert_eq!(revised.status, SessionStatus::Done);
        assert_eq!(revised.completed_at, Some(done_at));
        assert_eq!(revised.subject, "Math");
        assert_eq!(revised.summary, "summary");
    }

    #[test]
    fn done_without_completion_time_is_invalid() {
        let mut session = planned(4);
        session.status = SessionStatus::Done;
        assert_eq!(
            session.validate().unwrap_err(),
            ValidationError::MissingCompletedAt(RecordId::new(4))
        );
    }

    #[test]
    fn wire_format_uses_camel_case_and_omits_missing_completion() {
        let session = planned(9);
        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["status"], "planned");
        assert_eq!(value["priority"], "High");
        assert!(value.get("completedAt").is_none());
        assert_eq!(parse_tags(""), Vec::<String>::new());
    }
}
