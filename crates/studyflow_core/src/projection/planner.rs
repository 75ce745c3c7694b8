//! Filter, search and sort pipeline for the session list.
//!
//! Stages run in a fixed order: filter, then search, then sort. Each stage
//! consumes the previous stage's output.

use crate::model::session::{SessionPriority, StudySession};
use crate::model::ValidationError;
use chrono::{NaiveDate, TimeZone};
use std::cmp::Reverse;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionFilter {
    #[default]
    All,
    /// Sessions whose start falls on the current local calendar day.
    Today,
    /// Completed sessions only.
    Done,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionSort {
    /// Chronological by start, earliest first.
    #[default]
    Start,
    /// Longest first.
    Duration,
    /// High priority first; everything else keeps its relative order.
    Priority,
}

impl FromStr for SessionFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "today" => Ok(Self::Today),
            "done" => Ok(Self::Done),
            _ => Err(ValidationError::UnknownValue {
                field: "filter",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for SessionSort {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(Self::Start),
            "duration" => Ok(Self::Duration),
            "priority" => Ok(Self::Priority),
            _ => Err(ValidationError::UnknownValue {
                field: "sort",
                value: s.to_string(),
            }),
        }
    }
}

/// List controls as chosen by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionQuery {
    pub filter: SessionFilter,
    pub search: String,
    pub sort: SessionSort,
}

/// Applies `query` to `sessions`; `today` is interpreted in `tz`.
pub fn project_sessions<Tz: TimeZone>(
    sessions: &[StudySession],
    query: &SessionQuery,
    today: NaiveDate,
    tz: &Tz,
) -> Vec<StudySession> {
    // Surrounding whitespace is not part of the needle.
    let needle = query.search.trim().to_lowercase();

    let mut view: Vec<StudySession> = sessions
        .iter()
        .filter(|session| matches_filter(session, query.filter, today, tz))
        .filter(|session| needle.is_empty() || matches_search(session, &needle))
        .cloned()
        .collect();

    match query.sort {
        SessionSort::Start => view.sort_by_key(|session| session.start),
        SessionSort::Duration => view.sort_by_key(|session| Reverse(session.duration)),
        SessionSort::Priority => {
            view.sort_by_key(|session| session.priority != SessionPriority::High)
        }
    }
    view
}

fn matches_filter<Tz: TimeZone>(
    session: &StudySession,
    filter: SessionFilter,
    today: NaiveDate,
    tz: &Tz,
) -> bool {
    match filter {
        SessionFilter::All => true,
        SessionFilter::Today => session.start.with_timezone(tz).date_naive() == today,
        SessionFilter::Done => session.is_done(),
    }
}

/// `needle` must already be lowercase.
fn matches_search(session: &StudySession, needle: &str) -> bool {
    session.subject.to_lowercase().contains(needle)
        || session.topic.to_lowercase().contains(needle)
        || session.tags.join(" ").to_lowercase().contains(needle)
}
