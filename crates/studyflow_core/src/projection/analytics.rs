//! Study-time aggregation for the analytics view.

use crate::model::session::StudySession;
use chrono::{Days, NaiveDate, TimeZone};

/// Length of the trailing daily window, today included.
pub const DAILY_WINDOW_DAYS: u64 = 14;

#[derive(Debug, Clone, PartialEq)]
pub struct SubjectHours {
    pub subject: String,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyHours {
    pub date: NaiveDate,
    pub hours: f64,
}

/// Total planned hours per subject, in order of first appearance.
pub fn subject_hours(sessions: &[StudySession]) -> Vec<SubjectHours> {
    let mut totals: Vec<SubjectHours> = Vec::new();
    for session in sessions {
        match totals
            .iter_mut()
            .find(|entry| entry.subject == session.subject)
        {
            Some(entry) => entry.hours += session.hours(),
            None => totals.push(SubjectHours {
                subject: session.subject.clone(),
                hours: session.hours(),
            }),
        }
    }
    for entry in &mut totals {
        entry.hours = round_hours(entry.hours);
    }
    totals
}

/// Completed hours per day over the trailing window ending at `today`.
///
/// A session counts on the local day of `completed_at`, falling back to
/// `start` for records that lack it. Oldest day first.
pub fn daily_hours<Tz: TimeZone>(
    sessions: &[StudySession],
    today: NaiveDate,
    tz: &Tz,
) -> Vec<DailyHours> {
    (0..DAILY_WINDOW_DAYS)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .map(|date| {
            let total: f64 = sessions
                .iter()
                .filter(|session| session.is_done())
                .filter(|session| {
                    let counted_at = session.completed_at.unwrap_or(session.start);
                    counted_at.with_timezone(tz).date_naive() == date
                })
                .map(StudySession::hours)
                .sum();
            DailyHours {
                date,
                hours: round_hours(total),
            }
        })
        .collect()
}

fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}
