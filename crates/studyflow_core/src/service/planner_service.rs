//! Study planner use-case service.
//!
//! # Responsibility
//! - Add/edit/delete/complete sessions, enriching topics before save.
//! - Import and export the whole collection as JSON.
//! - Expose list and analytics projections.
//!
//! # Invariants
//! - Edits keep `id`, `status` and `completed_at`.
//! - Enrichment runs before the mirror is touched and never fails the edit.
//! - Imports append re-keyed copies; a rejected import changes nothing.

use super::{remove_record, replace_record, MutationOutcome, ServiceError, ServiceResult};
use crate::enrich::Enricher;
use crate::mirror::Mirror;
use crate::model::session::{SessionDraft, StudySession};
use crate::model::{Record, RecordId};
use crate::projection::analytics::{daily_hours, subject_hours, DailyHours, SubjectHours};
use crate::projection::planner::{project_sessions, SessionQuery};
use crate::store::{KeyValueStore, RecordStore, SESSIONS_KEY};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use log::{info, warn};
use serde_json::Value;

/// Default file name used when exporting sessions.
pub const EXPORT_FILE_NAME: &str = "studyflow_sessions.json";

pub struct PlannerService<S: KeyValueStore, E: Enricher> {
    mirror: Mirror<StudySession, S>,
    enricher: E,
}

impl<S: KeyValueStore, E: Enricher> PlannerService<S, E> {
    /// Loads the planner collection from `store`.
    pub fn load(store: RecordStore<S>, enricher: E) -> Self {
        Self::new(Mirror::load(store, SESSIONS_KEY), enricher)
    }

    pub fn new(mirror: Mirror<StudySession, S>, enricher: E) -> Self {
        Self { mirror, enricher }
    }

    pub fn sessions(&self) -> &[StudySession] {
        self.mirror.all()
    }

    pub fn find(&self, id: RecordId) -> Option<&StudySession> {
        self.mirror.find(id)
    }

    /// Re-reads the stored collection, dropping this instance's snapshot.
    pub fn refresh(&mut self) {
        self.mirror.reload();
    }

    /// Creates a planned session with a freshly looked-up summary.
    pub fn add_session(&mut self, draft: SessionDraft) -> ServiceResult<StudySession> {
        let summary = self.enricher.summarize(draft.topic());
        let session = StudySession::planned(self.mirror.next_id(), draft, summary);
        session.validate()?;

        let mut next = self.mirror.all().to_vec();
        next.push(session.clone());
        self.mirror.replace_all(next)?;

        info!(
            "event=session_add module=service status=ok session_id={} total={}",
            session.id,
            self.mirror.len()
        );
        Ok(session)
    }

    /// Replaces the form fields of session `id`, refreshing its summary.
    pub fn update_session(
        &mut self,
        id: RecordId,
        draft: SessionDraft,
    ) -> ServiceResult<MutationOutcome> {
        if self.mirror.find(id).is_none() {
            return Ok(self.log_outcome("session_update", id, MutationOutcome::NotFound));
        }

        let summary = self.enricher.summarize(draft.topic());
        let next = replace_record(self.mirror.all(), id, |session| {
            session.revised(draft, summary)
        });
        self.commit("session_update", id, next)
    }

    pub fn delete_session(&mut self, id: RecordId) -> ServiceResult<MutationOutcome> {
        let next = remove_record(self.mirror.all(), id);
        self.commit("session_delete", id, next)
    }

    /// Marks session `id` done at `at`. Calling it again refreshes `at`.
    pub fn mark_complete(
        &mut self,
        id: RecordId,
        at: DateTime<Utc>,
    ) -> ServiceResult<MutationOutcome> {
        let next = replace_record(self.mirror.all(), id, |session| {
            let mut done = session.clone();
            done.complete(at);
            done
        });
        self.commit("session_complete", id, next)
    }

    /// Removes every session.
    pub fn clear_all(&mut self) -> ServiceResult<()> {
        let removed = self.mirror.len();
        self.mirror.clear()?;
        info!("event=session_clear module=service status=ok removed={removed}");
        Ok(())
    }

    /// Full collection as indented JSON.
    pub fn export_json(&self) -> ServiceResult<String> {
        serde_json::to_string_pretty(self.mirror.all()).map_err(ServiceError::Export)
    }

    /// Appends every session in `payload`, each under a fresh id.
    ///
    /// Returns the number of imported sessions.
    pub fn import_json(&mut self, payload: &str) -> ServiceResult<usize> {
        let imported = match self.parse_import(payload) {
            Ok(imported) => imported,
            Err(err) => {
                warn!("event=session_import module=service status=rejected error={err}");
                return Err(err);
            }
        };

        let count = imported.len();
        let mut next = self.mirror.all().to_vec();
        next.extend(imported);
        self.mirror.replace_all(next)?;

        info!(
            "event=session_import module=service status=ok imported={count} total={}",
            self.mirror.len()
        );
        Ok(count)
    }

    /// Filtered, searched and sorted list view.
    pub fn view<Tz: TimeZone>(
        &self,
        query: &SessionQuery,
        today: NaiveDate,
        tz: &Tz,
    ) -> Vec<StudySession> {
        project_sessions(self.mirror.all(), query, today, tz)
    }

    pub fn subject_hours(&self) -> Vec<SubjectHours> {
        subject_hours(self.mirror.all())
    }

    pub fn daily_hours<Tz: TimeZone>(&self, today: NaiveDate, tz: &Tz) -> Vec<DailyHours> {
        daily_hours(self.mirror.all(), today, tz)
    }

    fn parse_import(&mut self, payload: &str) -> ServiceResult<Vec<StudySession>> {
        let value: Value = serde_json::from_str(payload)
            .map_err(|err| ServiceError::Import(format!("not valid JSON: {err}")))?;
        let Value::Array(items) = value else {
            return Err(ServiceError::Import(
                "expected a JSON array of sessions".to_string(),
            ));
        };

        let mut imported = Vec::with_capacity(items.len());
        for (index, mut item) in items.into_iter().enumerate() {
            let id = self.mirror.next_id();
            let Some(fields) = item.as_object_mut() else {
                return Err(ServiceError::Import(format!("entry {index} is not an object")));
            };
            fields.insert("id".to_string(), Value::from(id.get()));

            let session: StudySession = serde_json::from_value(item)
                .map_err(|err| ServiceError::Import(format!("entry {index}: {err}")))?;
            session
                .validate()
                .map_err(|err| ServiceError::Import(format!("entry {index}: {err}")))?;
            imported.push(session);
        }
        Ok(imported)
    }

    fn commit(
        &mut self,
        event: &str,
        id: RecordId,
        next: Option<Vec<StudySession>>,
    ) -> ServiceResult<MutationOutcome> {
        let outcome = match next {
            Some(sessions) => {
                self.mirror.replace_all(sessions)?;
                MutationOutcome::Applied
            }
            None => MutationOutcome::NotFound,
        };
        Ok(self.log_outcome(event, id, outcome))
    }

    fn log_outcome(&self, event: &str, id: RecordId, outcome: MutationOutcome) -> MutationOutcome {
        info!(
            "event={event} module=service status={} session_id={id}",
            outcome.status()
        );
        outcome
    }
}
