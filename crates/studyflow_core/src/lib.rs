//! Core domain logic for StudyFlow: a Kanban task board and a study-session
//! planner sharing one local persisted store.
//! This crate is the single source of truth for record invariants.

pub mod db;
pub mod enrich;
pub mod logging;
pub mod mirror;
pub mod model;
pub mod projection;
pub mod service;
pub mod store;
pub mod timer;

pub use enrich::{Enricher, NoEnrichment, WikipediaEnricher};
pub use logging::{default_log_level, init_logging, logging_status};
pub use mirror::Mirror;
pub use model::session::{SessionDraft, SessionPriority, SessionStatus, StudySession};
pub use model::task::{Category, Lane, Task, TaskDraft, TaskPriority};
pub use model::{IdGenerator, Record, RecordId, ValidationError};
pub use projection::analytics::{DailyHours, SubjectHours};
pub use projection::board::LaneGroups;
pub use projection::planner::{SessionFilter, SessionQuery, SessionSort};
pub use service::board_service::BoardService;
pub use service::planner_service::{PlannerService, EXPORT_FILE_NAME};
pub use service::{MutationOutcome, ServiceError, ServiceResult};
pub use store::{
    KeyValueStore, MemoryKeyValueStore, RecordStore, SqliteKeyValueStore, StoreError,
    SESSIONS_KEY, TASKS_KEY,
};
pub use timer::{PomodoroTimer, TimerEvent};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
