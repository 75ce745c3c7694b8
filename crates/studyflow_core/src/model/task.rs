//! Kanban task record.
//!
//! # Invariants
//! - A task sits in exactly one `Lane` at all times.
//! - Edits replace title/description/category/priority but keep `id` and `lane`.

use super::{require_text, Record, RecordId, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Board column a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Lane {
    Todo,
    InProgress,
    Done,
}

impl Lane {
    /// Lanes in board order.
    pub const ALL: [Lane; 3] = [Lane::Todo, Lane::InProgress, Lane::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "inProgress",
            Self::Done => "done",
        }
    }
}

impl Display for Lane {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lane {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "todo" => Ok(Self::Todo),
            "inprogress" | "in_progress" | "in-progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ValidationError::UnknownValue {
                field: "lane",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Personal,
    Work,
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "personal" => Ok(Self::Personal),
            "work" => Ok(Self::Work),
            _ => Err(ValidationError::UnknownValue {
                field: "category",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskPriority {
    #[default]
    Low,
    Medium,
    High,
}

impl FromStr for TaskPriority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ValidationError::UnknownValue {
                field: "priority",
                value: s.to_string(),
            }),
        }
    }
}

/// Validated add/edit form input for a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: String,
    category: Category,
    priority: TaskPriority,
}

impl TaskDraft {
    /// Builds a draft, trimming text and rejecting an empty title.
    pub fn new(
        title: &str,
        description: &str,
        category: Category,
        priority: TaskPriority,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            title: require_text("title", title)?,
            description: description.trim().to_string(),
            category,
            priority,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// One card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default = "default_lane")]
    pub lane: Lane,
}

fn default_lane() -> Lane {
    Lane::Todo
}

impl Task {
    /// Creates a new task in the `todo` lane.
    pub fn create(id: RecordId, draft: TaskDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            category: draft.category,
            priority: draft.priority,
            lane: Lane::Todo,
        }
    }

    /// Returns this task with all form fields replaced by `draft`.
    pub fn revised(&self, draft: TaskDraft) -> Self {
        Self {
            lane: self.lane,
            ..Self::create(self.id, draft)
        }
    }

    /// Finished tasks are pinned to their lane on the board.
    pub fn is_draggable(&self) -> bool {
        self.lane != Lane::Done
    }
}

impl Record for Task {
    fn id(&self) -> RecordId {
        self.id
    }

    fn with_id(self, id: RecordId) -> Self {
        Self { id, ..self }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title).map(|_| ())
    }
}
