//! Kanban board use-case service.
//!
//! # Invariants
//! - New tasks always start in the `todo` lane.
//! - `move_task` rewrites only the `lane` field of the matching task.
//! - `update_task` keeps `id` and `lane`.

use super::{remove_record, replace_record, MutationOutcome, ServiceResult};
use crate::mirror::Mirror;
use crate::model::task::{Lane, Task, TaskDraft};
use crate::model::RecordId;
use crate::projection::board::{group_by_lane, LaneGroups};
use crate::store::{KeyValueStore, RecordStore, TASKS_KEY};
use log::info;

pub struct BoardService<S: KeyValueStore> {
    mirror: Mirror<Task, S>,
}

impl<S: KeyValueStore> BoardService<S> {
    /// Loads the board collection from `store`.
    pub fn load(store: RecordStore<S>) -> Self {
        Self::new(Mirror::load(store, TASKS_KEY))
    }

    pub fn new(mirror: Mirror<Task, S>) -> Self {
        Self { mirror }
    }

    pub fn tasks(&self) -> &[Task] {
        self.mirror.all()
    }

    pub fn find(&self, id: RecordId) -> Option<&Task> {
        self.mirror.find(id)
    }

    /// Board columns in lane order.
    pub fn lanes(&self) -> LaneGroups {
        group_by_lane(self.mirror.all())
    }

    /// Appends a new task to the `todo` lane.
    pub fn add_task(&mut self, draft: TaskDraft) -> ServiceResult<Task> {
        let task = Task::create(self.mirror.next_id(), draft);
        let mut next = self.mirror.all().to_vec();
        next.push(task.clone());
        self.mirror.replace_all(next)?;

        info!(
            "event=task_add module=service status=ok task_id={} total={}",
            task.id,
            self.mirror.len()
        );
        Ok(task)
    }

    /// Replaces the form fields of task `id`.
    pub fn update_task(
        &mut self,
        id: RecordId,
        draft: TaskDraft,
    ) -> ServiceResult<MutationOutcome> {
        let next = replace_record(self.mirror.all(), id, |task| task.revised(draft));
        self.commit("task_update", id, next)
    }

    pub fn delete_task(&mut self, id: RecordId) -> ServiceResult<MutationOutcome> {
        let next = remove_record(self.mirror.all(), id);
        self.commit("task_delete", id, next)
    }

    /// Reassigns task `id` to `lane`. Moving into the current lane is a no-op
    /// write that still reports `Applied`.
    pub fn move_task(&mut self, id: RecordId, lane: Lane) -> ServiceResult<MutationOutcome> {
        let next = replace_record(self.mirror.all(), id, |task| Task {
            lane,
            ..task.clone()
        });
        self.commit("task_move", id, next)
    }

    fn commit(
        &mut self,
        event: &str,
        id: RecordId,
        next: Option<Vec<Task>>,
    ) -> ServiceResult<MutationOutcome> {
        let outcome = match next {
            Some(tasks) => {
                self.mirror.replace_all(tasks)?;
                MutationOutcome::Applied
            }
            None => MutationOutcome::NotFound,
        };
        info!(
            "event={event} module=service status={} task_id={id}",
            outcome.status()
        );
        Ok(outcome)
    }
}
