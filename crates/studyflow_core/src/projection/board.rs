//! Lane grouping for the Kanban board.

use crate::model::task::{Lane, Task};

/// Tasks partitioned by lane, each lane in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaneGroups {
    pub todo: Vec<Task>,
    pub in_progress: Vec<Task>,
    pub done: Vec<Task>,
}

impl LaneGroups {
    pub fn lane(&self, lane: Lane) -> &[Task] {
        match lane {
            Lane::Todo => &self.todo,
            Lane::InProgress => &self.in_progress,
            Lane::Done => &self.done,
        }
    }

    /// Iterates lanes in board order (`todo`, `inProgress`, `done`).
    pub fn iter(&self) -> impl Iterator<Item = (Lane, &[Task])> {
        Lane::ALL.into_iter().map(move |lane| (lane, self.lane(lane)))
    }

    pub fn total(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }
}

pub fn group_by_lane(tasks: &[Task]) -> LaneGroups {
    let mut groups = LaneGroups::default();
    for task in tasks {
        let bucket = match task.lane {
            Lane::Todo => &mut groups.todo,
            Lane::InProgress => &mut groups.in_progress,
            Lane::Done => &mut groups.done,
        };
        bucket.push(task.clone());
    }
    groups
}
