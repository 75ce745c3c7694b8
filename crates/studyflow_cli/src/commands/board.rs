use super::{missing, report};
use crate::cli::{BoardCommand, EditTaskArgs, NewTaskArgs};
use anyhow::Context;
use studyflow_core::{BoardService, KeyValueStore, RecordStore, Task, TaskDraft};

pub fn handle<S: KeyValueStore>(action: BoardCommand, kv: S) -> anyhow::Result<()> {
    let mut board = BoardService::load(RecordStore::new(kv));

    match action {
        BoardCommand::Add(args) => {
            let task = board
                .add_task(new_draft(&args)?)
                .context("failed to add task")?;
            println!("added task {}", task.id);
        }
        BoardCommand::Edit { id, fields } => {
            let Some(current) = board.find(id) else {
                missing(id);
                return Ok(());
            };
            let draft = edited_draft(current, fields)?;
            let outcome = board.update_task(id, draft).context("failed to update task")?;
            report(outcome, "updated task", id);
        }
        BoardCommand::Rm { id } => {
            let outcome = board.delete_task(id).context("failed to delete task")?;
            report(outcome, "deleted task", id);
        }
        BoardCommand::Mv { id, lane } => {
            let outcome = board.move_task(id, lane).context("failed to move task")?;
            report(outcome, &format!("moved to {lane}: task"), id);
        }
        BoardCommand::Show => render_board(&board),
    }
    Ok(())
}

fn new_draft(args: &NewTaskArgs) -> anyhow::Result<TaskDraft> {
    Ok(TaskDraft::new(
        &args.title,
        &args.description,
        args.category,
        args.priority,
    )?)
}

fn edited_draft(current: &Task, fields: EditTaskArgs) -> anyhow::Result<TaskDraft> {
    Ok(TaskDraft::new(
        fields.title.as_deref().unwrap_or(&current.title),
        fields.description.as_deref().unwrap_or(&current.description),
        fields.category.unwrap_or(current.category),
        fields.priority.unwrap_or(current.priority),
    )?)
}

fn render_board<S: KeyValueStore>(board: &BoardService<S>) {
    for (lane, tasks) in board.lanes().iter() {
        println!("== {lane} ({}) ==", tasks.len());
        for task in tasks {
            // Finished cards are pinned: no move handle.
            let handle = if task.is_draggable() { "::" } else { "  " };
            println!(
                "{handle} [{}] {} ({:?}, {:?})",
                task.id, task.title, task.category, task.priority
            );
            if !task.description.is_empty() {
                println!("     {}", task.description);
            }
        }
    }
}
