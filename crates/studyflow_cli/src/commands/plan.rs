use super::{missing, report};
use crate::cli::{EditSessionArgs, NewSessionArgs, PlanCommand};
use crate::config::AppConfig;
use anyhow::{bail, Context};
use chrono::{Local, Utc};
use std::path::PathBuf;
use studyflow_core::{
    KeyValueStore, PlannerService, RecordStore, SessionDraft, SessionQuery, StudySession,
    EXPORT_FILE_NAME,
};

pub fn handle<S: KeyValueStore>(
    action: PlanCommand,
    kv: S,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let mut planner = PlannerService::load(RecordStore::new(kv), config.summary_source());

    match action {
        PlanCommand::Add(args) => {
            let session = planner
                .add_session(new_draft(args)?)
                .context("failed to add session")?;
            println!("added session {}", session.id);
            if !session.summary.is_empty() {
                println!("{}", session.summary);
            }
        }
        PlanCommand::Edit { id, fields } => {
            let Some(current) = planner.find(id) else {
                missing(id);
                return Ok(());
            };
            let draft = edited_draft(current, fields)?;
            let outcome = planner
                .update_session(id, draft)
                .context("failed to update session")?;
            report(outcome, "updated session", id);
        }
        PlanCommand::Rm { id } => {
            let outcome = planner.delete_session(id).context("failed to delete session")?;
            report(outcome, "deleted session", id);
        }
        PlanCommand::Done { id } => {
            let outcome = planner
                .mark_complete(id, Utc::now())
                .context("failed to complete session")?;
            report(outcome, "completed session", id);
        }
        PlanCommand::Clear { yes } => {
            if !yes {
                bail!("refusing to delete all sessions without --yes");
            }
            planner.clear_all().context("failed to clear sessions")?;
            println!("cleared all sessions");
        }
        PlanCommand::List {
            filter,
            search,
            sort,
        } => {
            let query = SessionQuery {
                filter,
                search,
                sort,
            };
            let view = planner.view(&query, Local::now().date_naive(), &Local);
            if view.is_empty() {
                println!("No sessions found.");
            }
            for session in &view {
                render_session(session);
            }
        }
        PlanCommand::Export { path } => {
            let path = path.unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));
            let json = planner.export_json()?;
            std::fs::write(&path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!(
                "exported {} sessions to {}",
                planner.sessions().len(),
                path.display()
            );
        }
        PlanCommand::Import { path } => {
            let payload = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let count = planner.import_json(&payload)?;
            println!("imported {count} sessions");
        }
    }
    Ok(())
}

fn new_draft(args: NewSessionArgs) -> anyhow::Result<SessionDraft> {
    Ok(SessionDraft::new(
        &args.subject,
        &args.topic,
        args.duration,
        args.start.unwrap_or_else(Utc::now),
        args.priority,
        &args.tags,
        &args.notes,
    )?)
}

fn edited_draft(current: &StudySession, fields: EditSessionArgs) -> anyhow::Result<SessionDraft> {
    let draft = SessionDraft::new(
        fields.subject.as_deref().unwrap_or(&current.subject),
        fields.topic.as_deref().unwrap_or(&current.topic),
        fields.duration.unwrap_or(current.duration),
        fields.start.unwrap_or(current.start),
        fields.priority.unwrap_or(current.priority),
        fields.tags.as_deref().unwrap_or(""),
        fields.notes.as_deref().unwrap_or(&current.notes),
    )?;
    // Stored tags may contain commas; only re-split what was typed.
    Ok(match fields.tags {
        Some(_) => draft,
        None => draft.with_tags(current.tags.clone()),
    })
}

fn render_session(session: &StudySession) {
    let status = if session.is_done() { "Done" } else { "Planned" };
    println!(
        "[{}] {} - {}  {}m  {}  {}  ({status})",
        session.id,
        session.subject,
        session.topic,
        session.duration,
        session.priority,
        session.start.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
    );
    if !session.tags.is_empty() {
        let shown: Vec<String> = session.tags.iter().take(3).map(|tag| format!("#{tag}")).collect();
        println!("    {}", shown.join(" "));
    }
    if !session.summary.is_empty() {
        println!("    {}", session.summary);
    }
    if !session.notes.is_empty() {
        println!("    Note: {}", session.notes);
    }
}

#[cfg(test)]
mod tests {
    use super::edited_draft;
    use crate::cli::EditSessionArgs;
    use chrono::Utc;
    use studyflow_core::{RecordId, SessionDraft, SessionPriority, StudySession};

    fn stored_with_tags(tags: &[&str]) -> StudySession {
        let draft = SessionDraft::new("CS", "Rust", 25, Utc::now(), SessionPriority::Normal, "", "")
            .unwrap();
        let mut session = StudySession::planned(RecordId::new(1), draft, String::new());
        session.tags = tags.iter().map(|tag| tag.to_string()).collect();
        session
    }

    fn no_edits() -> EditSessionArgs {
        EditSessionArgs {
            subject: None,
            topic: None,
            duration: None,
            start: None,
            priority: None,
            tags: None,
            notes: None,
        }
    }

    #[test]
    fn edit_without_tags_keeps_stored_tags_verbatim() {
        let current = stored_with_tags(&["rust, async", "review"]);
        let fields = EditSessionArgs {
            notes: Some("chapter 3".into()),
            ..no_edits()
        };

        let revised = current.revised(edited_draft(&current, fields).unwrap(), String::new());
        assert_eq!(revised.tags, current.tags);
        assert_eq!(revised.notes, "chapter 3");
    }

    #[test]
    fn edit_with_tags_parses_the_new_input() {
        let current = stored_with_tags(&["old"]);
        let fields = EditSessionArgs {
            tags: Some("a, b".into()),
            ..no_edits()
        };

        let revised = current.revised(edited_draft(&current, fields).unwrap(), String::new());
        assert_eq!(revised.tags, vec!["a".to_string(), "b".to_string()]);
    }
}
