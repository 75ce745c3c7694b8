use crate::config::AppConfig;
use chrono::Utc;
use std::io::Write;
use std::thread;
use std::time::Duration;
use studyflow_core::{
    KeyValueStore, PlannerService, PomodoroTimer, RecordId, RecordStore, TimerEvent,
};

const TICK: Duration = Duration::from_secs(1);

/// Runs one countdown; the ticker dies with this call.
///
/// The stored collection is re-read every tick. The countdown stops early
/// when its session is edited or removed elsewhere, and completion is
/// written against the fresh copy.
pub fn handle<S: KeyValueStore>(id: RecordId, kv: S, config: &AppConfig) -> anyhow::Result<()> {
    let mut planner = PlannerService::load(RecordStore::new(kv), config.summary_source());
    let Some(session) = planner.find(id).cloned() else {
        super::missing(id);
        return Ok(());
    };
    println!("{} - {}", session.subject, session.topic);

    let mut timer = PomodoroTimer::new(session.id, session.duration);
    timer.start();
    let mut stdout = std::io::stdout();

    loop {
        write!(stdout, "\r{}   ", timer.format_remaining())?;
        stdout.flush()?;
        thread::sleep(TICK);

        planner.refresh();
        match planner.find(id) {
            None => {
                writeln!(stdout)?;
                println!("session {id} was removed; timer stopped");
                return Ok(());
            }
            Some(current) if *current != session => {
                writeln!(stdout)?;
                println!("session {id} changed; timer stopped");
                return Ok(());
            }
            Some(_) => {}
        }

        match timer.tick() {
            TimerEvent::Tick(_) => continue,
            TimerEvent::Completed(session_id) => {
                writeln!(stdout, "\r0:00   ")?;
                let outcome = planner.mark_complete(session_id, Utc::now())?;
                super::report(outcome, "completed session", session_id);
                return Ok(());
            }
            TimerEvent::Idle => return Ok(()),
        }
    }
}
