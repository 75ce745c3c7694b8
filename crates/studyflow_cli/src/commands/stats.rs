use chrono::Local;
use studyflow_core::{KeyValueStore, NoEnrichment, PlannerService, RecordStore};

pub fn handle<S: KeyValueStore>(kv: S) -> anyhow::Result<()> {
    let planner = PlannerService::load(RecordStore::new(kv), NoEnrichment);

    println!("Study hours per subject");
    let subjects = planner.subject_hours();
    if subjects.is_empty() {
        println!("  No data yet");
    }
    for entry in &subjects {
        println!("  {:<24} {:>7.2}", entry.subject, entry.hours);
    }

    println!();
    println!("Daily study (last 14 days)");
    for day in planner.daily_hours(Local::now().date_naive(), &Local) {
        let bar = "#".repeat((day.hours * 4.0).round() as usize);
        println!("  {}  {:>5.2}  {bar}", day.date.format("%Y-%m-%d"), day.hours);
    }
    Ok(())
}
