pub mod board;
pub mod plan;
pub mod stats;
pub mod timer;

use studyflow_core::MutationOutcome;

/// Prints the stale-reference warning for missed ids.
pub(crate) fn report(outcome: MutationOutcome, what: &str, id: impl std::fmt::Display) {
    match outcome {
        MutationOutcome::Applied => println!("{what} {id}"),
        MutationOutcome::NotFound => missing(id),
    }
}

pub(crate) fn missing(id: impl std::fmt::Display) {
    eprintln!("warning: no record with id {id}; nothing changed");
}
