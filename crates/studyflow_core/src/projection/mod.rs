//! Read-only derived views over mirrored collections.
//!
//! # Invariants
//! - Projections never mutate their input.
//! - Calendar-day comparisons happen in the caller-supplied time zone.

pub mod analytics;
pub mod board;
pub mod planner;
