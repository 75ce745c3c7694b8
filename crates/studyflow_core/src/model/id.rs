//! Record identity and id allocation.

use chrono::Utc;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};
use std::num::ParseIntError;
use std::str::FromStr;

/// Integer identity of a persisted record.
///
/// Serialized as a bare JSON number. Numeric strings are accepted on read,
/// since older board data stored edited ids as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(value) => Ok(Self(value)),
            Raw::Text(text) => text
                .parse()
                .map_err(|_| D::Error::custom(format!("invalid record id `{text}`"))),
        }
    }
}

/// Monotonic id allocator.
///
/// Ids follow wall-clock milliseconds but never repeat: each allocation is
/// strictly greater than the previous one and than every id the generator
/// was seeded with.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    /// Creates a generator that will never return any of `existing`.
    pub fn seeded(existing: impl IntoIterator<Item = RecordId>) -> Self {
        let last = existing.into_iter().map(RecordId::get).max().unwrap_or(0);
        Self { last }
    }

    /// Raises the floor so none of `existing` is handed out later.
    pub fn observe(&mut self, existing: impl IntoIterator<Item = RecordId>) {
        if let Some(max) = existing.into_iter().map(RecordId::get).max() {
            self.last = self.last.max(max);
        }
    }

    /// Allocates the next id from the current wall clock.
    pub fn next_id(&mut self) -> RecordId {
        self.next_at(Utc::now().timestamp_millis())
    }

    /// Allocates the next id given `now_ms` epoch milliseconds.
    pub fn next_at(&mut self, now_ms: i64) -> RecordId {
        let next = now_ms.max(self.last.saturating_add(1));
        self.last = next;
        RecordId(next)
    }
}

#[cfg(test)]
mod tests {
    use super::{IdGenerator, RecordId};

    #[test]
    fn observe_never_lowers_the_floor() {
        let mut ids = IdGenerator::seeded([RecordId::new(50)]);
        ids.observe([RecordId::new(10)]);
        assert_eq!(ids.next_at(0).get(), 51);
        ids.observe([RecordId::new(90), RecordId::new(70)]);
        assert_eq!(ids.next_at(0).get(), 91);
    }

    #[test]
    fn ids_stay_unique_within_the_same_millisecond() {
        let mut ids = IdGenerator::default();
        let first = ids.next_at(1_000);
        let second = ids.next_at(1_000);
        let third = ids.next_at(999);
        assert_eq!(first.get(), 1_000);
        assert_eq!(second.get(), 1_001);
        assert_eq!(third.get(), 1_002);
    }

    #[test]
    fn seeded_generator_skips_existing_ids() {
        let mut ids = IdGenerator::seeded([RecordId::new(5_000), RecordId::new(42)]);
        assert_eq!(ids.next_at(10).get(), 5_001);
    }

    #[test]
    fn deserializes_numeric_and_text_ids() {
        let number: RecordId = serde_json::from_str("1700000000000").unwrap();
        let text: RecordId = serde_json::from_str("\"1700000000001\"").unwrap();
        assert_eq!(number.get(), 1_700_000_000_000);
        assert_eq!(text.get(), 1_700_000_000_001);
        assert!(serde_json::from_str::<RecordId>("\"abc\"").is_err());
    }
}
