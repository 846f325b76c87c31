use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// A timestamp exactly as the document store handed it over.
///
/// Parsing is deferred so that a field which is present but malformed can be
/// told apart from one that is absent: the former still wins its fallback
/// chain and then scores zero.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// Native document-store timestamp object.
    Document {
        #[serde(alias = "_seconds")]
        seconds: i64,
        #[serde(default, alias = "_nanoseconds")]
        nanoseconds: u32,
    },
    /// Epoch milliseconds.
    Millis(i64),
    Text(String),
    Unrecognized(Value),
}

impl Timestamp {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn from_instant(instant: DateTime<Utc>) -> Self {
        Self::Text(instant.to_rfc3339())
    }

    /// Resolves the stored value to an instant, or `None` when it cannot be read.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Timestamp::Document {
                seconds,
                nanoseconds,
            } => DateTime::<Utc>::from_timestamp(*seconds, *nanoseconds),
            Timestamp::Millis(millis) => DateTime::<Utc>::from_timestamp_millis(*millis),
            Timestamp::Text(value) => parse_text(value),
            Timestamp::Unrecognized(_) => None,
        }
    }

    pub(crate) fn is_blank(&self) -> bool {
        matches!(self, Timestamp::Text(value) if value.trim().is_empty())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self::from_instant(value)
    }
}

/// Picks the first candidate that is present and not blank.
pub(crate) fn first_present<'a>(
    candidates: impl IntoIterator<Item = Option<&'a Timestamp>>,
) -> Option<&'a Timestamp> {
    candidates
        .into_iter()
        .flatten()
        .find(|timestamp| !timestamp.is_blank())
}

pub(crate) fn parse_text(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
