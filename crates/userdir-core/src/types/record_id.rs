//! Record identifier type.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Upper bound (exclusive) for locally generated ids.
const GENERATED_ID_RANGE: u64 = 1_000_000_000;

/// An opaque record identifier.
///
/// Remote records carry numeric ids; snapshots written by other tools may
/// hold them as strings. Both forms are kept verbatim, and two ids are equal
/// when their text forms match, so `1` and `"1"` name the same record.
///
/// # Example
///
/// ```
/// use userdir_core::RecordId;
///
/// let id: RecordId = "583231".parse().unwrap();
/// assert_eq!(id, RecordId::Number(583231));
/// assert_eq!(id, RecordId::Text("583231".to_string()));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(u64),
    Text(String),
}

impl RecordId {
    /// Parse an id from text, validating that it is not empty.
    ///
    /// All-digit input without leading zeros becomes a numeric id.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is empty or only whitespace.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref().trim();

        if s.is_empty() {
            return Err(InvalidInputError::RecordId {
                value: s.to_string(),
                reason: "cannot be empty".to_string(),
            }
            .into());
        }

        // Leading zeros would not survive a round trip through u64.
        let canonical = s == "0" || !s.starts_with('0');
        if canonical
            && s.bytes().all(|b| b.is_ascii_digit())
            && let Ok(n) = s.parse::<u64>()
        {
            return Ok(RecordId::Number(n));
        }

        Ok(RecordId::Text(s.to_string()))
    }

    /// Generate a random id for a locally created record.
    ///
    /// Uniqueness is not checked against the collection.
    pub fn generate() -> Self {
        RecordId::Number(rand::thread_rng().gen_range(0..GENERATED_ID_RANGE))
    }

    /// Returns the canonical text form used for comparison.
    pub fn to_text(&self) -> String {
        match self {
            RecordId::Number(n) => n.to_string(),
            RecordId::Text(s) => s.clone(),
        }
    }
}

impl PartialEq for RecordId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RecordId::Number(a), RecordId::Number(b)) => a == b,
            (RecordId::Text(a), RecordId::Text(b)) => a == b,
            _ => self.to_text() == other.to_text(),
        }
    }
}

impl Eq for RecordId {}

impl Hash for RecordId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_text().hash(state);
    }
}

impl From<u64> for RecordId {
    fn from(n: u64) -> Self {
        RecordId::Number(n)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for RecordId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
