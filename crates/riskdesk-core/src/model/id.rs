//! Record identifiers

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Backend record id, either an integer or an opaque string
///
/// Serializes back in the form it arrived in. Equality, hashing and ordering
/// go through the canonical form, so `Text("42")` and `Int(42)` name the same
/// record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

#[derive(PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Key<'a> {
    Int(i64),
    Text(&'a str),
}

impl RecordId {
    fn key(&self) -> Key<'_> {
        match self {
            RecordId::Int(n) => Key::Int(*n),
            RecordId::Text(s) => {
                let s = s.trim();
                match s.parse::<i64>() {
                    Ok(n) => Key::Int(n),
                    Err(_) => Key::Text(s),
                }
            }
        }
    }
}

impl PartialEq for RecordId {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for RecordId {}

impl Hash for RecordId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for RecordId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RecordId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for RecordId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse::<i64>() {
            Ok(n) => RecordId::Int(n),
            Err(_) => RecordId::Text(s.to_string()),
        })
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Int(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        match value.parse() {
            Ok(id) => id,
            Err(never) => match never {},
        }
    }
}
