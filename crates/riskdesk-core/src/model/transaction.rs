//! Transaction records

use super::id::RecordId;
use super::numeric::f64_lenient;
use super::rule::FlagLevel;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// A raw transaction row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: RecordId,
    #[serde(default)]
    pub trans_time: String,
    #[serde(default, deserialize_with = "f64_lenient")]
    pub trans_amt: f64,
    #[serde(default)]
    pub origination: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    /// Columns the console does not interpret
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Transaction {
    /// Parse `trans_time` (RFC 3339, naive `YYYY-MM-DD HH:MM:SS` taken as UTC,
    /// or a bare date)
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        let raw = self.trans_time.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(naive.and_utc());
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    /// Newest first; rows without a parseable time go last
    pub fn cmp_newest_first(a: &Transaction, b: &Transaction) -> Ordering {
        match (a.timestamp(), b.timestamp()) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// A transaction flagged for a user, as returned by the drill-down endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,
    #[serde(default)]
    pub flag: Option<FlagLevel>,
    /// Rule responsible for the flag, when the backend reports it
    #[serde(default, alias = "ruleId")]
    pub rule_id: Option<RecordId>,
    #[serde(default)]
    pub rule_name: Option<String>,
}
