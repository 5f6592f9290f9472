//! Lenient numeric deserialization
//!
//! The backend sends some numeric columns as JSON strings (`"5"`, `"0.30"`).

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

pub(crate) fn f64_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::String(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected a number, got '{}'", s))),
    }
}

pub(crate) fn u64_lenient<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let n = f64_lenient(deserializer)?;
    if n < 0.0 || n.fract() != 0.0 {
        return Err(de::Error::custom(format!("expected a non-negative integer, got {}", n)));
    }
    Ok(n as u64)
}
