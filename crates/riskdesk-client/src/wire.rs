//! Response envelopes used by the backend

use serde::{Deserialize, Deserializer};

/// List responses arrive as `{"data": [...]}`; a missing or null `data` is an empty list
#[derive(Debug, Deserialize)]
pub(crate) struct ListEnvelope<T> {
    #[serde(
        default = "Vec::new",
        deserialize_with = "null_as_empty",
        bound(deserialize = "T: Deserialize<'de>")
    )]
    pub data: Vec<T>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Single records arrive either wrapped in `{"data": ...}` or bare
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum MaybeEnveloped<T> {
    Enveloped { data: T },
    Bare(T),
}

impl<T> MaybeEnveloped<T> {
    pub fn into_inner(self) -> T {
        match self {
            MaybeEnveloped::Enveloped { data } => data,
            MaybeEnveloped::Bare(value) => value,
        }
    }
}

/// Error body shape; only `message` is read
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Extract a human message from an error response body
pub(crate) fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(message),
        }) if !message.trim().is_empty() => message,
        _ => body.trim().to_string(),
    }
}
