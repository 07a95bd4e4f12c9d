//! Persisted record shapes and their request DTOs.
//!
//! Records serialize with camelCase keys, matching the JSON data files.
//! Optional fields default at deserialization so older files load cleanly.

pub mod blog;
pub mod category;
pub mod document;
pub mod family;
pub mod gallery;
pub mod organization;
pub mod reunion;
pub mod settings;

use serde::{Deserialize, Deserializer};

/// Deserialize a field that may be absent, `null`, or a value into
/// `Option<Option<T>>`, so updates can tell "leave alone" (`None`) from
/// "clear" (`Some(None)`). Use with `#[serde(default)]`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Accept a JSON string or number and keep it as text. Form inputs post
/// years as strings while older data files carry numbers.
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Text {
        Str(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<Text>::deserialize(deserializer)? {
        None => None,
        Some(Text::Str(s)) if s.trim().is_empty() => None,
        Some(Text::Str(s)) => Some(s),
        Some(Text::Int(n)) => Some(n.to_string()),
        Some(Text::Float(n)) => Some(n.to_string()),
    })
}

/// [`lenient_text`] for update DTOs: absent stays `None`, `null` or blank
/// becomes `Some(None)`.
pub(crate) fn double_lenient_text<'de, D>(
    deserializer: D,
) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_text(deserializer).map(Some)
}

/// Treat an empty string id as no id. The admin form posts `""` for
/// "no parent".
pub(crate) fn blank_as_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
