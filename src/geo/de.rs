//! Lenient serde helpers for provider payloads
//!
//! Providers are inconsistent about JSON types: Nominatim sends coordinates as
//! strings and ids as numbers, ipstack sends `null` for most fields on
//! unknown addresses.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
}

/// f64 from a JSON number or a numeric string
pub fn f64_from_any<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s.trim().parse().map_err(serde::de::Error::custom),
        StringOrNumber::Int(n) => Ok(n as f64),
        StringOrNumber::Uint(n) => Ok(n as f64),
        StringOrNumber::Float(n) => Ok(n),
    }
}

/// Optional f64 from a JSON number, numeric string or null
pub fn opt_f64_from_any<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<StringOrNumber>::deserialize(deserializer)? {
        None => Ok(None),
        Some(StringOrNumber::String(s)) if s.trim().is_empty() => Ok(None),
        Some(StringOrNumber::String(s)) => {
            s.trim().parse().map(Some).map_err(serde::de::Error::custom)
        }
        Some(StringOrNumber::Int(n)) => Ok(Some(n as f64)),
        Some(StringOrNumber::Uint(n)) => Ok(Some(n as f64)),
        Some(StringOrNumber::Float(n)) => Ok(Some(n)),
    }
}

/// String from a JSON string or number; null becomes empty
pub fn string_from_any<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_string_from_any(deserializer)?.unwrap_or_default())
}

/// Optional string from a JSON string, number or null
pub fn opt_string_from_any<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<StringOrNumber>::deserialize(deserializer)? {
        None => None,
        Some(StringOrNumber::String(s)) => Some(s),
        Some(StringOrNumber::Int(n)) => Some(n.to_string()),
        Some(StringOrNumber::Uint(n)) => Some(n.to_string()),
        Some(StringOrNumber::Float(n)) => Some(n.to_string()),
    })
}
