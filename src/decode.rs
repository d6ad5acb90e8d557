//! Lenient JSON decoding.
//!
//! Every field of a PokeAPI record is optional: a key that is missing or holds
//! a value of the wrong type decodes to `None`. Only a document that is not
//! well-formed JSON, or whose top level is not an object, fails as a whole.

use serde::de::{DeserializeOwned, Deserializer, Error as _};
use serde::Deserialize;
use serde_json::Value;

/// The payload could not be decoded at all.
#[derive(thiserror::Error, Debug)]
#[error("{0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// Decode a record from raw response bytes.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    let value: Value = serde_json::from_slice(bytes)?;
    if !value.is_object() {
        return Err(DecodeError(serde_json::Error::custom(
            "expected a JSON object at the top level",
        )));
    }
    Ok(serde_json::from_value(value)?)
}

/// Field decoder that turns a type mismatch into `None`.
///
/// Use together with `#[serde(default)]` so an absent key is `None` too.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// List variant of [`lenient`]: a non-array is `None`, and elements that do
/// not decode are skipped.
pub fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    Ok(Some(
        items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
    ))
}
