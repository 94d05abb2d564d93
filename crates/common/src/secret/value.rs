use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/**
 * Secret values
 * =============
 * A secret is a flat mapping of field names to field values,
 *  exactly as a KV secrets engine hands it back.
 * Field types are only known once the secret has been read,
 *  so each field is tagged as either a plain string or
 *  anything else the backend was willing to store (numbers,
 *  booleans, nested objects, arrays).
 * Only string fields can be scrambled.
 */

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Other(serde_json::Value),
}

impl FieldValue {
    // Other(Value::String) only arises when built by hand; it still reads as a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) | FieldValue::Other(serde_json::Value::String(s)) => Some(s),
            FieldValue::Other(_) => None,
        }
    }

    pub fn is_string(&self) -> bool {
        self.as_str().is_some()
    }

    /// Short name for the kind of value held, safe to log
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::String(_) => "string",
            FieldValue::Other(serde_json::Value::Null) => "null",
            FieldValue::Other(serde_json::Value::Bool(_)) => "bool",
            FieldValue::Other(serde_json::Value::Number(_)) => "number",
            FieldValue::Other(serde_json::Value::String(_)) => "string",
            FieldValue::Other(serde_json::Value::Array(_)) => "array",
            FieldValue::Other(serde_json::Value::Object(_)) => "object",
        }
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => FieldValue::String(s),
            other => FieldValue::Other(other),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<FieldValue> for serde_json::Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::String(s) => serde_json::Value::String(s),
            FieldValue::Other(v) => v,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretValue(BTreeMap<String, FieldValue>);

impl SecretValue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut FieldValue)> {
        self.0.iter_mut()
    }

    /// Build a secret from a JSON object, as returned in the
    ///  `data` member of a KV read. Returns `None` for anything
    ///  that is not an object.
    pub fn from_json(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Object(map) => Some(Self(
                map.into_iter()
                    .map(|(field, value)| (field, FieldValue::from(value)))
                    .collect(),
            )),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.0
                .iter()
                .map(|(field, value)| (field.clone(), value.clone().into()))
                .collect(),
        )
    }
}

impl<K, V> FromIterator<(K, V)> for SecretValue
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// Never print field values, only the field names
impl fmt::Display for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.0.keys().cloned().collect::<Vec<_>>().join(", ");
        write!(f, "{{{}}}", fields)
    }
}
