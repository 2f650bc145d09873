// File: src/raw.rs
// Purpose: Raw (pre-coercion) submitted values as they arrive from a form body

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// Submitted form values keyed by field name
///
/// Repeated keys are kept in arrival order. Scalar fields read the last
/// value, which is what a `hidden` + `checkbox` pair relies on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSubmission {
    fields: Vec<(String, Vec<String>)>,
}

impl RawSubmission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `application/x-www-form-urlencoded` body
    pub fn from_urlencoded(body: &str) -> Self {
        body.split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((k, v)) => (decode_component(k), decode_component(v)),
                None => (decode_component(pair), String::new()),
            })
            .collect()
    }

    /// Append a value, keeping any earlier values for the same key
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some((_, values)) => values.push(value),
            None => self.fields.push((name, vec![value])),
        }
    }

    /// Builder form of [`push`](Self::push)
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    /// Last submitted value for a field
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_all(name).last().map(String::as_str)
    }

    /// Every submitted value for a field, in arrival order
    pub fn get_all(&self, name: &str) -> &[String] {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Encode back to a form body
    pub fn to_urlencoded(&self) -> String {
        self.fields
            .iter()
            .flat_map(|(k, values)| {
                values
                    .iter()
                    .map(move |v| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Decode one urlencoded component, treating `+` as a space
fn decode_component(s: &str) -> String {
    let spaced = s.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned(),
    }
}

impl FromIterator<(String, String)> for RawSubmission {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut raw = RawSubmission::new();
        for (k, v) in iter {
            raw.push(k, v);
        }
        raw
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for RawSubmission {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }
}

/// Single values serialize as strings, repeated ones as arrays
impl Serialize for RawSubmission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, values) in &self.fields {
            match values.as_slice() {
                [single] => map.serialize_entry(k, single)?,
                many => map.serialize_entry(k, many)?,
            }
        }
        map.end()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl<'de> Deserialize<'de> for RawSubmission {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::<String, OneOrMany>::deserialize(deserializer)?;
        let mut raw = RawSubmission::new();
        for (k, v) in map {
            match v {
                OneOrMany::One(value) => raw.push(k, value),
                OneOrMany::Many(values) => {
                    for value in values {
                        raw.push(k.clone(), value);
                    }
                }
            }
        }
        Ok(raw)
    }
}
