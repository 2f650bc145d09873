// File: src/validate.rs
// Purpose: Schema + raw submission -> coerced values or ordered field errors

use crate::coerce::coerce;
use crate::messages;
use crate::raw::RawSubmission;
use crate::schema::{Constraint, FieldDescriptor, FieldKind, SchemaDescriptor};
use crate::value::{Value, Values};
use once_cell::sync::Lazy;
use regex::Regex;
use rusty_forms_validation as predicates;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};

/// All messages for one failing field, in evaluation order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub messages: Vec<String>,
}

impl FieldError {
    pub fn new(field: impl Into<String>, messages: Vec<String>) -> Self {
        Self {
            field: field.into(),
            messages,
        }
    }
}

/// Compiled `pattern` constraints, keyed by source
static PATTERNS: Lazy<Mutex<HashMap<String, Regex>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Validate a whole submission
///
/// Fields are visited in schema order, so errors come back in schema order
/// too. Keys not declared by the schema are ignored.
pub fn validate(schema: &SchemaDescriptor, raw: &RawSubmission) -> Result<Values, Vec<FieldError>> {
    let mut values = Values::new();
    let mut errors = Vec::new();

    for field in schema.fields() {
        match validate_field(field, raw.get(&field.name)) {
            Ok(Some(value)) => values.insert(field.name.clone(), value),
            Ok(None) => {}
            Err(messages) => errors.push(FieldError::new(field.name.clone(), messages)),
        }
    }

    if errors.is_empty() {
        debug!(fields = values.len(), "submission valid");
        Ok(values)
    } else {
        debug!(
            failing = ?errors.iter().map(|e| e.field.as_str()).collect::<Vec<_>>(),
            "submission invalid"
        );
        Err(errors)
    }
}

/// Validate one field's raw value
///
/// `Ok(None)` means the field is optional, empty and has no default, so it
/// is left out of the coerced values.
pub fn validate_field(
    field: &FieldDescriptor,
    raw: Option<&str>,
) -> Result<Option<Value>, Vec<String>> {
    let mut raw = raw.unwrap_or_default().to_string();

    // An unchecked checkbox submits nothing; its default only sets the
    // initial checked state.
    if raw.is_empty() && field.kind != FieldKind::Boolean {
        if let Some(default) = field.default.as_ref().filter(|d| !d.is_null()) {
            raw = default.to_raw();
        }
    }

    if raw.is_empty() {
        if field.nullable {
            return Ok(Some(Value::Null));
        }
        if field.kind == FieldKind::Boolean {
            return Ok(Some(Value::Bool(false)));
        }
        if field.required {
            return Err(vec![messages::presence(field.kind)]);
        }
        return Ok(None);
    }

    let value = coerce(field, &raw).map_err(|message| vec![message])?;

    let failures: Vec<String> = field
        .constraints
        .iter()
        .filter_map(|constraint| check(constraint, &value))
        .collect();

    if failures.is_empty() {
        Ok(Some(value))
    } else {
        Err(failures)
    }
}

/// Evaluate one constraint, returning its message when it fails
pub fn check(constraint: &Constraint, value: &Value) -> Option<String> {
    match (constraint, value) {
        (Constraint::MinLength { value: n }, Value::Text(s)) => {
            (!predicates::has_min_length(s, *n)).then(|| messages::min_length(*n))
        }
        (Constraint::MaxLength { value: n }, Value::Text(s)) => {
            (!predicates::has_max_length(s, *n)).then(|| messages::max_length(*n))
        }
        (Constraint::Pattern { regex, message }, Value::Text(s)) => {
            (!matches_pattern(regex, s)).then(|| message.clone())
        }
        (Constraint::Email, Value::Text(s)) => {
            (!predicates::is_valid_email(s)).then(|| messages::INVALID_EMAIL.to_string())
        }
        (Constraint::Url, Value::Text(s)) => {
            (!predicates::is_valid_url(s)).then(|| messages::INVALID_URL.to_string())
        }
        (Constraint::Tel, Value::Text(s)) => {
            (!predicates::is_valid_phone(s)).then(|| messages::INVALID_PHONE.to_string())
        }
        (Constraint::Min { value: n }, Value::Number(v)) => {
            (!predicates::is_at_least(*v, *n)).then(|| messages::min(*n))
        }
        (Constraint::Max { value: n }, Value::Number(v)) => {
            (!predicates::is_at_most(*v, *n)).then(|| messages::max(*n))
        }
        (Constraint::Gt { value: n }, Value::Number(v)) => {
            (!predicates::is_greater_than(*v, *n)).then(|| messages::gt(*n))
        }
        (Constraint::Lt { value: n }, Value::Number(v)) => {
            (!predicates::is_less_than(*v, *n)).then(|| messages::lt(*n))
        }
        (Constraint::Integer, Value::Number(v)) => {
            (!predicates::is_integer(*v)).then(|| messages::NOT_AN_INTEGER.to_string())
        }
        (Constraint::MinDate { value: d }, Value::Date(v)) => {
            (v < d).then(|| messages::min_date(*d))
        }
        (Constraint::MaxDate { value: d }, Value::Date(v)) => {
            (v > d).then(|| messages::max_date(*d))
        }
        _ => None,
    }
}

fn matches_pattern(source: &str, text: &str) -> bool {
    let mut cache = PATTERNS.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(re) = cache.get(source) {
        return re.is_match(text);
    }
    match Regex::new(source) {
        Ok(re) => {
            let matched = re.is_match(text);
            cache.insert(source.to_string(), re);
            matched
        }
        Err(e) => {
            warn!(pattern = source, error = %e, "invalid pattern constraint");
            false
        }
    }
}
