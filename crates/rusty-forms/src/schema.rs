// File: src/schema.rs
// Purpose: Schema descriptor model - ordered, typed, constrained fields

use crate::coerce::coerce;
use crate::error::SchemaError;
use crate::field::start_case;
use crate::value::Value;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashSet;
use std::fmt;

/// The value type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Date,
    Enum,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Date => "date",
            FieldKind::Enum => "enum",
        };
        f.write_str(name)
    }
}

/// One allowed value of an enum field, with its display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumOption {
    pub name: String,
    pub value: String,
}

impl EnumOption {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Option whose display name is the start-cased value
    pub fn from_value(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            name: start_case(&value),
            value,
        }
    }
}

/// A declarative rule evaluated against a coerced value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Constraint {
    MinLength { value: usize },
    MaxLength { value: usize },
    Pattern { regex: String, message: String },
    Min { value: f64 },
    Max { value: f64 },
    Gt { value: f64 },
    Lt { value: f64 },
    Integer,
    Email,
    Url,
    Tel,
    MinDate { value: NaiveDate },
    MaxDate { value: NaiveDate },
}

impl Constraint {
    pub fn min_length(value: usize) -> Self {
        Constraint::MinLength { value }
    }

    pub fn max_length(value: usize) -> Self {
        Constraint::MaxLength { value }
    }

    pub fn pattern(regex: impl Into<String>, message: impl Into<String>) -> Self {
        Constraint::Pattern {
            regex: regex.into(),
            message: message.into(),
        }
    }

    pub fn min(value: f64) -> Self {
        Constraint::Min { value }
    }

    pub fn max(value: f64) -> Self {
        Constraint::Max { value }
    }

    pub fn gt(value: f64) -> Self {
        Constraint::Gt { value }
    }

    pub fn lt(value: f64) -> Self {
        Constraint::Lt { value }
    }

    pub fn min_date(value: NaiveDate) -> Self {
        Constraint::MinDate { value }
    }

    pub fn max_date(value: NaiveDate) -> Self {
        Constraint::MaxDate { value }
    }

    /// Name used in schema errors and logs
    pub fn name(&self) -> &'static str {
        match self {
            Constraint::MinLength { .. } => "min_length",
            Constraint::MaxLength { .. } => "max_length",
            Constraint::Pattern { .. } => "pattern",
            Constraint::Min { .. } => "min",
            Constraint::Max { .. } => "max",
            Constraint::Gt { .. } => "gt",
            Constraint::Lt { .. } => "lt",
            Constraint::Integer => "integer",
            Constraint::Email => "email",
            Constraint::Url => "url",
            Constraint::Tel => "tel",
            Constraint::MinDate { .. } => "min_date",
            Constraint::MaxDate { .. } => "max_date",
        }
    }

    pub fn applies_to(&self, kind: FieldKind) -> bool {
        match self {
            Constraint::MinLength { .. }
            | Constraint::MaxLength { .. }
            | Constraint::Pattern { .. }
            | Constraint::Email
            | Constraint::Url
            | Constraint::Tel => kind == FieldKind::String,
            Constraint::Min { .. }
            | Constraint::Max { .. }
            | Constraint::Gt { .. }
            | Constraint::Lt { .. }
            | Constraint::Integer => kind == FieldKind::Number,
            Constraint::MinDate { .. } | Constraint::MaxDate { .. } => kind == FieldKind::Date,
        }
    }
}

fn default_true() -> bool {
    true
}

/// A single named field of a form schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    #[serde(default = "default_true")]
    pub required: bool,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<Constraint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<EnumOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
            nullable: false,
            default: None,
            constraints: Vec::new(),
            enum_values: None,
            label: None,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::String)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Number)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Date)
    }

    /// Enum field whose option names are start-cased from the values
    pub fn enumeration<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut field = Self::new(name, FieldKind::Enum);
        field.enum_values = Some(values.into_iter().map(EnumOption::from_value).collect());
        field
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn options(mut self, options: Vec<EnumOption>) -> Self {
        self.enum_values = Some(options);
        self
    }

    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn min_length(self, n: usize) -> Self {
        self.constraint(Constraint::min_length(n))
    }

    pub fn max_length(self, n: usize) -> Self {
        self.constraint(Constraint::max_length(n))
    }

    pub fn pattern(self, regex: impl Into<String>, message: impl Into<String>) -> Self {
        self.constraint(Constraint::pattern(regex, message))
    }

    pub fn min(self, n: f64) -> Self {
        self.constraint(Constraint::min(n))
    }

    pub fn max(self, n: f64) -> Self {
        self.constraint(Constraint::max(n))
    }

    pub fn gt(self, n: f64) -> Self {
        self.constraint(Constraint::gt(n))
    }

    pub fn lt(self, n: f64) -> Self {
        self.constraint(Constraint::lt(n))
    }

    pub fn integer(self) -> Self {
        self.constraint(Constraint::Integer)
    }

    pub fn email(self) -> Self {
        self.constraint(Constraint::Email)
    }

    pub fn url(self) -> Self {
        self.constraint(Constraint::Url)
    }

    pub fn tel(self) -> Self {
        self.constraint(Constraint::Tel)
    }

    pub fn min_date(self, d: NaiveDate) -> Self {
        self.constraint(Constraint::min_date(d))
    }

    pub fn max_date(self, d: NaiveDate) -> Self {
        self.constraint(Constraint::max_date(d))
    }

    /// Whether an empty submission is a presence error
    pub fn is_required(&self) -> bool {
        self.required && !self.nullable
    }

    /// Declared enum options, empty for other kinds
    pub fn options_slice(&self) -> &[EnumOption] {
        self.enum_values.as_deref().unwrap_or(&[])
    }

    fn check(&self) -> Result<(), SchemaError> {
        if self.name.trim().is_empty() {
            return Err(SchemaError::EmptyName);
        }

        if self.kind == FieldKind::Enum && self.options_slice().is_empty() {
            return Err(SchemaError::EmptyEnum(self.name.clone()));
        }

        for constraint in &self.constraints {
            if !constraint.applies_to(self.kind) {
                return Err(SchemaError::InapplicableConstraint {
                    field: self.name.clone(),
                    constraint: constraint.name().to_string(),
                    kind: self.kind,
                });
            }
            if let Constraint::Pattern { regex, .. } = constraint {
                regex::Regex::new(regex).map_err(|e| SchemaError::InvalidPattern {
                    field: self.name.clone(),
                    message: e.to_string(),
                })?;
            }
        }

        match &self.default {
            Some(Value::Null) if !self.nullable => Err(SchemaError::InvalidDefault {
                field: self.name.clone(),
                kind: self.kind,
                message: "null default on a non-nullable field".to_string(),
            }),
            Some(value) if !value.is_null() => coerce(self, &value.to_raw())
                .map(|_| ())
                .map_err(|message| SchemaError::InvalidDefault {
                    field: self.name.clone(),
                    kind: self.kind,
                    message,
                }),
            _ => Ok(()),
        }
    }
}

/// An ordered, validated list of field descriptors
///
/// Field order is tab order and focus order; it is preserved through
/// validation, rendering and serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FieldDescriptor>", into = "Vec<FieldDescriptor>")]
pub struct SchemaDescriptor {
    fields: Vec<FieldDescriptor>,
}

impl SchemaDescriptor {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self, SchemaError> {
        let mut seen = HashSet::new();
        for field in &fields {
            field.check()?;
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
        }
        Ok(Self { fields })
    }

    /// A schema with no fields
    pub fn empty() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Schema-order index of a field
    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// JSON form shipped to the browser in `data-schema`
    pub fn to_json(&self) -> JsonValue {
        serde_json::to_value(&self.fields).unwrap_or(JsonValue::Null)
    }
}

impl TryFrom<Vec<FieldDescriptor>> for SchemaDescriptor {
    type Error = SchemaError;

    fn try_from(fields: Vec<FieldDescriptor>) -> Result<Self, Self::Error> {
        SchemaDescriptor::new(fields)
    }
}

impl From<SchemaDescriptor> for Vec<FieldDescriptor> {
    fn from(schema: SchemaDescriptor) -> Self {
        schema.fields
    }
}

/// Collects fields and checks the schema invariants on `build`
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<FieldDescriptor>,
}

impl SchemaBuilder {
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn build(self) -> Result<SchemaDescriptor, SchemaError> {
        SchemaDescriptor::new(self.fields)
    }
}

/// Types that describe their own form schema
///
/// Usually implemented with `#[derive(FormSchema)]`.
pub trait FormSchema {
    fn schema() -> SchemaDescriptor;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder_keeps_order() {
        let schema = SchemaDescriptor::builder()
            .field(FieldDescriptor::string("firstName"))
            .field(FieldDescriptor::string("email").email())
            .field(FieldDescriptor::boolean("subscribe"))
            .build()
            .unwrap();

        assert_eq!(
            schema.names().collect::<Vec<_>>(),
            vec!["firstName", "email", "subscribe"]
        );
        assert_eq!(schema.position("subscribe"), Some(2));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = SchemaDescriptor::builder()
            .field(FieldDescriptor::string("name"))
            .field(FieldDescriptor::number("name"))
            .build()
            .unwrap_err();
        assert_eq!(err, SchemaError::DuplicateField("name".to_string()));
    }

    #[test]
    fn test_empty_enum_rejected() {
        let err = SchemaDescriptor::new(vec![FieldDescriptor::enumeration(
            "plan",
            Vec::<String>::new(),
        )])
        .unwrap_err();
        assert_eq!(err, SchemaError::EmptyEnum("plan".to_string()));
    }

    #[test]
    fn test_inapplicable_constraint_rejected() {
        let err = SchemaDescriptor::new(vec![FieldDescriptor::number("age").email()]).unwrap_err();
        assert_eq!(
            err,
            SchemaError::InapplicableConstraint {
                field: "age".to_string(),
                constraint: "email".to_string(),
                kind: FieldKind::Number,
            }
        );
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let err = SchemaDescriptor::new(vec![FieldDescriptor::string("code").pattern("(", "bad")])
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidPattern { .. }));
    }

    #[test]
    fn test_invalid_default_rejected() {
        let err = SchemaDescriptor::new(vec![FieldDescriptor::number("age").with_default("old")])
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidDefault { .. }));

        let err = SchemaDescriptor::new(vec![FieldDescriptor::enumeration("plan", ["free", "pro"])
            .with_default("enterprise")])
        .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidDefault { .. }));
    }

    #[test]
    fn test_is_required() {
        assert!(FieldDescriptor::string("a").is_required());
        assert!(!FieldDescriptor::string("a").optional().is_required());
        assert!(!FieldDescriptor::string("a").nullable().is_required());
    }

    #[test]
    fn test_enum_option_names() {
        let field = FieldDescriptor::enumeration("source", ["fromAFriend", "google"]);
        assert_eq!(
            field.options_slice(),
            &[
                EnumOption::new("From A Friend", "fromAFriend"),
                EnumOption::new("Google", "google"),
            ]
        );
    }

    #[test]
    fn test_json_round_trip_revalidates() {
        let schema = SchemaDescriptor::builder()
            .field(FieldDescriptor::string("name").min_length(2).label("Your name"))
            .field(FieldDescriptor::date("birthday").optional())
            .field(FieldDescriptor::number("age").integer().gt(0.0))
            .build()
            .unwrap();

        let json = serde_json::to_string(&schema).unwrap();
        let back: SchemaDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, schema);

        let invalid = r#"[{"name":"a","kind":"string"},{"name":"a","kind":"number"}]"#;
        assert!(serde_json::from_str::<SchemaDescriptor>(invalid).is_err());
    }

    #[test]
    fn test_constraint_json_shape() {
        let json = serde_json::to_value(Constraint::min_length(3)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "minLength", "value": 3}));

        let json = serde_json::to_value(Constraint::Email).unwrap();
        assert_eq!(json, serde_json::json!({"type": "email"}));
    }
}
