// File: src/field.rs
// Purpose: Field deriver - descriptor + overrides -> field template

use crate::schema::{Constraint, EnumOption, FieldDescriptor, FieldKind, SchemaDescriptor};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The UI control a field renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    Text,
    Email,
    Url,
    Tel,
    Number,
    Checkbox,
    Select,
    Date,
}

impl ControlKind {
    /// The `type` attribute for `<input>` controls
    pub fn input_type(&self) -> &'static str {
        match self {
            ControlKind::Text => "text",
            ControlKind::Email => "email",
            ControlKind::Url => "url",
            ControlKind::Tel => "tel",
            ControlKind::Number => "number",
            ControlKind::Checkbox => "checkbox",
            ControlKind::Select => "select",
            ControlKind::Date => "date",
        }
    }
}

/// Caller-supplied per-field replacements
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    labels: HashMap<String, String>,
    options: HashMap<String, Vec<EnumOption>>,
    values: HashMap<String, String>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, field: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(field.into(), label.into());
        self
    }

    pub fn options(mut self, field: impl Into<String>, options: Vec<EnumOption>) -> Self {
        self.options.insert(field.into(), options);
        self
    }

    pub fn value(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(field.into(), value.into());
        self
    }

    pub fn label_for(&self, field: &str) -> Option<&str> {
        self.labels.get(field).map(String::as_str)
    }

    pub fn options_for(&self, field: &str) -> Option<&[EnumOption]> {
        self.options.get(field).map(Vec::as_slice)
    }

    pub fn value_for(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }
}

/// Everything needed to render one field, before any submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldTemplate {
    pub name: String,
    pub control: ControlKind,
    pub label: String,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<EnumOption>,
    pub value: String,
    /// `step` for number inputs: `1` when the field is an integer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,
}

/// Derive the template for one field
pub fn derive_field(field: &FieldDescriptor, overrides: &Overrides) -> FieldTemplate {
    let control = control_for(field);

    let label = overrides
        .label_for(&field.name)
        .map(str::to_string)
        .or_else(|| field.label.clone())
        .unwrap_or_else(|| start_case(&field.name));

    let options = overrides
        .options_for(&field.name)
        .map(<[EnumOption]>::to_vec)
        .unwrap_or_else(|| field.options_slice().to_vec());

    let value = overrides
        .value_for(&field.name)
        .map(str::to_string)
        .or_else(|| field.default.as_ref().map(|d| d.to_raw()))
        .unwrap_or_default();

    let step = (control == ControlKind::Number).then(|| {
        if field.constraints.contains(&Constraint::Integer) {
            "1".to_string()
        } else {
            "any".to_string()
        }
    });

    FieldTemplate {
        name: field.name.clone(),
        control,
        label,
        required: field.is_required(),
        options,
        value,
        step,
    }
}

/// Derive templates for every field, in schema order
pub fn derive_fields(schema: &SchemaDescriptor, overrides: &Overrides) -> Vec<FieldTemplate> {
    schema
        .fields()
        .iter()
        .map(|field| derive_field(field, overrides))
        .collect()
}

fn control_for(field: &FieldDescriptor) -> ControlKind {
    match field.kind {
        FieldKind::Boolean => ControlKind::Checkbox,
        FieldKind::Enum => ControlKind::Select,
        FieldKind::Date => ControlKind::Date,
        FieldKind::Number => ControlKind::Number,
        FieldKind::String => field
            .constraints
            .iter()
            .find_map(|c| match c {
                Constraint::Email => Some(ControlKind::Email),
                Constraint::Url => Some(ControlKind::Url),
                Constraint::Tel => Some(ControlKind::Tel),
                _ => None,
            })
            .unwrap_or(ControlKind::Text),
    }
}

/// Turn an identifier into a label: `howYouFoundOutAboutUs` becomes
/// "How You Found Out About Us", `first_name` becomes "First Name"
pub fn start_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(prev) = current.chars().last() {
            let next = chars.get(i + 1).copied();
            let boundary = (prev.is_lowercase() && c.is_uppercase())
                || (prev.is_alphabetic() != c.is_alphabetic())
                || (prev.is_uppercase()
                    && c.is_uppercase()
                    && next.map_or(false, char::is_lowercase));
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
