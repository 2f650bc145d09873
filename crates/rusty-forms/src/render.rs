// File: src/render.rs
// Purpose: Form renderer - schema + templates + latest result -> maud markup

use crate::coerce::parse_checkbox;
use crate::field::{derive_fields, ControlKind, FieldTemplate, Overrides};
use crate::focus::focus_target;
use crate::schema::SchemaDescriptor;
use crate::submit::{SubmissionResult, INSTANCE_FIELD};
use crate::validate::FieldError;
use maud::{html, Markup};

/// Default submit button text
pub const DEFAULT_BUTTON_LABEL: &str = "OK";

/// One field as it is about to be rendered
#[derive(Debug, Clone, PartialEq)]
pub struct RenderField {
    pub template: FieldTemplate,
    pub error: Option<FieldError>,
    /// Current raw value: the echoed submission after a failure, else the
    /// template's initial value
    pub value: String,
    pub autofocus: bool,
}

impl RenderField {
    pub fn name(&self) -> &str {
        &self.template.name
    }

    pub fn label_id(&self) -> String {
        format!("label-for-{}", self.template.name)
    }

    pub fn errors_id(&self) -> String {
        format!("errors-for-{}", self.template.name)
    }

    pub fn is_invalid(&self) -> bool {
        self.error.is_some()
    }

    pub fn is_checked(&self) -> bool {
        parse_checkbox(&self.value)
    }

    pub fn messages(&self) -> &[String] {
        self.error.as_ref().map(|e| e.messages.as_slice()).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonState {
    pub label: String,
}

pub type FieldSlot = Box<dyn Fn(&RenderField) -> Markup + Send + Sync>;
pub type ButtonSlot = Box<dyn Fn(&ButtonState) -> Markup + Send + Sync>;
pub type GlobalErrorsSlot = Box<dyn Fn(&[String]) -> Markup + Send + Sync>;

/// Render strategies, each replaceable on its own
pub struct Slots {
    pub label: FieldSlot,
    pub input: FieldSlot,
    pub errors: FieldSlot,
    pub button: ButtonSlot,
    pub global_errors: GlobalErrorsSlot,
}

impl Default for Slots {
    fn default() -> Self {
        Self {
            label: Box::new(default_label),
            input: Box::new(default_input),
            errors: Box::new(default_errors),
            button: Box::new(default_button),
            global_errors: Box::new(default_global_errors),
        }
    }
}

pub fn default_label(field: &RenderField) -> Markup {
    html! {
        label id=(field.label_id()) for=(field.name()) { (field.template.label) }
    }
}

pub fn default_input(field: &RenderField) -> Markup {
    let invalid = if field.is_invalid() { "true" } else { "false" };
    let required = field.template.required.then_some("true");
    let described_by = field.is_invalid().then(|| field.errors_id());

    match field.template.control {
        ControlKind::Checkbox => html! {
            input type="checkbox" id=(field.name()) name=(field.name()) value="on"
                checked[field.is_checked()]
                aria-labelledby=(field.label_id())
                aria-invalid=(invalid)
                aria-required=[required]
                aria-describedby=[described_by]
                autofocus[field.autofocus];
        },
        ControlKind::Select => html! {
            select id=(field.name()) name=(field.name())
                aria-labelledby=(field.label_id())
                aria-invalid=(invalid)
                aria-required=[required]
                aria-describedby=[described_by]
                autofocus[field.autofocus] {
                @if !field.template.required {
                    option value="" {}
                }
                @for opt in &field.template.options {
                    option value=(opt.value) selected[opt.value == field.value] { (opt.name) }
                }
            }
        },
        control => html! {
            input type=(control.input_type()) id=(field.name()) name=(field.name())
                value=(field.value)
                step=[field.template.step.as_deref()]
                aria-labelledby=(field.label_id())
                aria-invalid=(invalid)
                aria-required=[required]
                aria-describedby=[described_by]
                autofocus[field.autofocus];
        },
    }
}

pub fn default_errors(field: &RenderField) -> Markup {
    html! {
        @if field.is_invalid() {
            div id=(field.errors_id()) role="alert" {
                @for message in field.messages() {
                    div { (message) }
                }
            }
        }
    }
}

pub fn default_button(button: &ButtonState) -> Markup {
    html! {
        button type="submit" { (button.label) }
    }
}

pub fn default_global_errors(errors: &[String]) -> Markup {
    html! {
        @if !errors.is_empty() {
            div role="alert" data-global-errors {
                @for message in errors {
                    div { (message) }
                }
            }
        }
    }
}

/// Form builder
///
/// ```rust,ignore
/// let markup = Form::new(&schema)
///     .result(result.as_ref())
///     .button_label("Sign up")
///     .render();
/// ```
pub struct Form<'a> {
    schema: &'a SchemaDescriptor,
    overrides: Overrides,
    result: Option<&'a SubmissionResult>,
    action: Option<String>,
    button_label: String,
    instance: Option<String>,
    slots: Slots,
}

impl<'a> Form<'a> {
    pub fn new(schema: &'a SchemaDescriptor) -> Self {
        Self {
            schema,
            overrides: Overrides::default(),
            result: None,
            action: None,
            button_label: DEFAULT_BUTTON_LABEL.to_string(),
            instance: None,
            slots: Slots::default(),
        }
    }

    pub fn overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn result(mut self, result: Option<&'a SubmissionResult>) -> Self {
        self.result = result;
        self
    }

    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn button_label(mut self, label: impl Into<String>) -> Self {
        self.button_label = label.into();
        self
    }

    /// Embed a form instance token for the double-submit guard
    pub fn instance(mut self, token: impl Into<String>) -> Self {
        self.instance = Some(token.into());
        self
    }

    pub fn label(mut self, slot: impl Fn(&RenderField) -> Markup + Send + Sync + 'static) -> Self {
        self.slots.label = Box::new(slot);
        self
    }

    pub fn input(mut self, slot: impl Fn(&RenderField) -> Markup + Send + Sync + 'static) -> Self {
        self.slots.input = Box::new(slot);
        self
    }

    pub fn errors(mut self, slot: impl Fn(&RenderField) -> Markup + Send + Sync + 'static) -> Self {
        self.slots.errors = Box::new(slot);
        self
    }

    pub fn button(mut self, slot: impl Fn(&ButtonState) -> Markup + Send + Sync + 'static) -> Self {
        self.slots.button = Box::new(slot);
        self
    }

    pub fn global_errors(
        mut self,
        slot: impl Fn(&[String]) -> Markup + Send + Sync + 'static,
    ) -> Self {
        self.slots.global_errors = Box::new(slot);
        self
    }

    /// Fields in schema order, merged with the latest result
    pub fn fields(&self) -> Vec<RenderField> {
        let focus = focus_target(self.schema, self.result);
        let submitted = self.result.and_then(SubmissionResult::submitted_values);

        derive_fields(self.schema, &self.overrides)
            .into_iter()
            .map(|template| {
                let error = self.result.and_then(|r| r.error_for(&template.name)).cloned();
                let value = match submitted {
                    Some(raw) => raw.get(&template.name).unwrap_or_default().to_string(),
                    None => template.value.clone(),
                };
                let autofocus = focus == Some(template.name.as_str());
                RenderField {
                    template,
                    error,
                    value,
                    autofocus,
                }
            })
            .collect()
    }

    /// Default layout: every field, then global errors, then the button
    pub fn render(&self) -> Markup {
        self.render_with(|parts| {
            html! {
                @for field in parts.fields() {
                    (parts.render_field(field))
                }
                (parts.errors())
                (parts.button())
            }
        })
    }

    /// Custom layout through a children function
    pub fn render_with(&self, children: impl FnOnce(&FormParts<'_>) -> Markup) -> Markup {
        let parts = FormParts {
            fields: self.fields(),
            slots: &self.slots,
            global_errors: self.result.map(SubmissionResult::global_errors).unwrap_or(&[]),
            button: ButtonState {
                label: self.button_label.clone(),
            },
        };
        let schema = serde_json::to_string(self.schema).unwrap_or_default();

        html! {
            form method="post" action=[self.action.as_deref()] novalidate data-rusty-form data-schema=(schema) {
                @if let Some(token) = &self.instance {
                    input type="hidden" name=(INSTANCE_FIELD) value=(token);
                }
                (children(&parts))
            }
        }
    }
}

/// Pieces handed to a children function
pub struct FormParts<'f> {
    fields: Vec<RenderField>,
    slots: &'f Slots,
    global_errors: &'f [String],
    button: ButtonState,
}

impl FormParts<'_> {
    pub fn fields(&self) -> &[RenderField] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&RenderField> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Label, control and errors for one field through the slots
    pub fn render_field(&self, field: &RenderField) -> Markup {
        html! {
            div data-field-name=(field.name()) {
                ((self.slots.label)(field))
                ((self.slots.input)(field))
                ((self.slots.errors)(field))
            }
        }
    }

    /// Render a field by name; unknown names render nothing
    pub fn field(&self, name: &str) -> Markup {
        self.field_with(name, |_| {})
    }

    /// Render a field by name after adjusting it, e.g. relabelling
    pub fn field_with(&self, name: &str, adjust: impl FnOnce(&mut RenderField)) -> Markup {
        match self.get(name) {
            Some(field) => {
                let mut field = field.clone();
                adjust(&mut field);
                self.render_field(&field)
            }
            None => html! {},
        }
    }

    pub fn label(&self, name: &str) -> Markup {
        self.get(name).map(|f| (self.slots.label)(f)).unwrap_or_else(|| html! {})
    }

    pub fn input(&self, name: &str) -> Markup {
        self.get(name).map(|f| (self.slots.input)(f)).unwrap_or_else(|| html! {})
    }

    pub fn field_errors(&self, name: &str) -> Markup {
        self.get(name).map(|f| (self.slots.errors)(f)).unwrap_or_else(|| html! {})
    }

    /// Global error list
    pub fn errors(&self) -> Markup {
        (self.slots.global_errors)(self.global_errors)
    }

    pub fn button(&self) -> Markup {
        (self.slots.button)(&self.button)
    }
}
