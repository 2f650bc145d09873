//! # rusty-forms
//!
//! Schema-driven forms: one schema declaration derives the HTML form, the
//! client-side validation and the authoritative server-side validation.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rusty_forms::{FormAction, FormSchema, SubmissionRequest, RawSubmission};
//!
//! #[derive(FormSchema)]
//! struct Signup {
//!     first_name: String,
//!     #[email]
//!     email: String,
//!     newsletter: bool,
//! }
//!
//! let action = FormAction::new(Signup::schema()).success_target("/success");
//! let result = action
//!     .submit(SubmissionRequest::new(RawSubmission::from_urlencoded(body)), |values, _env| async move {
//!         // persist `values` ...
//!         Ok(None)
//!     })
//!     .await;
//!
//! let markup = rusty_forms::Form::new(action.schema()).result(Some(&result)).render();
//! ```
//!
//! ## Architecture
//!
//! - **schema** - field descriptors, constraints and the schema builder
//! - **field** - deriving control kind, label, options and initial value
//! - **validate** - coercion plus constraint evaluation, errors in schema order
//! - **submit** - one submission attempt: validate, gate, mutate
//! - **render** - maud markup with replaceable slots
//! - **focus** - first-invalid-field focus reconciliation
//!
//! Predicates live in `rusty-forms-validation` so the WASM client runs the
//! exact same checks.

#![doc(html_root_url = "https://docs.rs/rusty-forms/0.1.0")]

pub mod coerce;
pub mod error;
pub mod field;
pub mod focus;
pub mod messages;
pub mod raw;
pub mod render;
pub mod schema;
pub mod submit;
pub mod validate;
pub mod value;

pub use error::{MutationError, SchemaError};
pub use field::{derive_field, derive_fields, start_case, ControlKind, FieldTemplate, Overrides};
pub use focus::{first_invalid, focus_target, FocusAction, FocusReconciler, FocusState};
pub use raw::RawSubmission;
pub use render::{ButtonState, Form, FormParts, RenderField, Slots};
pub use schema::{
    Constraint, EnumOption, FieldDescriptor, FieldKind, FormSchema, SchemaBuilder,
    SchemaDescriptor,
};
pub use submit::{
    Environment, FormAction, MutationOutcome, SubmissionRequest, SubmissionResult, INSTANCE_FIELD,
};
pub use validate::{validate, validate_field, FieldError};
pub use value::{Value, Values};

// Re-export the derive macro under the same name as the trait
#[cfg(feature = "derive")]
pub use rusty_forms_derive::FormSchema;

/// Validation predicates, re-exported for custom slots and handlers
pub mod predicates {
    pub use rusty_forms_validation::*;
}

// Re-exported so derive output and callers share one chrono/maud
pub use chrono;
pub use maud;
