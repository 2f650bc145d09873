//! rusty-forms WASM
//!
//! WebAssembly bindings that run the rusty-forms validator in the browser.
//! The schema comes from the form's `data-schema` attribute, so client and
//! server evaluate exactly the same descriptors and messages.

use rusty_forms::{
    derive_fields, first_invalid, validate, FieldError, Overrides, RawSubmission,
    SchemaDescriptor, Values,
};
use rusty_forms_validation as core;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Result of a client-side validation pass
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientValidation {
    pub ok: bool,
    pub errors: Vec<FieldError>,
    /// Field the client script should focus
    pub focus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Values>,
}

/// Validate raw form values against a schema
pub fn client_validate(schema: &SchemaDescriptor, raw: &RawSubmission) -> ClientValidation {
    match validate(schema, raw) {
        Ok(values) => ClientValidation {
            ok: true,
            errors: Vec::new(),
            focus: None,
            values: Some(values),
        },
        Err(errors) => ClientValidation {
            ok: false,
            focus: first_invalid(schema, &errors).map(str::to_string),
            errors,
            values: None,
        },
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsValue::from)
}

fn parse_schema(schema: JsValue) -> Result<SchemaDescriptor, JsValue> {
    serde_wasm_bindgen::from_value(schema).map_err(|e| {
        let message = format!("Failed to parse schema: {}", e);
        web_sys::console::error_1(&JsValue::from_str(&message));
        JsValue::from_str(&message)
    })
}

/// Validate a whole form
///
/// # Example (JavaScript)
/// ```javascript
/// const schema = JSON.parse(form.dataset.schema);
/// const result = validateForm(schema, { firstName: "", email: "john" });
/// if (!result.ok) document.getElementById(result.focus).focus();
/// ```
#[wasm_bindgen(js_name = validateForm)]
pub fn validate_form(schema: JsValue, values: JsValue) -> Result<JsValue, JsValue> {
    let schema = parse_schema(schema)?;
    let raw: RawSubmission = serde_wasm_bindgen::from_value(values)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse values: {}", e)))?;

    to_js(&client_validate(&schema, &raw))
}

/// Field templates (control kind, label, options, initial value)
#[wasm_bindgen(js_name = deriveFields)]
pub fn derive_fields_js(schema: JsValue) -> Result<JsValue, JsValue> {
    let schema = parse_schema(schema)?;
    to_js(&derive_fields(&schema, &Overrides::default()))
}

#[wasm_bindgen(js_name = isValidEmail)]
pub fn is_valid_email_js(email: &str) -> bool {
    core::is_valid_email(email)
}

#[wasm_bindgen(js_name = isValidUrl)]
pub fn is_valid_url_js(url: &str) -> bool {
    core::is_valid_url(url)
}
