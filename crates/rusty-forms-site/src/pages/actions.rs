// File: src/pages/actions.rs
// Purpose: Examples for what an action does with a valid submission

use super::{Example, Signup};
use crate::layout::ExampleCopy;
use futures::future::BoxFuture;
use rusty_forms::{
    Environment, FieldDescriptor, FormAction, FormSchema, MutationOutcome, SchemaDescriptor,
    Values,
};
use serde_json::json;

pub fn redirect() -> anyhow::Result<Example> {
    let copy = ExampleCopy {
        title: "Redirect",
        description: "In this example, a successful submission will redirect to the success page.",
        code: r#"let action = FormAction::new(Signup::schema()).success_target("/success");

let result = action
    .submit(SubmissionRequest::new(raw), |_values, _env| async { Ok(None) })
    .await;

// SubmissionResult::Redirect { target: "/success" } becomes a 303
"#,
    };
    let action = FormAction::new(Signup::schema()).success_target("/success");
    Ok(Example::new("/examples/actions/redirect", copy, action))
}

fn contact_schema() -> anyhow::Result<SchemaDescriptor> {
    Ok(SchemaDescriptor::builder()
        .field(FieldDescriptor::string("firstName"))
        .field(FieldDescriptor::string("email").email())
        .build()?)
}

fn custom_name(values: Values, _environment: Environment) -> BoxFuture<'static, MutationOutcome> {
    let first_name = values
        .get("firstName")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    Box::pin(async move { Ok(Some(json!({ "customName": first_name }))) })
}

pub fn custom_response() -> anyhow::Result<Example> {
    let copy = ExampleCopy {
        title: "Custom response",
        description: "In this example, a successful submission will render a custom JSON.",
        code: r#"let schema = SchemaDescriptor::builder()
    .field(FieldDescriptor::string("firstName"))
    .field(FieldDescriptor::string("email").email())
    .build()?;

let result = FormAction::new(schema)
    .submit(SubmissionRequest::new(raw), |values, _env| async move {
        let first_name = values.get("firstName").and_then(|v| v.as_str()).unwrap_or_default();
        Ok(Some(json!({ "customName": first_name })))
    })
    .await;

// SubmissionResult::SuccessCustom { payload: {"customName": "..."} }
"#,
    };
    let action = FormAction::new(contact_schema()?);
    Ok(Example::new("/examples/actions/custom-response", copy, action).mutate(custom_name))
}

pub fn environment() -> anyhow::Result<Example> {
    let copy = ExampleCopy {
        title: "Environment",
        description: "In this example, we use the submission environment to authorize a specific origin.",
        code: r#"let schema = SchemaDescriptor::builder()
    .field(FieldDescriptor::string("email").email())
    .build()?;

let environment_schema = SchemaDescriptor::builder()
    .field(FieldDescriptor::string("origin").pattern("foo\\.bar", "Unauthorized origin"))
    .build()?;

let action = FormAction::new(schema).environment_schema(environment_schema);

let request = SubmissionRequest::new(raw)
    .with_environment(Environment::new().with("origin", origin_header));
"#,
    };
    let schema = SchemaDescriptor::builder()
        .field(FieldDescriptor::string("email").email())
        .build()?;
    let environment_schema = SchemaDescriptor::builder()
        .field(FieldDescriptor::string("origin").pattern("foo\\.bar", "Unauthorized origin"))
        .build()?;
    let action = FormAction::new(schema).environment_schema(environment_schema);
    Ok(Example::new("/examples/actions/environment", copy, action))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rusty_forms::{RawSubmission, SubmissionRequest, SubmissionResult};

    #[tokio::test]
    async fn test_custom_response_payload() {
        let example = custom_response().unwrap();
        let raw = RawSubmission::from_urlencoded("firstName=John&email=john%40doe.com");

        let result = example.submit(SubmissionRequest::new(raw)).await;
        assert_eq!(
            result,
            SubmissionResult::SuccessCustom {
                payload: json!({"customName": "John"})
            }
        );
    }

    #[tokio::test]
    async fn test_environment_rejects_other_origins() {
        let example = environment().unwrap();
        let raw = RawSubmission::from_urlencoded("email=john%40doe.com");

        let request = SubmissionRequest::new(raw.clone())
            .with_environment(Environment::new().with("origin", "http://localhost:3000"));
        let result = example.submit(request).await;
        assert_eq!(result.global_errors(), &["Unauthorized origin".to_string()]);

        let request = SubmissionRequest::new(raw)
            .with_environment(Environment::new().with("origin", "https://foo.bar"));
        let result = example.submit(request).await;
        assert!(!result.is_failure());
    }
}
