//! End-to-end submission scenarios
//!
//! Each test drives a schema through `FormAction::submit` and checks the
//! result, the focus target and, where relevant, the rendered markup.

use pretty_assertions::assert_eq;
use rusty_forms::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn signup_schema() -> SchemaDescriptor {
    SchemaDescriptor::builder()
        .field(FieldDescriptor::string("firstName"))
        .field(FieldDescriptor::string("email").email())
        .build()
        .unwrap()
}

fn echo() -> impl FnOnce(Values, Environment) -> std::future::Ready<MutationOutcome> {
    |values, _| std::future::ready(Ok(Some(values.to_json())))
}

#[tokio::test]
async fn test_empty_submit_fails_every_field() {
    let schema = signup_schema();
    let action = FormAction::new(schema.clone());

    let raw = RawSubmission::from_urlencoded("firstName=&email=");
    let result = action.submit(SubmissionRequest::new(raw), echo()).await;

    assert_eq!(
        result.errors(),
        &[
            FieldError::new("firstName", vec!["String must contain at least 1 character(s)".to_string()]),
            FieldError::new("email", vec!["String must contain at least 1 character(s)".to_string()]),
        ]
    );
    assert_eq!(focus_target(&schema, Some(&result)), Some("firstName"));

    let html = Form::new(&schema).result(Some(&result)).render().into_string();
    assert!(html.contains(r#"id="firstName" name="firstName" value="" aria-labelledby="label-for-firstName" aria-invalid="true" aria-required="true" aria-describedby="errors-for-firstName" autofocus"#));
}

#[tokio::test]
async fn test_invalid_email_only_fails_email() {
    let schema = signup_schema();
    let action = FormAction::new(schema.clone());

    let raw = RawSubmission::from_urlencoded("firstName=John&email=john");
    let result = action.submit(SubmissionRequest::new(raw), echo()).await;

    assert_eq!(
        result.errors(),
        &[FieldError::new("email", vec!["Invalid email".to_string()])]
    );
    assert_eq!(focus_target(&schema, Some(&result)), Some("email"));

    let fields = Form::new(&schema).result(Some(&result)).fields();
    assert_eq!(fields[0].value, "John");
    assert_eq!(fields[1].value, "john");
    assert!(fields[1].autofocus);
}

#[tokio::test]
async fn test_valid_submit_redirects() {
    let action = FormAction::new(signup_schema()).success_target("/success");

    let raw = RawSubmission::from_urlencoded("firstName=John&email=john%40doe.com");
    let result = action.submit(SubmissionRequest::new(raw), echo()).await;

    assert_eq!(
        result,
        SubmissionResult::Redirect {
            target: "/success".to_string()
        }
    );
}

#[tokio::test]
async fn test_valid_submit_without_target_returns_payload() {
    let action = FormAction::new(signup_schema());

    let raw = RawSubmission::from_urlencoded("firstName=John&email=john%40doe.com");
    let result = action.submit(SubmissionRequest::new(raw), echo()).await;

    assert_eq!(
        result,
        SubmissionResult::SuccessCustom {
            payload: serde_json::json!({"firstName": "John", "email": "john@doe.com"})
        }
    );
}

#[tokio::test]
async fn test_unchecked_mandatory_boolean_is_false() {
    let schema = SchemaDescriptor::builder()
        .field(FieldDescriptor::boolean("mandatory"))
        .build()
        .unwrap();
    let action = FormAction::new(schema);

    let result = action
        .submit(SubmissionRequest::new(RawSubmission::new()), |_, _| async { Ok(None) })
        .await;

    let mut data = Values::new();
    data.insert("mandatory", Value::Bool(false));
    assert_eq!(result, SubmissionResult::Success { data });
}

#[tokio::test]
async fn test_double_submit_invokes_mutation_once() {
    let action = Arc::new(FormAction::new(signup_schema()));
    let calls = Arc::new(AtomicUsize::new(0));
    let (release, released) = tokio::sync::oneshot::channel::<()>();

    let raw = RawSubmission::from_urlencoded("firstName=John&email=john%40doe.com&_formInstance=abc");

    let first = {
        let calls = calls.clone();
        action.submit(SubmissionRequest::new(raw.clone()), move |values, _| async move {
            calls.fetch_add(1, Ordering::SeqCst);
            let _ = released.await;
            Ok(Some(values.to_json()))
        })
    };
    let second = {
        let calls = calls.clone();
        action.submit(SubmissionRequest::new(raw.clone()), move |_, _| async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        })
    };
    let unblock = async move {
        let _ = release.send(());
    };

    let (first, second, ()) = tokio::join!(first, second, unblock);

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(matches!(first, SubmissionResult::SuccessCustom { .. }));
    assert_eq!(
        second.global_errors(),
        &["This form is already being submitted".to_string()]
    );

    // The token is released once the first attempt completes
    let third = action
        .submit(SubmissionRequest::new(raw), |_, _| async { Ok(None) })
        .await;
    assert!(!third.is_failure());
}

#[tokio::test]
async fn test_environment_errors_are_global() {
    let environment_schema = SchemaDescriptor::builder()
        .field(
            FieldDescriptor::string("origin")
                .pattern("^https://example\\.com$", "Submissions must come from example.com"),
        )
        .build()
        .unwrap();
    let action = FormAction::new(signup_schema()).environment_schema(environment_schema);

    let raw = RawSubmission::from_urlencoded("firstName=John&email=john%40doe.com");
    let request = SubmissionRequest::new(raw.clone())
        .with_environment(Environment::new().with("origin", "https://evil.test"));
    let result = action.submit(request, echo()).await;

    assert_eq!(
        result,
        SubmissionResult::Failure {
            errors: vec![],
            global_errors: vec!["Submissions must come from example.com".to_string()],
            values: raw.clone(),
        }
    );

    let request = SubmissionRequest::new(raw)
        .with_environment(Environment::new().with("origin", "https://example.com"));
    let result = action.submit(request, echo()).await;
    assert!(!result.is_failure());
}

#[tokio::test]
async fn test_field_and_global_errors_coexist() {
    let environment_schema = SchemaDescriptor::builder()
        .field(FieldDescriptor::string("origin"))
        .build()
        .unwrap();
    let schema = signup_schema();
    let action = FormAction::new(schema.clone()).environment_schema(environment_schema);

    let raw = RawSubmission::from_urlencoded("firstName=John&email=nope");
    let result = action.submit(SubmissionRequest::new(raw), echo()).await;

    assert_eq!(result.errors().len(), 1);
    assert_eq!(result.global_errors().len(), 1);

    let html = Form::new(&schema).result(Some(&result)).render().into_string();
    assert!(html.contains(r#"<div role="alert" data-global-errors><div>Missing origin in request environment</div></div>"#));
}
