// File: src/pages/mod.rs
// Purpose: Example catalogue and the handlers shared by every example page

pub mod actions;
pub mod forms;
pub mod home;
pub mod schemas;

use crate::layout::{self, ExampleCopy};
use crate::request::{raw_submission, FormRequest};
use crate::response::{action_data, submission_response};
use crate::AppState;
use axum::body::Bytes;
use axum::extract::{MatchedPath, State};
use axum::response::{Html, IntoResponse, Response};
use futures::future::BoxFuture;
use maud::Markup;
use rusty_forms::{
    Environment, Form, FormAction, FormSchema, MutationOutcome, SchemaDescriptor,
    SubmissionRequest, SubmissionResult, Values,
};
use tracing::info;
use uuid::Uuid;

/// Renders the form for a schema, an optional result and an instance token
pub type RenderFn = fn(&SchemaDescriptor, Option<&SubmissionResult>, &str) -> Markup;

/// Runs after successful validation
pub type MutateFn = fn(Values, Environment) -> BoxFuture<'static, MutationOutcome>;

/// Wraps the rendered form in a page
pub type LayoutFn = fn(&ExampleCopy, Markup, Option<&str>) -> Markup;

/// The signup form used by several examples
#[allow(dead_code)]
#[derive(FormSchema)]
#[rename_all("camelCase")]
pub struct Signup {
    first_name: String,

    #[email]
    email: String,

    #[enum_values("fromAFriend", "google")]
    how_you_found_out_about_us: String,
}

/// One live example: its route, copy, coordinator and behavior
pub struct Example {
    pub path: &'static str,
    pub copy: ExampleCopy,
    pub action: FormAction,
    render: RenderFn,
    mutate: MutateFn,
    layout: LayoutFn,
}

impl Example {
    pub fn new(path: &'static str, copy: ExampleCopy, action: FormAction) -> Self {
        Self {
            path,
            copy,
            action,
            render: default_form,
            mutate: echo,
            layout: layout::example,
        }
    }

    pub fn render(mut self, render: RenderFn) -> Self {
        self.render = render;
        self
    }

    pub fn mutate(mut self, mutate: MutateFn) -> Self {
        self.mutate = mutate;
        self
    }

    pub fn layout(mut self, layout: LayoutFn) -> Self {
        self.layout = layout;
        self
    }

    /// Section of the examples list, e.g. `actions`
    pub fn section(&self) -> Option<&'static str> {
        self.path.strip_prefix("/examples/")?.split('/').next()
    }

    /// Full page; every render gets a fresh form instance token
    pub fn page(&self, result: Option<&SubmissionResult>) -> Markup {
        let token = Uuid::new_v4().to_string();
        let form = (self.render)(self.action.schema(), result, &token);
        let data = result.map(action_data);
        (self.layout)(&self.copy, form, data.as_deref())
    }

    pub async fn submit(&self, request: SubmissionRequest) -> SubmissionResult {
        self.action.submit(request, self.mutate).await
    }
}

/// Every page with a live form
pub fn catalogue() -> anyhow::Result<Vec<Example>> {
    Ok(vec![
        home::index()?,
        actions::redirect()?,
        actions::custom_response()?,
        actions::environment()?,
        forms::labels_and_options()?,
        forms::form_with_children()?,
        schemas::strings()?,
        schemas::numbers()?,
        schemas::booleans()?,
        schemas::dates()?,
    ])
}

/// Standard layout with the default slots
pub fn default_form(
    schema: &SchemaDescriptor,
    result: Option<&SubmissionResult>,
    token: &str,
) -> Markup {
    Form::new(schema).result(result).instance(token).render()
}

/// Mutation that accepts the validated values unchanged
pub fn echo(_values: Values, _environment: Environment) -> BoxFuture<'static, MutationOutcome> {
    Box::pin(async { Ok(None) })
}

/// GET handler for every example route
pub async fn show_example(State(state): State<AppState>, path: MatchedPath) -> Response {
    match state.example(path.as_str()) {
        Some(example) => Html(example.page(None).into_string()).into_response(),
        None => home::not_found().await.into_response(),
    }
}

/// POST handler for every example route
pub async fn submit_example(
    State(state): State<AppState>,
    path: MatchedPath,
    request: FormRequest,
    body: Bytes,
) -> Response {
    let Some(example) = state.example(path.as_str()) else {
        return home::not_found().await.into_response();
    };

    let submission =
        SubmissionRequest::new(raw_submission(&body)).with_environment(request.environment);
    let result = example.submit(submission).await;
    info!(
        path = example.path,
        failed = result.is_failure(),
        "form submitted"
    );

    submission_response(request.mode, result, |result| example.page(Some(result)))
}
