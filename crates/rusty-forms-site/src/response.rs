// File: src/response.rs
// Purpose: Turn a submission result into an HTTP response

use crate::request::ResponseMode;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Redirect, Response};
use maud::Markup;
use rusty_forms::SubmissionResult;

/// Pretty JSON shown under `#action-data`
///
/// Custom payloads are shown as-is; everything else as the tagged result.
pub fn action_data(result: &SubmissionResult) -> String {
    let json = match result {
        SubmissionResult::SuccessCustom { payload } => payload.clone(),
        other => serde_json::to_value(other).unwrap_or_default(),
    };
    serde_json::to_string_pretty(&json).unwrap_or_default()
}

/// Render the outcome of a POST
///
/// `Redirect` is always a `303 See Other`. Other results are either the
/// serialized result (JSON mode) or the page re-rendered with the result.
pub fn submission_response<F>(mode: ResponseMode, result: SubmissionResult, render: F) -> Response
where
    F: FnOnce(&SubmissionResult) -> Markup,
{
    if let SubmissionResult::Redirect { target } = &result {
        return Redirect::to(target).into_response();
    }

    match mode {
        ResponseMode::Json => {
            let status = if result.is_failure() {
                StatusCode::UNPROCESSABLE_ENTITY
            } else {
                StatusCode::OK
            };
            (status, Json(result)).into_response()
        }
        ResponseMode::Html => Html(render(&result).into_string()).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;
    use maud::html;
    use pretty_assertions::assert_eq;
    use rusty_forms::{FieldError, RawSubmission};

    fn failure() -> SubmissionResult {
        SubmissionResult::Failure {
            errors: vec![FieldError::new("email", vec!["Invalid email".to_string()])],
            global_errors: vec![],
            values: RawSubmission::new().with("email", "john"),
        }
    }

    #[test]
    fn test_redirect_is_see_other() {
        let result = SubmissionResult::Redirect {
            target: "/success".to_string(),
        };
        let response = submission_response(ResponseMode::Html, result, |_| html! {});

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/success");
    }

    #[test]
    fn test_json_failure_is_unprocessable() {
        let response = submission_response(ResponseMode::Json, failure(), |_| html! {});
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_html_failure_rerenders() {
        let response = submission_response(ResponseMode::Html, failure(), |_| html! { p { "again" } });
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_action_data_shows_custom_payload() {
        let result = SubmissionResult::SuccessCustom {
            payload: serde_json::json!({"customName": "John"}),
        };
        assert_eq!(action_data(&result), "{\n  \"customName\": \"John\"\n}");
    }

    #[test]
    fn test_action_data_shows_failure() {
        let json: serde_json::Value = serde_json::from_str(&action_data(&failure())).unwrap();
        assert_eq!(json["status"], "failure");
        assert_eq!(json["errors"][0]["field"], "email");
        assert_eq!(json["values"]["email"], "john");
    }
}
