// File: src/request.rs
// Purpose: Request extraction - response mode, environment and form body

use axum::{
    async_trait,
    body::Bytes,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, StatusCode},
};
use rusty_forms::{Environment, RawSubmission};

/// Headers copied into the submission environment
const ENVIRONMENT_HEADERS: [&str; 3] = ["origin", "host", "referer"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    Html,
    Json,
}

/// What the handler needs to know about a request besides its body
#[derive(Debug, Clone)]
pub struct FormRequest {
    pub mode: ResponseMode,
    pub environment: Environment,
}

#[async_trait]
impl<S> FromRequestParts<S> for FormRequest
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(FormRequest {
            mode: response_mode(&parts.headers),
            environment: environment(&parts.headers),
        })
    }
}

/// JSON only when asked for and HTML isn't also acceptable
pub fn response_mode(headers: &HeaderMap) -> ResponseMode {
    let accept = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if accept.contains("application/json") && !accept.contains("text/html") {
        ResponseMode::Json
    } else {
        ResponseMode::Html
    }
}

pub fn environment(headers: &HeaderMap) -> Environment {
    let mut environment = Environment::new();
    for name in ENVIRONMENT_HEADERS {
        if let Some(value) = headers.get(name).and_then(|v| v.to_str().ok()) {
            environment.insert(name, value);
        }
    }
    environment
}

/// Decode an `application/x-www-form-urlencoded` body
pub fn raw_submission(body: &Bytes) -> RawSubmission {
    RawSubmission::from_urlencoded(&String::from_utf8_lossy(body))
}
