// File: src/submit.rs
// Purpose: Submission coordinator - validate, gate and run a mutation once

use crate::error::MutationError;
use crate::messages;
use crate::raw::RawSubmission;
use crate::schema::SchemaDescriptor;
use crate::validate::{validate, FieldError};
use crate::value::Values;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, HashSet};
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, error, warn};

/// Hidden field carrying the per-render form instance token
pub const INSTANCE_FIELD: &str = "_formInstance";

/// What a mutation resolves to: an optional custom payload, or a domain error
pub type MutationOutcome = Result<Option<JsonValue>, MutationError>;

/// Outcome of one submission attempt
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SubmissionResult {
    Success {
        data: Values,
    },
    SuccessCustom {
        payload: JsonValue,
    },
    Redirect {
        target: String,
    },
    #[serde(rename_all = "camelCase")]
    Failure {
        errors: Vec<FieldError>,
        global_errors: Vec<String>,
        values: RawSubmission,
    },
}

impl SubmissionResult {
    /// A failure with a single form-level message
    pub fn global_failure(message: impl Into<String>, values: RawSubmission) -> Self {
        SubmissionResult::Failure {
            errors: Vec::new(),
            global_errors: vec![message.into()],
            values,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, SubmissionResult::Failure { .. })
    }

    pub fn errors(&self) -> &[FieldError] {
        match self {
            SubmissionResult::Failure { errors, .. } => errors,
            _ => &[],
        }
    }

    pub fn global_errors(&self) -> &[String] {
        match self {
            SubmissionResult::Failure { global_errors, .. } => global_errors,
            _ => &[],
        }
    }

    pub fn error_for(&self, field: &str) -> Option<&FieldError> {
        self.errors().iter().find(|e| e.field == field)
    }

    /// Raw values echoed back by a failure
    pub fn submitted_values(&self) -> Option<&RawSubmission> {
        match self {
            SubmissionResult::Failure { values, .. } => Some(values),
            _ => None,
        }
    }
}

/// Request context outside the field schema, e.g. the `Origin` header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment(BTreeMap<String, String>);

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn to_raw(&self) -> RawSubmission {
        self.iter().collect()
    }
}

/// One submission as received by the transport
#[derive(Debug, Clone, Default)]
pub struct SubmissionRequest {
    pub raw: RawSubmission,
    pub environment: Environment,
    pub instance: Option<String>,
}

impl SubmissionRequest {
    /// Request whose instance token comes from the hidden instance field
    pub fn new(raw: RawSubmission) -> Self {
        let instance = raw
            .get(INSTANCE_FIELD)
            .filter(|token| !token.is_empty())
            .map(str::to_string);
        Self {
            raw,
            environment: Environment::default(),
            instance,
        }
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }
}

/// Coordinates submissions for one form
///
/// Shared across requests; the only mutable state is the set of form
/// instances with a submission in flight.
#[derive(Debug)]
pub struct FormAction {
    schema: Arc<SchemaDescriptor>,
    environment_schema: Option<Arc<SchemaDescriptor>>,
    success_target: Option<String>,
    in_flight: Mutex<HashSet<String>>,
}

impl FormAction {
    pub fn new(schema: impl Into<Arc<SchemaDescriptor>>) -> Self {
        Self {
            schema: schema.into(),
            environment_schema: None,
            success_target: None,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Validate the request environment with this schema before mutating
    pub fn environment_schema(mut self, schema: impl Into<Arc<SchemaDescriptor>>) -> Self {
        self.environment_schema = Some(schema.into());
        self
    }

    /// Redirect here after a successful mutation
    pub fn success_target(mut self, target: impl Into<String>) -> Self {
        self.success_target = Some(target.into());
        self
    }

    pub fn schema(&self) -> &SchemaDescriptor {
        &self.schema
    }

    /// Run one submission attempt
    ///
    /// The mutation is invoked at most once, and only when both the fields
    /// and the environment are valid and no other submission of the same
    /// form instance is in flight.
    pub async fn submit<F, Fut>(&self, request: SubmissionRequest, mutation: F) -> SubmissionResult
    where
        F: FnOnce(Values, Environment) -> Fut,
        Fut: Future<Output = MutationOutcome>,
    {
        let SubmissionRequest {
            raw,
            environment,
            instance,
        } = request;

        let _ticket = match instance {
            Some(token) => match InFlight::acquire(&self.in_flight, token) {
                Some(ticket) => Some(ticket),
                None => {
                    warn!("refused duplicate submission of an in-flight form");
                    return SubmissionResult::global_failure(messages::ALREADY_SUBMITTING, raw);
                }
            },
            None => None,
        };

        let fields = validate(&self.schema, &raw);
        let global_errors = self.environment_errors(&environment);

        let values = match fields {
            Ok(values) if global_errors.is_empty() => values,
            outcome => {
                return SubmissionResult::Failure {
                    errors: outcome.err().unwrap_or_default(),
                    global_errors,
                    values: raw,
                };
            }
        };

        let outcome = AssertUnwindSafe(async { mutation(values.clone(), environment).await })
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(payload)) => {
                debug!("mutation succeeded");
                match (&self.success_target, payload) {
                    (Some(target), _) => SubmissionResult::Redirect {
                        target: target.clone(),
                    },
                    (None, Some(payload)) => SubmissionResult::SuccessCustom { payload },
                    (None, None) => SubmissionResult::Success { data: values },
                }
            }
            Ok(Err(e)) => {
                warn!(error = %e, "mutation failed");
                SubmissionResult::global_failure(e.to_string(), raw)
            }
            Err(_) => {
                error!("mutation panicked");
                SubmissionResult::global_failure(messages::UNEXPECTED_FAILURE, raw)
            }
        }
    }

    fn environment_errors(&self, environment: &Environment) -> Vec<String> {
        let Some(schema) = &self.environment_schema else {
            return Vec::new();
        };
        match validate(schema, &environment.to_raw()) {
            Ok(_) => Vec::new(),
            Err(errors) => errors
                .into_iter()
                .flat_map(|e| match environment.get(&e.field) {
                    Some(value) if !value.trim().is_empty() => e.messages,
                    _ => vec![messages::missing_environment(&e.field)],
                })
                .collect(),
        }
    }
}

/// Marks a form instance as in flight until dropped
struct InFlight<'a> {
    tokens: &'a Mutex<HashSet<String>>,
    token: String,
}

impl<'a> InFlight<'a> {
    fn acquire(tokens: &'a Mutex<HashSet<String>>, token: String) -> Option<Self> {
        let inserted = tokens
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token.clone());
        inserted.then_some(Self { tokens, token })
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.tokens
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDescriptor;
    use crate::value::Value;
    use pretty_assertions::assert_eq;

    fn action() -> FormAction {
        let schema = SchemaDescriptor::builder()
            .field(FieldDescriptor::string("name"))
            .build()
            .unwrap();
        FormAction::new(schema)
    }

    #[tokio::test]
    async fn test_success_returns_values() {
        let raw = RawSubmission::new().with("name", "Ada");
        let result = action()
            .submit(SubmissionRequest::new(raw), |_, _| async { Ok(None) })
            .await;

        let mut data = Values::new();
        data.insert("name", Value::from("Ada"));
        assert_eq!(result, SubmissionResult::Success { data });
    }

    #[tokio::test]
    async fn test_custom_payload() {
        let raw = RawSubmission::new().with("name", "Ada");
        let result = action()
            .submit(SubmissionRequest::new(raw), |values, _| async move {
                let name = values.get("name").and_then(Value::as_str).unwrap_or_default();
                Ok(Some(serde_json::json!({ "greeting": format!("Hi {}", name) })))
            })
            .await;

        assert_eq!(
            result,
            SubmissionResult::SuccessCustom {
                payload: serde_json::json!({ "greeting": "Hi Ada" })
            }
        );
    }

    #[tokio::test]
    async fn test_domain_error_is_global() {
        let raw = RawSubmission::new().with("name", "Ada");
        let result = action()
            .submit(SubmissionRequest::new(raw.clone()), |_, _| async {
                Err(MutationError::domain("Name already taken"))
            })
            .await;

        assert_eq!(result, SubmissionResult::global_failure("Name already taken", raw));
    }

    #[tokio::test]
    async fn test_missing_environment_value_names_its_key() {
        let environment_schema = SchemaDescriptor::builder()
            .field(FieldDescriptor::string("origin").pattern("example\\.com$", "Unauthorized origin"))
            .build()
            .unwrap();
        let action = action().environment_schema(environment_schema);
        let raw = RawSubmission::new().with("name", "Ada");

        let result = action
            .submit(SubmissionRequest::new(raw.clone()), |_, _| async { Ok(None) })
            .await;
        assert_eq!(result.global_errors(), &["Missing origin in request environment".to_string()]);

        let request = SubmissionRequest::new(raw)
            .with_environment(Environment::new().with("origin", "https://foo.bar"));
        let result = action.submit(request, |_, _| async { Ok(None) }).await;
        assert_eq!(result.global_errors(), &["Unauthorized origin".to_string()]);
    }

    #[tokio::test]
    async fn test_panic_is_caught() {
        let raw = RawSubmission::new().with("name", "Ada");
        let result = action()
            .submit(SubmissionRequest::new(raw), |_, _| async {
                if true {
                    panic!("boom");
                }
                Ok(None)
            })
            .await;

        assert_eq!(result.global_errors(), &[messages::UNEXPECTED_FAILURE.to_string()]);
    }

    #[tokio::test]
    async fn test_invalid_fields_skip_mutation() {
        let raw = RawSubmission::new().with("name", "");
        let result = action()
            .submit(SubmissionRequest::new(raw.clone()), |_, _| async {
                Err(MutationError::domain("mutation ran"))
            })
            .await;

        assert!(result.is_failure());
        assert!(result.global_errors().is_empty());
        assert_eq!(result.errors()[0].field, "name");
        assert_eq!(result.submitted_values(), Some(&raw));
    }

    #[test]
    fn test_failure_json_shape() {
        let result = SubmissionResult::Failure {
            errors: vec![FieldError::new("email", vec!["Invalid email".to_string()])],
            global_errors: vec![],
            values: RawSubmission::new().with("email", "john"),
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({
                "status": "failure",
                "errors": [{"field": "email", "messages": ["Invalid email"]}],
                "globalErrors": [],
                "values": {"email": "john"}
            })
        );
    }
}
