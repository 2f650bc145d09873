// File: src/focus.rs
// Purpose: Focus reconciler - the first invalid field in schema order gets focus

use crate::schema::SchemaDescriptor;
use crate::submit::SubmissionResult;
use crate::validate::FieldError;
use serde::Serialize;

/// First field, in schema order, that has an error
pub fn first_invalid<'a>(schema: &'a SchemaDescriptor, errors: &[FieldError]) -> Option<&'a str> {
    schema
        .names()
        .find(|name| errors.iter().any(|e| e.field == *name))
}

/// Field a render of this result should focus, if any
pub fn focus_target<'a>(
    schema: &'a SchemaDescriptor,
    result: Option<&SubmissionResult>,
) -> Option<&'a str> {
    result.and_then(|r| first_invalid(schema, r.errors()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FocusState {
    #[default]
    NoResult,
    Focused(String),
    Settled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum FocusAction {
    None,
    Focus { field: String, changed: bool },
}

/// Tracks focus across successive results for one form
#[derive(Debug, Default)]
pub struct FocusReconciler {
    state: FocusState,
}

impl FocusReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FocusState {
        &self.state
    }

    /// Feed the latest result and get the focus action for it
    pub fn observe(
        &mut self,
        schema: &SchemaDescriptor,
        result: Option<&SubmissionResult>,
    ) -> FocusAction {
        match result {
            None => {
                self.state = FocusState::NoResult;
                FocusAction::None
            }
            Some(SubmissionResult::Failure { errors, .. }) => match first_invalid(schema, errors) {
                Some(field) => {
                    let changed = self.state != FocusState::Focused(field.to_string());
                    self.state = FocusState::Focused(field.to_string());
                    FocusAction::Focus {
                        field: field.to_string(),
                        changed,
                    }
                }
                None => {
                    self.state = FocusState::NoResult;
                    FocusAction::None
                }
            },
            Some(_) => {
                self.state = FocusState::Settled;
                FocusAction::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::RawSubmission;
    use crate::schema::FieldDescriptor;
    use pretty_assertions::assert_eq;

    fn schema() -> SchemaDescriptor {
        SchemaDescriptor::builder()
            .field(FieldDescriptor::string("a"))
            .field(FieldDescriptor::string("b"))
            .field(FieldDescriptor::string("c"))
            .field(FieldDescriptor::string("d"))
            .build()
            .unwrap()
    }

    fn failure(fields: &[&str]) -> SubmissionResult {
        SubmissionResult::Failure {
            errors: fields
                .iter()
                .map(|f| FieldError::new(*f, vec!["bad".to_string()]))
                .collect(),
            global_errors: vec![],
            values: RawSubmission::new(),
        }
    }

    #[test]
    fn test_first_invalid_uses_schema_order() {
        let errors = vec![
            FieldError::new("d", vec![]),
            FieldError::new("b", vec![]),
        ];
        assert_eq!(first_invalid(&schema(), &errors), Some("b"));
    }

    #[test]
    fn test_focus_moves_as_errors_are_fixed() {
        let schema = schema();
        let mut focus = FocusReconciler::new();

        assert_eq!(focus.observe(&schema, None), FocusAction::None);

        assert_eq!(
            focus.observe(&schema, Some(&failure(&["b", "d"]))),
            FocusAction::Focus {
                field: "b".to_string(),
                changed: true
            }
        );
        assert_eq!(
            focus.observe(&schema, Some(&failure(&["b", "d"]))),
            FocusAction::Focus {
                field: "b".to_string(),
                changed: false
            }
        );
        assert_eq!(
            focus.observe(&schema, Some(&failure(&["d"]))),
            FocusAction::Focus {
                field: "d".to_string(),
                changed: true
            }
        );
        assert_eq!(focus.state(), &FocusState::Focused("d".to_string()));
    }

    #[test]
    fn test_success_settles() {
        let schema = schema();
        let mut focus = FocusReconciler::new();
        focus.observe(&schema, Some(&failure(&["a"])));

        let result = SubmissionResult::Redirect {
            target: "/success".to_string(),
        };
        assert_eq!(focus.observe(&schema, Some(&result)), FocusAction::None);
        assert_eq!(focus.state(), &FocusState::Settled);
    }

    #[test]
    fn test_global_only_failure_has_no_target() {
        let result = SubmissionResult::global_failure("nope", RawSubmission::new());
        assert_eq!(focus_target(&schema(), Some(&result)), None);
    }
}
