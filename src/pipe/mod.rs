use async_trait::async_trait;
use std::collections::BTreeMap;

pub mod validation;

pub use validation::{Rule, Rules, ValidationPipe};

pub type PipeResult<T> = Result<T, PipeError>;

/// Field name -> messages for every rule that field failed
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, thiserror::Error)]
pub enum PipeError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Invalid validation rule `{rule}` for field `{field}`")]
    InvalidRule { field: String, rule: String },
}

/// Raised when request input fails validation
///
/// Carries its own status (422 unless overridden) and the complete
/// field-level error map.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationErrors {
    status: u16,
    message: String,
    errors: FieldErrors,
}

impl ValidationErrors {
    pub const DEFAULT_STATUS: u16 = 422;

    /// Build from a field error map; the message summarizes the first error
    pub fn new(errors: FieldErrors) -> Self {
        let message = summarize(&errors);
        Self {
            status: Self::DEFAULT_STATUS,
            message,
            errors,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }
}

fn summarize(errors: &FieldErrors) -> String {
    let mut all = errors.values().flatten();
    let Some(first) = all.next() else {
        return "The given data was invalid.".to_string();
    };
    match all.count() {
        0 => first.clone(),
        1 => format!("{first} (and 1 more error)"),
        n => format!("{first} (and {n} more errors)"),
    }
}

/// The Pipe trait for transformation and validation
#[async_trait]
pub trait Pipe: Send + Sync + 'static {
    type Input: Send + 'static;
    type Output: Send + 'static;

    async fn transform(&self, input: Self::Input) -> PipeResult<Self::Output>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn errors(entries: Vec<(&str, Vec<&str>)>) -> FieldErrors {
        entries
            .into_iter()
            .map(|(field, messages)| {
                (
                    field.to_string(),
                    messages.into_iter().map(String::from).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_single_error_message() {
        let err = ValidationErrors::new(errors(vec![("str", vec!["The str field is required."])]));
        assert_eq!(err.message(), "The str field is required.");
        assert_eq!(err.status(), 422);
    }

    #[test]
    fn test_message_counts_remaining_errors() {
        let err = ValidationErrors::new(errors(vec![
            (
                "age",
                vec!["The age field must be an integer.", "The age field must be at least 18."],
            ),
            ("name", vec!["The name field is required."]),
        ]));
        assert_eq!(
            err.message(),
            "The age field must be an integer. (and 2 more errors)"
        );

        let err = ValidationErrors::new(errors(vec![("a", vec!["first", "second"])]));
        assert_eq!(err.message(), "first (and 1 more error)");
    }

    #[test]
    fn test_status_override() {
        let err = ValidationErrors::new(FieldErrors::new()).with_status(400);
        assert_eq!(err.status(), 400);
        assert_eq!(err.message(), "The given data was invalid.");
    }
}
