use crate::common::ResponseBuilder;
use crate::exception::{CaughtError, HttpException, classify};
use crate::pipe::{PipeError, ValidationErrors};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Every error a handler may raise
///
/// Each variant maps to exactly one classification category; see
/// [`crate::exception::classify`].
#[derive(Debug, Error)]
pub enum AppError {
    /// A requested record does not exist
    #[error("{0}")]
    ModelNotFound(String),

    /// The caller is authenticated but not allowed to do this
    #[error("{0}")]
    Authorization(String),

    /// The anti-forgery token did not match the session
    #[error("{0}")]
    TokenMismatch(String),

    /// The request carried a malformed or untrusted host
    #[error("{0}")]
    SuspiciousOperation(String),

    /// The caller is not authenticated
    #[error("{0}")]
    Authentication(String),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// The request could not be understood
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Http(#[from] HttpException),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub fn model_not_found(msg: impl Into<String>) -> Self {
        Self::ModelNotFound(msg.into())
    }

    pub fn unauthorized_action() -> Self {
        Self::Authorization("This action is unauthorized.".to_string())
    }

    pub fn token_mismatch() -> Self {
        Self::TokenMismatch("CSRF token mismatch.".to_string())
    }

    pub fn suspicious_host(host: impl AsRef<str>) -> Self {
        Self::SuspiciousOperation(format!("Invalid Host \"{}\".", host.as_ref()))
    }

    pub fn unauthenticated() -> Self {
        Self::Authentication("Unauthenticated.".to_string())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// An [`HttpException`] with the given status and message
    pub fn http(status: u16, msg: impl Into<String>) -> Self {
        Self::Http(HttpException::new(status, msg))
    }
}

impl From<PipeError> for AppError {
    fn from(err: PipeError) -> Self {
        match err {
            PipeError::Validation(errors) => AppError::Validation(errors),
            other => AppError::Other(other.into()),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

#[cfg(feature = "sea-orm-db")]
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err {
            sea_orm::DbErr::RecordNotFound(msg) => AppError::ModelNotFound(msg),
            other => AppError::Other(anyhow::Error::new(other)),
        }
    }
}

/// Renders a plain envelope and tags it for [`crate::exception::catch_exceptions`],
/// which replaces it with the configured filter's output.
///
/// This envelope is never logged. Routers returning `AppError` must install
/// `catch_exceptions`, which is what writes the `Error Code [..]` line;
/// [`crate::routes::router`] always does.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut response = ResponseBuilder::new()
            .exception(&classify(&self), false)
            .build_json();
        response.extensions_mut().insert(CaughtError::new(self));
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipe::Rules;
    use std::collections::HashMap;

    #[test]
    fn test_pipe_validation_error_keeps_category() {
        let rules = Rules::parse([("str", "required")]).unwrap();
        let pipe_err = PipeError::from(rules.validate(&HashMap::new()).unwrap_err());
        assert!(matches!(AppError::from(pipe_err), AppError::Validation(_)));
    }

    #[test]
    fn test_invalid_rule_becomes_generic() {
        let pipe_err = Rules::parse([("str", "bogus")]).unwrap_err();
        let err = AppError::from(pipe_err);
        assert!(matches!(err, AppError::Other(_)));
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_display_is_original_message() {
        assert_eq!(AppError::token_mismatch().to_string(), "CSRF token mismatch.");
        assert_eq!(AppError::http(418, "teapot").to_string(), "teapot");
    }
}
