//! Error classification
//!
//! Turns any caught error into a [`ClassifiedError`]: one of a closed set of
//! categories, each with a fixed status and message rule.

use crate::error::AppError;
use crate::exception::HttpException;
use crate::pipe::{FieldErrors, ValidationErrors};
use axum::http::HeaderMap;
use serde_json::{Map, Value, json};
use std::error::Error;

/// Category an error was classified into
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    TokenMismatch,
    SuspiciousHost,
    Unauthenticated,
    ValidationFailed {
        status: u16,
        errors: FieldErrors,
    },
    BadRequest,
    /// Anything else; `status` is `None` when the error does not carry one
    Generic {
        status: Option<u16>,
        data: Option<Map<String, Value>>,
        code: i64,
        headers: HeaderMap,
    },
}

/// A caught error after classification
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedError {
    kind: ErrorKind,
    message: String,
    trace: Vec<String>,
}

impl ClassifiedError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            trace: Vec::new(),
        }
    }

    pub fn with_trace(mut self, trace: Vec<String>) -> Self {
        self.trace = trace;
        self
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Status sent to the client; anything outside `100..=999` becomes 500
    /// so the envelope `code` and the transport status always agree
    pub fn status(&self) -> u16 {
        let status = match &self.kind {
            ErrorKind::NotFound | ErrorKind::SuspiciousHost => 404,
            ErrorKind::Forbidden => 403,
            ErrorKind::TokenMismatch => 419,
            ErrorKind::Unauthenticated => 401,
            ErrorKind::ValidationFailed { status, .. } => *status,
            ErrorKind::BadRequest => 400,
            ErrorKind::Generic { status, .. } => status.unwrap_or(500),
        };
        if (100..=999).contains(&status) {
            status
        } else {
            500
        }
    }

    /// Message as set by classification, before any status policy applies
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Structured payload the error carries, if any
    pub fn data(&self) -> Option<Map<String, Value>> {
        match &self.kind {
            ErrorKind::ValidationFailed { errors, .. } => {
                let mut data = Map::new();
                data.insert("errors".to_string(), json!(errors));
                Some(data)
            }
            ErrorKind::Generic { data, .. } => data.clone(),
            _ => None,
        }
    }

    /// Internal error code, `0` unless the error set one
    pub fn code(&self) -> i64 {
        match &self.kind {
            ErrorKind::Generic { code, .. } => *code,
            _ => 0,
        }
    }

    pub fn headers(&self) -> Option<&HeaderMap> {
        match &self.kind {
            ErrorKind::Generic { headers, .. } => Some(headers),
            _ => None,
        }
    }

    /// Display of the error and each of its sources, outermost first
    pub fn trace(&self) -> &[String] {
        &self.trace
    }
}

/// Classify a caught error
///
/// Errors that are not one of this crate's types become
/// [`ErrorKind::Generic`] with no status of their own (500).
pub fn classify(error: &(dyn Error + 'static)) -> ClassifiedError {
    let classified = if let Some(err) = error.downcast_ref::<AppError>() {
        from_app_error(err)
    } else if let Some(err) = error.downcast_ref::<HttpException>() {
        from_http(err)
    } else if let Some(err) = error.downcast_ref::<ValidationErrors>() {
        from_validation(err)
    } else {
        generic(error.to_string())
    };

    classified.with_trace(causal_chain(error))
}

fn from_app_error(err: &AppError) -> ClassifiedError {
    match err {
        AppError::ModelNotFound(_) => ClassifiedError::new(ErrorKind::NotFound, "Not Found"),
        AppError::Authorization(_) => ClassifiedError::new(ErrorKind::Forbidden, "Forbidden"),
        AppError::TokenMismatch(msg) => ClassifiedError::new(ErrorKind::TokenMismatch, msg),
        AppError::SuspiciousOperation(_) => {
            ClassifiedError::new(ErrorKind::SuspiciousHost, "Bad hostname provided.")
        }
        AppError::Authentication(msg) => ClassifiedError::new(ErrorKind::Unauthenticated, msg),
        AppError::Validation(err) => from_validation(err),
        AppError::BadRequest(msg) => ClassifiedError::new(ErrorKind::BadRequest, msg),
        AppError::Http(err) => from_http(err),
        AppError::Other(err) => {
            if let Some(http) = err.downcast_ref::<HttpException>() {
                from_http(http)
            } else if let Some(validation) = err.downcast_ref::<ValidationErrors>() {
                from_validation(validation)
            } else {
                generic(err.to_string())
            }
        }
    }
}

fn from_http(err: &HttpException) -> ClassifiedError {
    ClassifiedError::new(
        ErrorKind::Generic {
            status: Some(err.status()),
            data: err.data().cloned(),
            code: err.code(),
            headers: err.headers().clone(),
        },
        err.message(),
    )
}

fn from_validation(err: &ValidationErrors) -> ClassifiedError {
    ClassifiedError::new(
        ErrorKind::ValidationFailed {
            status: err.status(),
            errors: err.errors().clone(),
        },
        err.message(),
    )
}

fn generic(message: String) -> ClassifiedError {
    ClassifiedError::new(
        ErrorKind::Generic {
            status: None,
            data: None,
            code: 0,
            headers: HeaderMap::new(),
        },
        message,
    )
}

fn causal_chain(error: &(dyn Error + 'static)) -> Vec<String> {
    std::iter::successors(Some(error), |&e| e.source())
        .map(|e| e.to_string())
        .collect()
}
