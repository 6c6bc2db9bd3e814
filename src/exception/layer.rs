//! Boundary middleware
//!
//! [`AppError`]'s `IntoResponse` renders a bare envelope (no logging, no
//! debug data) and tags the response with a [`CaughtError`]. This layer
//! picks the tag up and lets the configured [`ExceptionFilter`] produce the
//! final response, so every error is translated exactly once.

use crate::error::AppError;
use crate::exception::ExceptionFilter;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Response extension carrying the error a handler returned
#[derive(Debug, Clone)]
pub struct CaughtError(Arc<AppError>);

impl CaughtError {
    pub fn new(error: AppError) -> Self {
        Self(Arc::new(error))
    }

    pub fn error(&self) -> &AppError {
        &self.0
    }
}

/// Use with `axum::middleware::from_fn_with_state`
///
/// Required on every router whose handlers return [`AppError`]: this layer is
/// the only place the error is logged and debug data is attached.
pub async fn catch_exceptions(
    State(filter): State<Arc<dyn ExceptionFilter>>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    match response.extensions_mut().remove::<CaughtError>() {
        Some(caught) => filter.catch(caught.error()),
        None => response,
    }
}
