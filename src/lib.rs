//! # Primeskills Web
//!
//! Consistent JSON response envelopes and exception translation for axum
//! services.
//!
//! Every response, successful or not, leaves the service as
//! `{ "success", "code", "message", "data" }` with the HTTP status equal to
//! `code`. Errors returned from handlers are classified into a small, fixed
//! set of categories, logged, and rewritten into a client-safe message.
//! Internal details (causal trace, internal error code) are only attached
//! when `APP_DEBUG` is on.
//!
//! ## Features
//!
//! - **Envelope builder**: `ResponseBuilder` with last-write-wins steps and a read-only `build`
//! - **Error classification**: not found, forbidden, token mismatch, bad host, unauthenticated,
//!   validation, bad request, and anything carrying its own status
//! - **Status policy**: fixed messages for 403/404/405, SQL errors masked at 500
//! - **Validation pipe**: `required|integer|min:1` style rules raising 422 with field errors
//! - **Injectable log sink**: `tracing` in production, in-memory in tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use primeskills_web::prelude::*;
//! use primeskills_web::routes::{AppState, router};
//!
//! async fn find_user(Path(id): Path<u64>) -> Result<ApiResponse> {
//!     if id == 1 {
//!         Ok(ApiResponse::success(serde_json::json!({"id": 1})))
//!     } else {
//!         Err(AppError::model_not_found(format!("No user {id}")))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let state = AppState::new(AppConfig::default(), Arc::new(TracingSink));
//!     let filter = state.filter.clone();
//!
//!     let app = Router::new()
//!         .route("/users/{id}", axum::routing::get(find_user))
//!         .layer(axum::middleware::from_fn_with_state(filter, catch_exceptions))
//!         .merge(router(state));
//!
//!     primeskills_web::server::serve(app, "127.0.0.1:8000").await
//! }
//! ```

pub mod common;
pub mod config;
pub mod error;
pub mod exception;
pub mod log;
pub mod pipe;
pub mod routes;
pub mod server;

// Re-export core types
pub use common::{ApiResponse, ResponseBuilder, StatusCode};
pub use error::{AppError, Result};
pub use exception::{ExceptionFilter, HttpException, HttpExceptionFilter};

// Re-export commonly used types from dependencies
pub use axum;

/// Prelude module for convenient imports
///
/// ```
/// use primeskills_web::prelude::*;
/// ```
pub mod prelude {
    pub use crate::common::{ApiResponse, ResponseBuilder, StatusCode};
    pub use crate::config::{AppConfig, ConfigService};
    pub use crate::error::{AppError, Result};
    pub use crate::exception::{
        ClassifiedError, ErrorKind, ExceptionFilter, HttpException, HttpExceptionFilter,
        catch_exceptions, classify,
    };
    pub use crate::log::{LogSink, MemorySink, TracingSink};
    pub use crate::pipe::{Pipe, PipeError, Rules, ValidationErrors, ValidationPipe};
    pub use axum::{
        Json, Router,
        extract::{Path, Query, State},
        response::{IntoResponse, Response},
    };
    pub use std::sync::Arc;
}
