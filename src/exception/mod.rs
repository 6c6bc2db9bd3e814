use axum::response::Response;
use std::error::Error;

pub mod classify;
pub mod http;
pub mod layer;
pub mod policy;

pub use classify::{ClassifiedError, ErrorKind, classify};
pub use http::{HttpException, HttpExceptionFilter};
pub use layer::{CaughtError, catch_exceptions};

/// The ExceptionFilter trait
///
/// Filters turn an error raised during request processing into the
/// response the client receives. They must always produce one.
pub trait ExceptionFilter: Send + Sync + 'static {
    /// Catch an exception and return a response
    fn catch(&self, error: &(dyn Error + Send + Sync + 'static)) -> Response;
}
