use crate::common::ResponseBuilder;
use crate::config::AppConfig;
use crate::exception::{ExceptionFilter, classify};
use crate::log::{LogSink, TracingSink};
use axum::http::HeaderMap;
use axum::response::Response;
use serde_json::{Map, Value};
use std::error::Error;
use std::sync::Arc;

type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// An error that carries its own HTTP status
///
/// Raise this from a handler when the status, client message and payload
/// are already known. `code` is an internal numeric error code that is only
/// exposed to clients in debug mode.
///
/// # Example
/// ```
/// use primeskills_web::exception::HttpException;
/// use serde_json::json;
///
/// let err = HttpException::new(409, "Email already registered")
///     .with_data(json!({"field": "email"}).as_object().cloned().unwrap_or_default())
///     .with_code(1001);
/// assert_eq!(err.status(), 409);
/// ```
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct HttpException {
    status: u16,
    message: String,
    data: Option<Map<String, Value>>,
    headers: HeaderMap,
    code: i64,
    #[source]
    source: Option<BoxError>,
}

impl HttpException {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            data: None,
            headers: HeaderMap::new(),
            code: 0,
            source: None,
        }
    }

    pub fn with_data(mut self, data: Map<String, Value>) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_code(mut self, code: i64) -> Self {
        self.code = code;
        self
    }

    /// Chain the error that caused this one
    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> Option<&Map<String, Value>> {
        self.data.as_ref()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn code(&self) -> i64 {
        self.code
    }
}

/// The default exception filter
///
/// Classifies the error, writes `Error Code [<status>] <message>` to the log
/// sink using the message as classified, then lets the status policy decide
/// what the client sees.
#[derive(Clone)]
pub struct HttpExceptionFilter {
    debug: bool,
    sink: Arc<dyn LogSink>,
}

impl Default for HttpExceptionFilter {
    fn default() -> Self {
        Self::new(false, Arc::new(TracingSink))
    }
}

impl HttpExceptionFilter {
    pub fn new(debug: bool, sink: Arc<dyn LogSink>) -> Self {
        Self { debug, sink }
    }

    pub fn from_config(config: &AppConfig, sink: Arc<dyn LogSink>) -> Self {
        Self::new(config.debug, sink)
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    /// Builder holding the translated error, for callers that want to
    /// adjust the envelope before sending it
    pub fn render(&self, error: &(dyn Error + 'static)) -> ResponseBuilder {
        let classified = classify(error);
        self.sink.error(&format!(
            "Error Code [{}] {}",
            classified.status(),
            classified.message()
        ));
        ResponseBuilder::new().exception(&classified, self.debug)
    }
}

impl ExceptionFilter for HttpExceptionFilter {
    fn catch(&self, error: &(dyn Error + Send + Sync + 'static)) -> Response {
        self.render(error).build_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::log::MemorySink;
    use axum::body::to_bytes;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let err = HttpException::new(500, "Error");
        assert_eq!(err.to_string(), "Error");
        assert_eq!(err.code(), 0);
        assert!(err.data().is_none());
        assert!(err.headers().is_empty());
        assert!(err.source().is_none());
    }

    #[test]
    fn test_source_chain() {
        let io = std::io::Error::other("disk on fire");
        let err = HttpException::new(503, "Storage unavailable").with_source(io);
        assert_eq!(err.source().map(|e| e.to_string()).as_deref(), Some("disk on fire"));
    }

    #[test]
    fn test_data_kept_verbatim() {
        let mut data = Map::new();
        data.insert("ERRR".into(), json!("E"));
        let err = HttpException::new(500, "Error").with_data(data.clone());
        assert_eq!(err.data(), Some(&data));
    }

    #[test]
    fn test_filter_logs_classified_message_before_override() {
        let sink = MemorySink::new();
        let filter = HttpExceptionFilter::new(false, Arc::new(sink.clone()));

        let response = filter
            .render(&AppError::suspicious_host("evil.example"))
            .build();

        assert_eq!(response.message(), "Not Found");
        assert_eq!(sink.messages(), vec!["Error Code [404] Bad hostname provided."]);
    }

    #[test]
    fn test_filter_logs_unmasked_sql_message() {
        let sink = MemorySink::new();
        let filter = HttpExceptionFilter::new(false, Arc::new(sink.clone()));

        let response = filter.render(&AppError::http(500, "SQL syntax error")).build();

        assert_eq!(response.message(), "Whoops, looks like something went wrong");
        assert_eq!(sink.messages(), vec!["Error Code [500] SQL syntax error"]);
        assert_eq!(sink.lines()[0].0, tracing::Level::ERROR);
    }

    #[tokio::test]
    async fn test_catch_renders_json() {
        let filter = HttpExceptionFilter::new(true, Arc::new(MemorySink::new()));
        let mut data = Map::new();
        data.insert("ERRR".into(), json!("E"));
        let err = AppError::from(HttpException::new(500, "Error").with_data(data));

        let response = filter.catch(&err);
        assert_eq!(response.status().as_u16(), 500);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["message"], "Error");
        assert_eq!(body["data"]["ERRR"], "E");
        assert_eq!(body["data"]["code"], 0);
        assert_eq!(body["data"]["trace"], json!(["Error"]));
    }
}
