use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use crate::common::response::ApiResponse;
use crate::config::AppConfig;
use crate::exception::{ClassifiedError, policy};

/// Step-by-step construction of an [`ApiResponse`]
///
/// Every step consumes the builder and returns a new one, so a later step
/// always wins over an earlier one. [`ResponseBuilder::build`] only reads.
///
/// # Example
/// ```
/// use primeskills_web::common::ResponseBuilder;
/// use serde_json::json;
///
/// let response = ResponseBuilder::new()
///     .data(json!({"id": 1}))
///     .message("created")
///     .code(201)
///     .build();
///
/// assert!(response.is_success());
/// assert_eq!(response.message(), "created");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseBuilder {
    code: u16,
    message: String,
    data: Value,
    error_code: Option<String>,
    headers: HeaderMap,
}

impl Default for ResponseBuilder {
    fn default() -> Self {
        Self {
            code: 200,
            message: "success".to_string(),
            data: Value::Null,
            error_code: None,
            headers: HeaderMap::new(),
        }
    }
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code(self, code: u16) -> Self {
        Self { code, ..self }
    }

    pub fn message(self, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..self
        }
    }

    pub fn data(self, data: Value) -> Self {
        Self { data, ..self }
    }

    /// Label prefixed to the message as `Code [<label>]. ` at build time
    pub fn error_code(self, label: impl Into<String>) -> Self {
        Self {
            error_code: Some(label.into()),
            ..self
        }
    }

    pub fn headers(self, headers: HeaderMap) -> Self {
        Self { headers, ..self }
    }

    /// Service version banner
    pub fn version(self, config: &AppConfig) -> Self {
        self.data(json!({ "version": config.version }))
            .message(format!("Success get service {}", config.name))
    }

    /// Take code, message and data from a classified error
    ///
    /// With `debug` set, the error's trace and internal code are merged
    /// into `data` next to whatever the status policy put there.
    pub fn exception(self, error: &ClassifiedError, debug: bool) -> Self {
        let status = error.status();
        let message = policy::derive_message(status, error);

        let mut data = policy::derive_data(error);
        if debug {
            data = Some(policy::augment_with_debug(data, error));
        }

        let headers = error.headers().cloned().unwrap_or_default();

        Self {
            code: status,
            message,
            data: data.map(Value::Object).unwrap_or(Value::Null),
            headers,
            ..self
        }
    }

    pub fn build(&self) -> ApiResponse {
        let message = match &self.error_code {
            Some(label) => format!("Code [{label}]. {}", self.message),
            None => self.message.clone(),
        };
        let data = (!self.data.is_null()).then(|| self.data.clone());

        ApiResponse::new(self.code, message, data).with_headers(self.headers.clone())
    }

    /// [`build`](Self::build) as an HTTP response whose status is `code`
    pub fn build_json(&self) -> Response {
        self.build().into_response()
    }
}
