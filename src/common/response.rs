use axum::{
    Json,
    http::{HeaderMap, StatusCode as HttpStatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;

use crate::common::status_code::{StatusCode, is_success};

/// Standard API response envelope
///
/// Every response leaves the service as
/// `{ "success": bool, "code": int, "message": string, "data": any|null }`
/// with the transport status equal to `code`. `success` is always derived
/// from `code` and cannot be set independently.
///
/// # Example
/// ```
/// use primeskills_web::common::{ApiResponse, StatusCode};
///
/// let ok = ApiResponse::success(vec![1, 2, 3]);
/// assert!(ok.is_success());
///
/// let missing: ApiResponse<()> = ApiResponse::error(StatusCode::NotFound, "User not found");
/// assert_eq!(missing.code(), 404);
/// assert!(!missing.is_success());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse<T: Serialize = Value> {
    success: bool,
    code: u16,
    message: String,
    data: Option<T>,

    #[serde(skip)]
    headers: HeaderMap,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create an envelope from its parts
    pub fn new(code: u16, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            success: is_success(code),
            code,
            message: message.into(),
            data,
            headers: HeaderMap::new(),
        }
    }

    /// A 200 envelope with message `"success"`
    pub fn success(data: T) -> Self {
        Self::new(StatusCode::Ok.as_u16(), "success", Some(data))
    }

    /// An error envelope without data
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status.as_u16(), message, None)
    }

    /// Attach transport headers (not part of the JSON body)
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(mut self) -> Response {
        let status =
            HttpStatusCode::from_u16(self.code).unwrap_or(HttpStatusCode::INTERNAL_SERVER_ERROR);
        let headers = std::mem::take(&mut self.headers);
        (status, headers, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde_json::json;

    #[test]
    fn test_serializes_envelope_shape() {
        let response = ApiResponse::new(201, "created", Some(json!({"id": 7})));
        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(
            body,
            json!({"success": true, "code": 201, "message": "created", "data": {"id": 7}})
        );
    }

    #[test]
    fn test_missing_data_serializes_as_null() {
        let response: ApiResponse = ApiResponse::error(StatusCode::Forbidden, "Forbidden");
        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["data"], Value::Null);
        assert_eq!(body["success"], json!(false));
    }

    #[test]
    fn test_into_response_uses_code_and_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("retry-after", HeaderValue::from_static("30"));
        let response = ApiResponse::<Value>::new(419, "CSRF token mismatch.", None)
            .with_headers(headers)
            .into_response();

        assert_eq!(response.status().as_u16(), 419);
        assert_eq!(response.headers()["retry-after"], "30");
    }
}
