//! Reference endpoints
//!
//! `GET /` reports the service version and `GET /exception` exercises the
//! validation and error paths end to end.

use crate::common::{ApiResponse, ResponseBuilder};
use crate::config::AppConfig;
use crate::error::{AppError, Result};
use crate::exception::{ExceptionFilter, HttpException, HttpExceptionFilter, catch_exceptions};
use crate::log::LogSink;
use crate::pipe::{Pipe, Rules, ValidationPipe};
use axum::{
    Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{Method, Uri},
    middleware,
    routing::get,
};
use serde_json::{Map, json};
use std::collections::HashMap;
use std::sync::Arc;

/// Shared per-application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub filter: Arc<dyn ExceptionFilter>,
}

impl AppState {
    pub fn new(config: AppConfig, sink: Arc<dyn LogSink>) -> Self {
        let filter = HttpExceptionFilter::from_config(&config, sink);
        Self {
            config: Arc::new(config),
            filter: Arc::new(filter),
        }
    }
}

/// Reference routes with [`catch_exceptions`] installed, so every error
/// (fallbacks included) is logged through the state's filter
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/exception", get(exception))
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(middleware::from_fn_with_state(
            state.filter.clone(),
            catch_exceptions,
        ))
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> ApiResponse {
    ResponseBuilder::new().version(&state.config).build()
}

async fn exception(
    query: std::result::Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<ApiResponse> {
    let Query(params) = query?;
    let rules = Rules::parse([("str", "required")])?;
    ValidationPipe::new(rules).transform(params).await?;

    let mut data = Map::new();
    data.insert("ERRR".to_string(), json!("E"));
    Err(HttpException::new(500, "Error").with_data(data).into())
}

async fn not_found(uri: Uri) -> AppError {
    AppError::http(404, format!("No route matches {}", uri.path()))
}

async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::http(405, format!("{method} is not supported for {}", uri.path()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::MemorySink;
    use axum::body::{Body, to_bytes};
    use serde_json::Value;
    use tower::ServiceExt;

    fn config(debug: bool) -> AppConfig {
        AppConfig {
            name: "svc".to_string(),
            version: "2.3".to_string(),
            debug,
        }
    }

    async fn send(app: Router, method: &str, uri: &str) -> (u16, Value) {
        let request = axum::http::Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status().as_u16();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn test_app(debug: bool) -> (Router, MemorySink) {
        let sink = MemorySink::new();
        let state = AppState::new(config(debug), Arc::new(sink.clone()));
        (router(state), sink)
    }

    #[tokio::test]
    async fn test_index_reports_version() {
        let (app, sink) = test_app(false);
        let (status, body) = send(app, "GET", "/").await;

        assert_eq!(status, 200);
        assert_eq!(
            body,
            json!({
                "success": true,
                "code": 200,
                "message": "Success get service svc",
                "data": {"version": "2.3"}
            })
        );
        assert!(sink.lines().is_empty());
    }

    #[tokio::test]
    async fn test_exception_without_str_is_validation_error() {
        let (app, sink) = test_app(false);
        let (status, body) = send(app, "GET", "/exception").await;

        assert_eq!(status, 422);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["code"], 422);
        assert_eq!(body["message"], "The str field is required.");
        assert_eq!(
            body["data"],
            json!({"errors": {"str": ["The str field is required."]}})
        );
        assert_eq!(
            sink.messages(),
            vec!["Error Code [422] The str field is required."]
        );
    }

    #[tokio::test]
    async fn test_exception_with_str_raises_custom_error() {
        let (app, _) = test_app(false);
        let (status, body) = send(app, "GET", "/exception?str=hello").await;

        assert_eq!(status, 500);
        assert_eq!(
            body,
            json!({"success": false, "code": 500, "message": "Error", "data": {"ERRR": "E"}})
        );
    }

    #[tokio::test]
    async fn test_exception_in_debug_mode_merges_trace() {
        let (app, _) = test_app(true);
        let (_, body) = send(app, "GET", "/exception?str=hello").await;

        assert_eq!(body["data"]["ERRR"], "E");
        assert_eq!(body["data"]["code"], 0);
        assert_eq!(body["data"]["trace"], json!(["Error"]));

        let (app, _) = test_app(true);
        let (_, body) = send(app, "GET", "/exception").await;
        assert!(body["data"]["errors"]["str"].is_array());
        assert!(body["data"]["trace"].is_array());
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (app, sink) = test_app(false);
        let (status, body) = send(app, "GET", "/missing").await;

        assert_eq!(status, 404);
        assert_eq!(body["message"], "Not Found");
        assert_eq!(body["data"], Value::Null);
        assert_eq!(sink.messages(), vec!["Error Code [404] No route matches /missing"]);
    }

    #[tokio::test]
    async fn test_wrong_method_is_not_allowed() {
        let (app, _) = test_app(false);
        let (status, body) = send(app, "POST", "/").await;

        assert_eq!(status, 405);
        assert_eq!(body["message"], "Method Not Allowed");
        assert_eq!(body["success"], json!(false));
    }
}
