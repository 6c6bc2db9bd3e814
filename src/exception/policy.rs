//! What the client is told about a classified error
//!
//! Applied after classification. For the statuses listed in
//! [`derive_message`] the message is replaced outright, even when
//! classification already produced one.

use crate::common::StatusCode;
use crate::exception::ClassifiedError;
use serde_json::{Map, Value, json};

/// Sent instead of storage-layer error text at status 500
pub const GENERIC_FAILURE_MESSAGE: &str = "Whoops, looks like something went wrong";

pub fn derive_message(status: u16, error: &ClassifiedError) -> String {
    let original = error.message();
    match StatusCode::from_repr(status) {
        Some(StatusCode::BadRequest) | Some(StatusCode::UnprocessableEntity) => original.to_string(),
        Some(StatusCode::Unauthorized) if original.is_empty() => {
            StatusCode::Unauthorized.to_string()
        }
        Some(StatusCode::Unauthorized) => original.to_string(),
        Some(status @ (StatusCode::Forbidden | StatusCode::NotFound | StatusCode::MethodNotAllowed)) => {
            status.to_string()
        }
        Some(StatusCode::InternalServerError) if original.to_lowercase().contains("sql") => {
            GENERIC_FAILURE_MESSAGE.to_string()
        }
        _ => original.to_string(),
    }
}

/// Payload for the envelope's `data`
///
/// For validation failures this is the field error map under `errors`;
/// otherwise it is whatever payload the error carried. The status does not
/// change the payload.
pub fn derive_data(error: &ClassifiedError) -> Option<Map<String, Value>> {
    error.data()
}

/// Merge `trace` and `code` into `data` without dropping existing keys
pub fn augment_with_debug(
    data: Option<Map<String, Value>>,
    error: &ClassifiedError,
) -> Map<String, Value> {
    let mut data = data.unwrap_or_default();
    data.insert("trace".to_string(), json!(error.trace()));
    data.insert("code".to_string(), json!(error.code()));
    data
}
