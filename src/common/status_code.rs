use strum_macros::{Display, EnumIter, FromRepr};

/// HTTP statuses the response layer treats specially
///
/// `Display` renders the reason phrase that is sent to clients when the
/// message policy replaces the original error message.
///
/// # Example
/// ```
/// use primeskills_web::common::StatusCode;
///
/// assert_eq!(StatusCode::from_repr(404), Some(StatusCode::NotFound));
/// assert_eq!(StatusCode::NotFound.to_string(), "Not Found");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, FromRepr)]
#[repr(u16)]
pub enum StatusCode {
    #[strum(to_string = "OK")]
    Ok = 200,
    #[strum(to_string = "Created")]
    Created = 201,
    #[strum(to_string = "No Content")]
    NoContent = 204,
    #[strum(to_string = "Bad Request")]
    BadRequest = 400,
    #[strum(to_string = "Unauthorized")]
    Unauthorized = 401,
    #[strum(to_string = "Forbidden")]
    Forbidden = 403,
    #[strum(to_string = "Not Found")]
    NotFound = 404,
    #[strum(to_string = "Method Not Allowed")]
    MethodNotAllowed = 405,
    #[strum(to_string = "Page Expired")]
    PageExpired = 419,
    #[strum(to_string = "Unprocessable Entity")]
    UnprocessableEntity = 422,
    #[strum(to_string = "Internal Server Error")]
    InternalServerError = 500,
    #[strum(to_string = "Service Unavailable")]
    ServiceUnavailable = 503,
}

impl StatusCode {
    /// Numeric value of the status
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(self) -> bool {
        is_success(self.as_u16())
    }
}

/// `true` iff `200 <= code < 300`
pub fn is_success(code: u16) -> bool {
    (200..300).contains(&code)
}

impl From<StatusCode> for u16 {
    fn from(status: StatusCode) -> Self {
        status.as_u16()
    }
}

impl From<StatusCode> for axum::http::StatusCode {
    fn from(status: StatusCode) -> Self {
        axum::http::StatusCode::from_u16(status.as_u16())
            .unwrap_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
    }
}
