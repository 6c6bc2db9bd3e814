pub mod builder;
pub mod response;
pub mod status_code;

pub use builder::ResponseBuilder;
pub use response::ApiResponse;
pub use status_code::StatusCode;
