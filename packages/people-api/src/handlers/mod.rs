//! HTTP endpoint implementations for the people directory.

mod people_handlers;
pub mod request_utils;
pub mod response;

pub use people_handlers::*;
pub use request_utils::map_store_error_to_router_error;
pub use response::{error_response, success_response, ApiError, ApiResponse, ErrorResponse};
