//! Request utilities for HTTP endpoints.

use std::fmt::Display;

use http_body_util::BodyExt;
use hyper::body::{Body, Bytes};
use hyper::{Request, Response};
use serde::Serialize;
use tokio::time;

use crate::controller::{ActionResult, ViewModel, INDEX_ACTION};
use crate::router::RouterError;
use people_core::{ModelState, PersonModel, StoreError};

use super::response::{invalid_response, success_response};

/// Type alias for matchit parameters with explicit lifetimes
pub type MatchitParams<'a, 'b> = matchit::Params<'a, 'b>;

/// Body of a rendered view.
#[derive(Debug, Serialize)]
pub struct ViewBody<'a> {
    /// View name
    pub view: &'a str,
    /// View model
    pub model: &'a ViewModel,
    /// Validation errors, omitted when there are none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<&'a ModelState>,
}

/// Helper function to read request body with timeout
pub async fn read_request_body_with_timeout<B>(
    req: Request<B>,
    timeout_ms: u64,
) -> Result<Bytes, RouterError>
where
    B: Body,
    B::Error: Display,
{
    let timeout_duration = time::Duration::from_millis(timeout_ms);
    let body = time::timeout(timeout_duration, req.into_body().collect())
        .await
        .map_err(|_| RouterError::Timeout)?
        .map_err(|e| RouterError::InternalError(format!("Failed to read request body: {}", e)))?;
    Ok(body.to_bytes())
}

/// Parses a person from a JSON body; an empty body means no person was submitted.
pub fn parse_person(body: &[u8]) -> Result<Option<PersonModel>, RouterError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| RouterError::BadRequest(format!("Failed to parse request: {}", e)))
}

/// Parses the `id` route parameter.
pub fn parse_person_id(params: &MatchitParams<'_, '_>) -> Result<u64, RouterError> {
    let id_str = params.get("id").unwrap_or("");
    id_str
        .parse()
        .map_err(|e| RouterError::BadRequest(format!("Invalid person ID '{}': {}", id_str, e)))
}

/// Map StoreError to appropriate RouterError
pub fn map_store_error_to_router_error(e: StoreError) -> RouterError {
    match e {
        StoreError::NotFound { .. } => RouterError::NotFound(e.to_string()),
        StoreError::DuplicateId { .. } | StoreError::IdSpaceExhausted => {
            RouterError::Conflict(e.to_string())
        }
        StoreError::Seed(_) => RouterError::InternalError(format!("Store error: {}", e)),
    }
}

/// Path an action name redirects to.
pub fn action_path(action: &str) -> &'static str {
    match action {
        INDEX_ACTION => "/people",
        _ => "/",
    }
}

/// Converts a controller result into an HTTP response.
///
/// Views render as 200, or 422 when they carry validation errors. Redirects
/// become `303 See Other`.
pub fn render(result: ActionResult) -> Result<Response<Bytes>, RouterError> {
    match result {
        ActionResult::View(view) => {
            let valid = view.model_state.is_valid();
            let body = ViewBody {
                view: view.name,
                model: &view.model,
                errors: (!valid).then_some(&view.model_state),
            };
            let api_response = if valid {
                success_response(body)
            } else {
                invalid_response(body)
            };
            let json = serde_json::to_vec(&api_response).map_err(|e| {
                RouterError::InternalError(format!("Failed to serialize response: {}", e))
            })?;
            build_response(if valid { 200 } else { 422 }, json)
        }
        ActionResult::Redirect { action } => build_redirect(action_path(action)),
        ActionResult::NotFound { id } => {
            Err(RouterError::NotFound(format!("Person {} not found", id)))
        }
    }
}

/// Helper to build HTTP response with proper error handling
pub fn build_response(status: u16, json: Vec<u8>) -> Result<Response<Bytes>, RouterError> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Bytes::from(json))
        .map_err(|e| RouterError::InternalError(format!("Failed to build response: {}", e)))
}

/// Helper to build a `303 See Other` redirect
pub fn build_redirect(location: &str) -> Result<Response<Bytes>, RouterError> {
    Response::builder()
        .status(303)
        .header("Location", location)
        .body(Bytes::new())
        .map_err(|e| RouterError::InternalError(format!("Failed to build response: {}", e)))
}
