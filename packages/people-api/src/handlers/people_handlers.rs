//! Person CRUD endpoint handlers.

use std::fmt::Display;
use std::sync::Arc;

use hyper::body::{Body, Bytes};
use hyper::{Request, Response};

use crate::controller::PeopleController;
use crate::router::{AppState, RouterError};

use super::request_utils::{
    map_store_error_to_router_error, parse_person, parse_person_id,
    read_request_body_with_timeout, render, MatchitParams,
};

fn controller(state: &AppState) -> PeopleController {
    PeopleController::new(Arc::clone(&state.store))
}

/// Lists every person.
///
/// # Endpoint
/// `GET /people`
///
/// # Response
/// - **200 OK**: `Index` view whose model is the list of people
///
/// # Example
/// ```bash
/// curl http://localhost:8080/people
/// ```
pub async fn list_people<B>(
    _req: Request<B>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let result = controller(&state)
        .index()
        .map_err(map_store_error_to_router_error)?;
    render(result)
}

/// Shows the empty form for a new person.
///
/// # Endpoint
/// `GET /people/new`
pub async fn new_person_form<B>(
    _req: Request<B>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    render(controller(&state).add_form())
}

/// Creates a person.
///
/// # Endpoint
/// `POST /people`
///
/// # Request Body
/// ```json
/// {
///   "id": 4,
///   "firstName": "Mang",
///   "lastName": "Nguyen Ba",
///   "dateOfBirth": "2001-02-15",
///   "address": "Ha Noi"
/// }
/// ```
///
/// # Response
/// - **303 See Other**: redirect to `/people`
/// - **422 Unprocessable Entity**: `Add` view with validation errors
///
/// # Errors
/// - **400 Bad Request**: body is not a valid person, or `dateOfBirth` is missing
/// - **409 Conflict**: a person with this ID already exists, or no ID is left to assign
///
/// # Notes
/// - An `id` of 0 (or none) lets the store assign the next free ID
/// - Other omitted fields default to 0 or the empty string
/// - An empty body is treated as a missing person and fails validation
pub async fn create_person<B>(
    req: Request<B>,
    _params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError>
where
    B: Body,
    B::Error: Display,
{
    let body_bytes = read_request_body_with_timeout(req, state.config.request_timeout_ms).await?;
    let person = parse_person(&body_bytes)?;

    let result = controller(&state)
        .add(person)
        .map_err(map_store_error_to_router_error)?;
    render(result)
}

/// Reads one person.
///
/// # Endpoint
/// `GET /people/{id}`
///
/// # Response
/// - **200 OK**: `Detail` view
///
/// # Errors
/// - **400 Bad Request**: invalid person ID
/// - **404 Not Found**: no such person
pub async fn read_person<B>(
    _req: Request<B>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = parse_person_id(&params)?;
    let result = controller(&state)
        .detail(id)
        .map_err(map_store_error_to_router_error)?;
    render(result)
}

/// Shows the edit form for one person.
///
/// # Endpoint
/// `GET /people/{id}/edit`
pub async fn edit_person_form<B>(
    _req: Request<B>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = parse_person_id(&params)?;
    let result = controller(&state)
        .edit_form(id)
        .map_err(map_store_error_to_router_error)?;
    render(result)
}

/// Replaces a person.
///
/// # Endpoint
/// `PUT /people/{id}`
///
/// # Response
/// - **303 See Other**: redirect to `/people`
/// - **422 Unprocessable Entity**: `Edit` view with validation errors
///
/// # Errors
/// - **400 Bad Request**: invalid person ID, or body missing or malformed
/// - **404 Not Found**: no such person
///
/// # Notes
/// - The ID in the path wins over any `id` in the body
///
/// # Example
/// ```bash
/// curl -X PUT http://localhost:8080/people/1 \
///   -H "Content-Type: application/json" \
///   -d '{"firstName": "Thai", "lastName": "Do", "dateOfBirth": "2001-02-15"}'
/// ```
pub async fn update_person<B>(
    req: Request<B>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError>
where
    B: Body,
    B::Error: Display,
{
    let id = parse_person_id(&params)?;
    let body_bytes = read_request_body_with_timeout(req, state.config.request_timeout_ms).await?;
    let mut person = parse_person(&body_bytes)?
        .ok_or_else(|| RouterError::BadRequest("Request body is empty".to_string()))?;
    person.id = id;

    let result = controller(&state)
        .edit(person)
        .map_err(map_store_error_to_router_error)?;
    render(result)
}

/// Deletes a person.
///
/// # Endpoint
/// `DELETE /people/{id}`
///
/// # Response
/// - **200 OK**: `Delete` confirmation view showing the removed person
///
/// # Errors
/// - **400 Bad Request**: invalid person ID
/// - **404 Not Found**: no such person
pub async fn delete_person<B>(
    _req: Request<B>,
    params: MatchitParams<'_, '_>,
    state: AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = parse_person_id(&params)?;
    let result = controller(&state)
        .delete(id)
        .map_err(map_store_error_to_router_error)?;
    render(result)
}
