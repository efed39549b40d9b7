//! Matchit routing configuration.

use std::fmt::Display;
use std::sync::Arc;

use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use matchit::Router as MatchitRouter;

use crate::handlers;
use people_core::{config::ServerConfig, PersonStore};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Person store shared by every request
    pub store: Arc<dyn PersonStore>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

/// HTTP request router.
pub struct Router {
    inner: MatchitRouter<RouteHandler>,
    state: AppState,
}

impl Router {
    /// Creates a new router with the people routes.
    pub fn new(store: Arc<dyn PersonStore>, config: Arc<ServerConfig>) -> Self {
        let mut router = MatchitRouter::new();

        router
            .insert("/people", RouteHandler::People)
            .expect("Failed to insert /people route");
        router
            .insert("/people/new", RouteHandler::NewPerson)
            .expect("Failed to insert /people/new route");
        router
            .insert("/people/{id}", RouteHandler::Person)
            .expect("Failed to insert /people/{id} route");
        router
            .insert("/people/{id}/edit", RouteHandler::EditPerson)
            .expect("Failed to insert /people/{id}/edit route");

        Self {
            inner: router,
            state: AppState { store, config },
        }
    }

    /// Routes an incoming request to the appropriate handler.
    pub async fn route<B>(&self, req: Request<B>) -> Result<Response<Bytes>, RouterError>
    where
        B: Body,
        B::Error: Display,
    {
        let path = req.uri().path().to_string();
        tracing::debug!("{} {}", req.method(), path);

        match self.inner.at(&path) {
            Ok(matched) => {
                let handler = matched.value;
                handler
                    .handle(req, matched.params, self.state.clone())
                    .await
            }
            Err(_) => Err(RouterError::NotFound(format!(
                "No route found for {}",
                path
            ))),
        }
    }

    /// Like [`Router::route`], but renders errors as JSON error responses.
    pub async fn respond<B>(&self, req: Request<B>) -> Response<Bytes>
    where
        B: Body,
        B::Error: Display,
    {
        match self.route(req).await {
            Ok(response) => response,
            Err(err) => {
                match &err {
                    RouterError::InternalError(msg) => {
                        tracing::error!("Error handling request: {}", msg)
                    }
                    other => tracing::debug!("Request failed: {}", other),
                }
                err.into()
            }
        }
    }
}

/// Route handler function.
enum RouteHandler {
    People,
    NewPerson,
    Person,
    EditPerson,
}

impl RouteHandler {
    /// Handles a request with the given route parameters.
    async fn handle<B>(
        &self,
        req: Request<B>,
        params: matchit::Params<'_, '_>,
        state: AppState,
    ) -> Result<Response<Bytes>, RouterError>
    where
        B: Body,
        B::Error: Display,
    {
        let method = req.method().clone();
        match (self, method) {
            (RouteHandler::People, Method::GET) => handlers::list_people(req, params, state).await,
            (RouteHandler::People, Method::POST) => {
                handlers::create_person(req, params, state).await
            }
            (RouteHandler::NewPerson, Method::GET) => {
                handlers::new_person_form(req, params, state).await
            }
            (RouteHandler::Person, Method::GET) => handlers::read_person(req, params, state).await,
            (RouteHandler::Person, Method::PUT) => {
                handlers::update_person(req, params, state).await
            }
            (RouteHandler::Person, Method::DELETE) => {
                handlers::delete_person(req, params, state).await
            }
            (RouteHandler::EditPerson, Method::GET) => {
                handlers::edit_person_form(req, params, state).await
            }
            _ => Err(RouterError::MethodNotAllowed),
        }
    }
}

/// Router error type.
#[derive(Debug)]
pub enum RouterError {
    MethodNotAllowed,
    InternalError(String),
    Timeout,
    BadRequest(String),
    NotFound(String),
    Conflict(String),
}

impl std::fmt::Display for RouterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouterError::MethodNotAllowed => write!(f, "Method Not Allowed"),
            RouterError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
            RouterError::Timeout => write!(f, "Request Timeout"),
            RouterError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            RouterError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            RouterError::Conflict(msg) => write!(f, "Conflict: {}", msg),
        }
    }
}

impl std::error::Error for RouterError {}

impl From<RouterError> for Response<Bytes> {
    fn from(err: RouterError) -> Self {
        let (status, message) = match &err {
            RouterError::MethodNotAllowed => (405, "Method Not Allowed"),
            RouterError::InternalError(msg) => (500, msg.as_str()),
            RouterError::Timeout => (408, "Request Timeout"),
            RouterError::BadRequest(msg) => (400, msg.as_str()),
            RouterError::NotFound(msg) => (404, msg.as_str()),
            RouterError::Conflict(msg) => (409, msg.as_str()),
        };

        let error_response = handlers::error_response(status, message.to_string(), None);
        let body = serde_json::to_vec(&error_response)
            .unwrap_or_else(|e| format!("{{\"success\":false,\"error\":{{\"code\":\"500\",\"message\":\"Failed to serialize error: {}\",\"details\":null}}}}", e).into_bytes());

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Bytes::from(body))
            .unwrap_or_else(|_| {
                let mut fallback = Response::new(Bytes::from("Internal Server Error"));
                *fallback.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
                fallback
            })
    }
}
