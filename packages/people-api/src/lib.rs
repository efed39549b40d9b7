//! People directory controller and REST API server.
//!
//! The controller turns requests into [`people_core::PersonStore`] calls and
//! produces an [`controller::ActionResult`]; the router and handlers map those
//! results onto HTTP.

pub mod controller;
pub mod handlers;
pub mod router;
pub mod server;

pub use controller::{ActionResult, PeopleController, ViewModel, ViewResult};
