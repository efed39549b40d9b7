//! Core types for the people directory.
//!
//! Provides the person record, its validation rules, the storage trait the
//! controller depends on, and an in-memory implementation of that trait.

pub mod config;
pub mod error;
pub mod person;
pub mod store;
pub mod validation;

pub use error::StoreError;
pub use person::PersonModel;
pub use store::{InMemoryPersonStore, PersonStore};
pub use validation::ModelState;

#[cfg(feature = "mock")]
pub use store::MockPersonStore;
