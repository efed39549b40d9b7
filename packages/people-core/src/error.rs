//! Store error types.

use thiserror::Error;

/// Person store operation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No person with the given ID
    #[error("Person {id} not found")]
    NotFound { id: u64 },

    /// A person with the given ID already exists
    #[error("Person {id} already exists")]
    DuplicateId { id: u64 },

    /// The highest possible ID is taken, so no new one can be assigned
    #[error("No person ID left to assign")]
    IdSpaceExhausted,

    /// Seed data could not be read or parsed
    #[error("Failed to load seed data: {0}")]
    Seed(String),
}
