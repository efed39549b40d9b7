//! Per-request validation state.

use std::collections::BTreeMap;

use serde::Serialize;

/// Validation errors collected while handling one request, keyed by field.
///
/// Errors may be recorded by the caller before an action runs or by the
/// model's own validation rules. An action that finds any error here must not
/// touch the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ModelState {
    errors: BTreeMap<String, Vec<String>>,
}

impl ModelState {
    /// Creates an empty, valid state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error message under `key`.
    pub fn add_model_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(key.into())
            .or_default()
            .push(message.into());
    }

    /// Returns true if no errors have been recorded.
    pub fn is_valid(&self) -> bool {
        self.errors.values().all(Vec::is_empty)
    }

    /// Total number of error messages across all keys.
    pub fn error_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    /// Messages recorded under `key`, in insertion order.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.errors.get(key).map(Vec::as_slice)
    }
}
