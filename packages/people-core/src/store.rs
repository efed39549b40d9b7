//! Person storage trait and the in-memory implementation.

use std::path::Path;

use parking_lot::RwLock;

use crate::error::StoreError;
use crate::person::PersonModel;

/// Data access for person records.
///
/// The controller holds this as a trait object; implementations own the
/// canonical collection and must be safe to share across request tasks.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait PersonStore: Send + Sync {
    /// Returns every person in insertion order.
    fn get_all(&self) -> Result<Vec<PersonModel>, StoreError>;

    /// Inserts a new person.
    fn add(&self, person: PersonModel) -> Result<(), StoreError>;

    /// Replaces the person with the same ID.
    fn edit(&self, person: PersonModel) -> Result<(), StoreError>;

    /// Removes the person with the given ID.
    fn delete(&self, id: u64) -> Result<(), StoreError>;

    /// Returns the person with the given ID.
    fn detail(&self, id: u64) -> Result<PersonModel, StoreError>;
}

/// Vector-backed store guarded by a read/write lock.
#[derive(Debug, Default)]
pub struct InMemoryPersonStore {
    people: RwLock<Vec<PersonModel>>,
}

impl InMemoryPersonStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `people`, rejecting repeated IDs.
    pub fn with_people(people: Vec<PersonModel>) -> Result<Self, StoreError> {
        let store = Self::new();
        for person in people {
            store.add(person)?;
        }
        Ok(store)
    }

    /// Loads a JSON array of people from `path`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|e| StoreError::Seed(format!("{}: {}", path.display(), e)))?;
        let people: Vec<PersonModel> = serde_json::from_slice(&data)
            .map_err(|e| StoreError::Seed(format!("{}: {}", path.display(), e)))?;
        tracing::info!("Loaded {} people from {}", people.len(), path.display());
        Self::with_people(people)
    }

    pub fn len(&self) -> usize {
        self.people.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.read().is_empty()
    }
}

impl PersonStore for InMemoryPersonStore {
    fn get_all(&self) -> Result<Vec<PersonModel>, StoreError> {
        Ok(self.people.read().clone())
    }

    fn add(&self, mut person: PersonModel) -> Result<(), StoreError> {
        let mut people = self.people.write();
        if person.id == 0 {
            person.id = people
                .iter()
                .map(|p| p.id)
                .max()
                .unwrap_or(0)
                .checked_add(1)
                .ok_or(StoreError::IdSpaceExhausted)?;
        } else if people.iter().any(|p| p.id == person.id) {
            return Err(StoreError::DuplicateId { id: person.id });
        }
        tracing::debug!("Storing person {}", person.id);
        people.push(person);
        Ok(())
    }

    fn edit(&self, person: PersonModel) -> Result<(), StoreError> {
        let mut people = self.people.write();
        let slot = people
            .iter_mut()
            .find(|p| p.id == person.id)
            .ok_or(StoreError::NotFound { id: person.id })?;
        *slot = person;
        Ok(())
    }

    fn delete(&self, id: u64) -> Result<(), StoreError> {
        let mut people = self.people.write();
        let index = people
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::NotFound { id })?;
        people.remove(index);
        Ok(())
    }

    fn detail(&self, id: u64) -> Result<PersonModel, StoreError> {
        self.people
            .read()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }
}
