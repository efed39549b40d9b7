//! People controller: request handling on top of a [`PersonStore`].

use std::sync::Arc;

use serde::Serialize;

use people_core::{ModelState, PersonModel, PersonStore, StoreError};

/// Action name of the listing view, used as the redirect target after writes.
pub const INDEX_ACTION: &str = "Index";

/// Model carried by a rendered view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ViewModel {
    /// Form shown without a record
    Empty,
    Person(PersonModel),
    People(Vec<PersonModel>),
}

/// A view to render, with the validation state it should display.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewResult {
    /// View name (`Index`, `Add`, `Edit`, `Delete` or `Detail`)
    pub name: &'static str,
    pub model: ViewModel,
    pub model_state: ModelState,
}

/// Outcome of a controller action.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult {
    View(ViewResult),
    /// Redirect to another action by name
    Redirect { action: &'static str },
    /// The requested person does not exist
    NotFound { id: u64 },
}

impl ActionResult {
    pub fn as_view(&self) -> Option<&ViewResult> {
        match self {
            ActionResult::View(view) => Some(view),
            _ => None,
        }
    }

    /// Target action name if this is a redirect.
    pub fn redirect_action(&self) -> Option<&'static str> {
        match self {
            ActionResult::Redirect { action } => Some(*action),
            _ => None,
        }
    }
}

/// Handles person CRUD requests.
///
/// A controller is built per request: it owns that request's [`ModelState`]
/// and shares the store with every other request.
pub struct PeopleController {
    store: Arc<dyn PersonStore>,
    model_state: ModelState,
}

impl PeopleController {
    pub fn new(store: Arc<dyn PersonStore>) -> Self {
        Self {
            store,
            model_state: ModelState::new(),
        }
    }

    pub fn model_state(&self) -> &ModelState {
        &self.model_state
    }

    /// Validation state errors can be recorded into before an action runs.
    pub fn model_state_mut(&mut self) -> &mut ModelState {
        &mut self.model_state
    }

    /// Lists every person.
    pub fn index(&self) -> Result<ActionResult, StoreError> {
        let people = self.store.get_all()?;
        tracing::debug!("Listing {} people", people.len());
        Ok(self.view("Index", ViewModel::People(people)))
    }

    /// Shows the empty form for a new person.
    pub fn add_form(&self) -> ActionResult {
        self.view("Add", ViewModel::Empty)
    }

    /// Adds a person and redirects to the listing.
    ///
    /// Errors already in the model state, or found by validating `input`,
    /// re-display the form instead. The store is not called in that case.
    pub fn add(&mut self, input: Option<PersonModel>) -> Result<ActionResult, StoreError> {
        if !self.model_state.is_valid() {
            return Ok(self.invalid_form("Add", input));
        }
        let Some(person) = input else {
            self.model_state
                .add_model_error("person", "A person is required");
            return Ok(self.invalid_form("Add", None));
        };
        person.validate(&mut self.model_state);
        if !self.model_state.is_valid() {
            return Ok(self.invalid_form("Add", Some(person)));
        }

        let id = person.id;
        self.store.add(person)?;
        tracing::info!("Added person {}", id);
        Ok(redirect_to_index())
    }

    /// Shows the edit form pre-filled with the stored person.
    pub fn edit_form(&self, id: u64) -> Result<ActionResult, StoreError> {
        match self.store.detail(id) {
            Ok(person) => Ok(self.view("Edit", ViewModel::Person(person))),
            Err(e) => not_found_or(e),
        }
    }

    /// Replaces a person and redirects to the listing.
    pub fn edit(&mut self, input: PersonModel) -> Result<ActionResult, StoreError> {
        if self.model_state.is_valid() {
            input.validate(&mut self.model_state);
        }
        if !self.model_state.is_valid() {
            return Ok(self.invalid_form("Edit", Some(input)));
        }

        let id = input.id;
        match self.store.edit(input) {
            Ok(()) => {
                tracing::info!("Edited person {}", id);
                Ok(redirect_to_index())
            }
            Err(e) => not_found_or(e),
        }
    }

    /// Removes a person and shows it on the confirmation view.
    pub fn delete(&self, id: u64) -> Result<ActionResult, StoreError> {
        let person = match self.store.detail(id) {
            Ok(person) => person,
            Err(e) => return not_found_or(e),
        };
        if let Err(e) = self.store.delete(id) {
            return not_found_or(e);
        }
        tracing::info!("Deleted person {} ({})", id, person.full_name());
        Ok(self.view("Delete", ViewModel::Person(person)))
    }

    /// Shows one person.
    pub fn detail(&self, id: u64) -> Result<ActionResult, StoreError> {
        match self.store.detail(id) {
            Ok(person) => Ok(self.view("Detail", ViewModel::Person(person))),
            Err(e) => not_found_or(e),
        }
    }

    fn view(&self, name: &'static str, model: ViewModel) -> ActionResult {
        ActionResult::View(ViewResult {
            name,
            model,
            model_state: self.model_state.clone(),
        })
    }

    fn invalid_form(&self, name: &'static str, input: Option<PersonModel>) -> ActionResult {
        tracing::warn!(
            "{} rejected with {} validation error(s)",
            name,
            self.model_state.error_count()
        );
        let model = input.map_or(ViewModel::Empty, ViewModel::Person);
        self.view(name, model)
    }
}

fn redirect_to_index() -> ActionResult {
    ActionResult::Redirect {
        action: INDEX_ACTION,
    }
}

/// Turns a store not-found into [`ActionResult::NotFound`]; other errors pass through.
fn not_found_or(e: StoreError) -> Result<ActionResult, StoreError> {
    match e {
        StoreError::NotFound { id } => {
            tracing::warn!("Person {} not found", id);
            Ok(ActionResult::NotFound { id })
        }
        other => Err(other),
    }
}
