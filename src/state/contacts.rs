use crate::data::{self, DataError};
use crate::models::EmergencyContact;

use super::loader::Loader;
use super::observe::Observed;

/// State controller for the emergency contacts screen. Contacts have no
/// detail screen, so this is the simplest of the three controllers: a
/// loaded list, a query, and the filtered view derived from both.
pub struct ContactsController {
    loader: Option<Loader<EmergencyContact>>,
    contacts: Observed<Vec<EmergencyContact>>,
    query: Observed<String>,
    filtered: Observed<Vec<EmergencyContact>>,
}

impl ContactsController {
    /// Controller backed by the bundled dataset.
    pub fn new() -> Self {
        Self::with_source(data::load_contacts)
    }

    /// Controller backed by an arbitrary load function. The load starts
    /// immediately on a background thread; results surface via [`poll`].
    ///
    /// [`poll`]: ContactsController::poll
    pub fn with_source<F>(load: F) -> Self
    where
        F: FnOnce() -> Result<Vec<EmergencyContact>, DataError> + Send + 'static,
    {
        Self {
            loader: Some(Loader::spawn(load)),
            contacts: Observed::default(),
            query: Observed::default(),
            filtered: Observed::default(),
        }
    }

    /// Drain the background load if it finished. Returns `Ok(true)` the
    /// one time the list gets published; malformed bundled data bubbles up
    /// as the fatal startup error it is.
    pub fn poll(&mut self) -> Result<bool, DataError> {
        let Some(loader) = self.loader.as_mut() else {
            return Ok(false);
        };
        let Some(result) = loader.try_take() else {
            return Ok(false);
        };
        self.loader = None;
        self.contacts.set(result?);
        self.apply_filter();
        Ok(true)
    }

    pub fn is_loaded(&self) -> bool {
        self.loader.is_none()
    }

    pub fn contacts(&self) -> &Observed<Vec<EmergencyContact>> {
        &self.contacts
    }

    pub fn filtered(&self) -> &Observed<Vec<EmergencyContact>> {
        &self.filtered
    }

    pub fn query(&self) -> &str {
        self.query.get()
    }

    /// Replace the search query and recompute the filtered view.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query.set(query.into());
        self.apply_filter();
    }

    fn apply_filter(&mut self) {
        let query = self.query.get().clone();
        let filtered = self
            .contacts
            .get()
            .iter()
            .filter(|contact| contact.matches_query(&query))
            .cloned()
            .collect();
        self.filtered.set(filtered);
    }
}

impl Default for ContactsController {
    fn default() -> Self {
        Self::new()
    }
}
