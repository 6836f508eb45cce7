use crate::data::{self, DataError};
use crate::models::{self, Medicine, ALL_CATEGORIES};

use super::loader::Loader;
use super::observe::Observed;

/// State controller for the medicine list and detail screens. On top of
/// the query/selection handling shared with the other controllers it owns
/// the category filter: a selected category (defaulting to the `All`
/// sentinel) plus the distinct category list derived from the loaded
/// records. The filtered view is the AND of the category and search
/// predicates and is recomputed on every input change.
pub struct MedicinesController {
    loader: Option<Loader<Medicine>>,
    medicines: Observed<Vec<Medicine>>,
    query: Observed<String>,
    selected_category: Observed<String>,
    categories: Observed<Vec<String>>,
    filtered: Observed<Vec<Medicine>>,
    selected_name: Observed<Option<String>>,
}

impl MedicinesController {
    /// Controller backed by the bundled dataset.
    pub fn new() -> Self {
        Self::with_source(data::load_medicines)
    }

    pub fn with_source<F>(load: F) -> Self
    where
        F: FnOnce() -> Result<Vec<Medicine>, DataError> + Send + 'static,
    {
        Self {
            loader: Some(Loader::spawn(load)),
            medicines: Observed::default(),
            query: Observed::default(),
            selected_category: Observed::new(ALL_CATEGORIES.to_string()),
            categories: Observed::new(vec![ALL_CATEGORIES.to_string()]),
            filtered: Observed::default(),
            selected_name: Observed::default(),
        }
    }

    /// Drain the background load if it finished. Publishing the list also
    /// derives the category set, which never changes again afterwards
    /// because the data is read-only.
    pub fn poll(&mut self) -> Result<bool, DataError> {
        let Some(loader) = self.loader.as_mut() else {
            return Ok(false);
        };
        let Some(result) = loader.try_take() else {
            return Ok(false);
        };
        self.loader = None;
        let medicines = result?;
        self.categories.set(models::derive_categories(&medicines));
        self.medicines.set(medicines);
        self.apply_filter();
        Ok(true)
    }

    pub fn is_loaded(&self) -> bool {
        self.loader.is_none()
    }

    pub fn medicines(&self) -> &Observed<Vec<Medicine>> {
        &self.medicines
    }

    pub fn filtered(&self) -> &Observed<Vec<Medicine>> {
        &self.filtered
    }

    pub fn categories(&self) -> &Observed<Vec<String>> {
        &self.categories
    }

    pub fn query(&self) -> &str {
        self.query.get()
    }

    pub fn selected_category(&self) -> &str {
        self.selected_category.get()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query.set(query.into());
        self.apply_filter();
    }

    /// Switch the category chip. Unknown categories are accepted and
    /// simply filter everything out; the picker UI only offers derived
    /// ones, so that path never fires in practice.
    pub fn select_category(&mut self, category: impl Into<String>) {
        self.selected_category.set(category.into());
        self.apply_filter();
    }

    /// Select a medicine by unique name; an absent name clears the
    /// selection.
    pub fn select(&mut self, name: &str) {
        let found = self
            .medicines
            .get()
            .iter()
            .any(|medicine| medicine.name == name);
        self.selected_name.set(found.then(|| name.to_string()));
    }

    pub fn clear_selection(&mut self) {
        self.selected_name.set(None);
    }

    /// Resolve the current selection by key lookup against the loaded
    /// list.
    pub fn selected(&self) -> Option<&Medicine> {
        let name = self.selected_name.get().as_deref()?;
        self.medicines
            .get()
            .iter()
            .find(|medicine| medicine.name == name)
    }

    fn apply_filter(&mut self) {
        let query = self.query.get().clone();
        let category = self.selected_category.get().clone();
        let filtered = self
            .medicines
            .get()
            .iter()
            .filter(|medicine| medicine.in_category(&category) && medicine.matches_query(&query))
            .cloned()
            .collect();
        self.filtered.set(filtered);
    }
}

impl Default for MedicinesController {
    fn default() -> Self {
        Self::new()
    }
}
