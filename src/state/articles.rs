use crate::data::{self, DataError};
use crate::models::Article;

use super::loader::Loader;
use super::observe::Observed;

/// State controller for the article list and detail screens. Selection is
/// stored as the article's unique name and re-resolved against the loaded
/// list on every read, so the detail screen never holds a stale copy and
/// an unknown key simply reads back as no selection.
pub struct ArticlesController {
    loader: Option<Loader<Article>>,
    articles: Observed<Vec<Article>>,
    query: Observed<String>,
    filtered: Observed<Vec<Article>>,
    selected_name: Observed<Option<String>>,
}

impl ArticlesController {
    /// Controller backed by the bundled dataset.
    pub fn new() -> Self {
        Self::with_source(data::load_articles)
    }

    pub fn with_source<F>(load: F) -> Self
    where
        F: FnOnce() -> Result<Vec<Article>, DataError> + Send + 'static,
    {
        Self {
            loader: Some(Loader::spawn(load)),
            articles: Observed::default(),
            query: Observed::default(),
            filtered: Observed::default(),
            selected_name: Observed::default(),
        }
    }

    /// Drain the background load if it finished; see
    /// [`ContactsController::poll`](super::ContactsController::poll).
    pub fn poll(&mut self) -> Result<bool, DataError> {
        let Some(loader) = self.loader.as_mut() else {
            return Ok(false);
        };
        let Some(result) = loader.try_take() else {
            return Ok(false);
        };
        self.loader = None;
        self.articles.set(result?);
        self.apply_filter();
        Ok(true)
    }

    pub fn is_loaded(&self) -> bool {
        self.loader.is_none()
    }

    pub fn articles(&self) -> &Observed<Vec<Article>> {
        &self.articles
    }

    pub fn filtered(&self) -> &Observed<Vec<Article>> {
        &self.filtered
    }

    pub fn query(&self) -> &str {
        self.query.get()
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query.set(query.into());
        self.apply_filter();
    }

    /// Select an article by unique name. A name not present in the loaded
    /// list clears the selection instead of erroring.
    pub fn select(&mut self, name: &str) {
        let found = self
            .articles
            .get()
            .iter()
            .any(|article| article.name == name);
        self.selected_name.set(found.then(|| name.to_string()));
    }

    /// Drop the selection, typically on navigating back from the detail
    /// screen.
    pub fn clear_selection(&mut self) {
        self.selected_name.set(None);
    }

    /// Resolve the current selection by key lookup against the loaded
    /// list. `None` means the detail screen has nothing to render.
    pub fn selected(&self) -> Option<&Article> {
        let name = self.selected_name.get().as_deref()?;
        self.articles
            .get()
            .iter()
            .find(|article| article.name == name)
    }

    fn apply_filter(&mut self) {
        let query = self.query.get().clone();
        let filtered = self
            .articles
            .get()
            .iter()
            .filter(|article| article.matches_query(&query))
            .cloned()
            .collect();
        self.filtered.set(filtered);
    }
}

impl Default for ArticlesController {
    fn default() -> Self {
        Self::new()
    }
}
