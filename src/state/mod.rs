//! Observable state controllers, one per dataset. Each controller owns
//! its loaded list plus the search/filter/selection state for one screen,
//! publishes derived views through [`Observed`] holders, and is polled
//! from the event loop to pick up its one-shot background load. Nothing
//! in this module knows about the terminal renderer.

mod articles;
mod contacts;
mod loader;
mod medicines;
mod observe;

pub use articles::ArticlesController;
pub use contacts::ContactsController;
pub use medicines::MedicinesController;
pub use observe::{Observed, Watcher};
