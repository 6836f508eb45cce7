//! Core library surface for the MedShelf health-reference TUI.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as potential external tooling can reuse the same
//! pieces: bundled-dataset loading, the reactive controllers that filter the
//! data, and the interactive application itself.
pub mod data;
pub mod models;
pub mod state;
pub mod ui;

/// The three domain types deserialized from the bundled datasets.
pub use models::{Article, EmergencyContact, Medicine};

/// Per-dataset controllers that own loading, search, and selection state.
pub use state::{ArticlesController, ContactsController, MedicinesController};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
