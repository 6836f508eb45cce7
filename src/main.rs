//! Binary entry point that glues the bundled datasets to the TUI. Each
//! controller kicks off its load on a background thread at construction, so
//! the first frame renders immediately while the JSON is still parsing.
use medshelf::{run_app, App, ArticlesController, ContactsController, MedicinesController};

/// Construct the dataset controllers and drive the Ratatui event loop.
///
/// Returning a `Result` bubbles up fatal problems (for example a corrupted
/// bundled dataset) to the terminal instead of crashing silently.
fn main() -> anyhow::Result<()> {
    let mut app = App::new(
        ContactsController::new(),
        ArticlesController::new(),
        MedicinesController::new(),
    );
    run_app(&mut app)
}
