//! Terminal user interface: screens, key handling, and the draw loop.

mod app;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
