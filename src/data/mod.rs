//! Read-only data access split across logical submodules. One repository
//! per bundled dataset, a shared codec for the JSON parsing, and the glyph
//! catalog that stands in for an image asset store.

mod articles;
mod assets;
mod codec;
mod contacts;
mod medicines;

pub use articles::load_articles;
pub use assets::{glyph, FALLBACK_GLYPH};
pub use codec::{parse_dataset, DataError};
pub use contacts::load_contacts;
pub use medicines::load_medicines;
