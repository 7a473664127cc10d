//! The font catalog: record types, client-side queries and the repository
//! seam with its in-memory and file backends.

mod file_store;
mod memory_store;
mod model;
mod query;
mod repository;

pub use file_store::FileFontRepository;
pub use memory_store::InMemoryFontRepository;
pub use model::{Category, Font, FontType, FontUpdate, GoogleFontsData, License, NewFont};
pub use query::{CatalogQuery, SortBy};
pub use repository::FontRepository;
