//! The watch-list: remote source, parsed form, and the swap-on-refresh store.

pub mod errors;
pub mod source;
pub mod store;
pub mod types;

pub use errors::CatalogueError;
pub use source::{CatalogueSource, HttpCatalogueSource};
pub use store::{CatalogueHandle, CatalogueStore};
pub use types::{Catalogue, CatalogueEntry};
