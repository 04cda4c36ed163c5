//! Catalog query engine.
//!
//! The catalog is a static JSON array loaded once per session. Listing pages
//! filter, sort and paginate it; the quick-search overlay searches it
//! separately. All queries are pure and synchronous.
//!
//! ```text
//! load_catalog ──> filter ──> sort ──> paginate   (listing pages)
//!              └─> search                          (quick search)
//! ```

mod browser;
mod loader;
mod query;
mod sections;
mod types;

pub use browser::{BrowseRequest, CatalogBrowser};
pub use loader::{load_catalog, load_section, parse_catalog, read_catalog};
pub use query::{filter, find_by_id, paginate, search, search_with_limit, similar, sort};
pub use sections::{section_items, Section};
pub use types::*;
