//! Content records as delivered by the static catalog.
//!
//! Records are read-only inputs: the catalog query engine filters, sorts and
//! slices them, the library only ever refers to them by id.

mod art;
mod lenient;
mod types;

pub use art::{episode_thumbnail_url, image_url, ArtSize, PLACEHOLDER_ART_BASE};
pub use types::{ContentId, ContentRecord, SERIES_TYPE};
