//! Deterministic placeholder art.

use super::ContentRecord;

/// Placeholder image service keyed by seed.
pub const PLACEHOLDER_ART_BASE: &str = "https://picsum.photos/seed";

/// Pixel dimensions of a rendered image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtSize {
    pub width: u32,
    pub height: u32,
}

impl ArtSize {
    /// Grid and slider cards.
    pub const CARD: ArtSize = ArtSize {
        width: 300,
        height: 450,
    };
    /// Details page poster.
    pub const POSTER: ArtSize = ArtSize {
        width: 600,
        height: 900,
    };
    /// Episode list thumbnails (16:9).
    pub const EPISODE_THUMB: ArtSize = ArtSize {
        width: 400,
        height: 225,
    };
}

/// Image URL for a record, seeded by `imageSeed`, then `id`, then a fixed
/// placeholder. Empty values are skipped.
pub fn image_url(record: &ContentRecord, size: ArtSize) -> String {
    let seed = record
        .image_seed
        .as_deref()
        .filter(|s| !s.is_empty())
        .or_else(|| Some(record.id.as_str()).filter(|s| !s.is_empty()))
        .unwrap_or("placeholder");
    seeded_url(seed, size)
}

/// Thumbnail URL for episode `episode` (1-based) of a series.
pub fn episode_thumbnail_url(record: &ContentRecord, episode: u32) -> String {
    seeded_url(
        &format!("{}-ep{}", record.id, episode),
        ArtSize::EPISODE_THUMB,
    )
}

fn seeded_url(seed: &str, size: ArtSize) -> String {
    format!(
        "{}/{}/{}/{}",
        PLACEHOLDER_ART_BASE,
        urlencoding::encode(seed),
        size.width,
        size.height
    )
}
