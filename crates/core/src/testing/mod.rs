//! Testing utilities and mock implementations.
//!
//! This module provides a controllable storage backend and catalog fixtures,
//! allowing library and catalog behavior to be tested without real storage.
//!
//! # Example
//!
//! ```rust,ignore
//! use mediax_core::testing::{fixtures, MockBackend};
//!
//! let backend = MockBackend::new();
//! let library = LibraryStore::new(backend.clone());
//! let catalog = fixtures::sample_catalog();
//! ```

mod mock_backend;

pub use mock_backend::{MockBackend, RecordedWrite};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::content::ContentRecord;

    /// Create a content record with reasonable defaults.
    pub fn content_record(
        id: &str,
        title: &str,
        genre: &str,
        year: i32,
        quality: &str,
        rating: f64,
    ) -> ContentRecord {
        ContentRecord {
            id: id.to_string(),
            title: title.to_string(),
            genre: Some(genre.to_string()),
            year: Some(year),
            quality: Some(quality.to_string()),
            rating: Some(rating),
            content_type: None,
            image_seed: Some(format!("{}-seed", id)),
            description: None,
            episodes: None,
        }
    }

    /// Create a series record.
    pub fn series_record(
        id: &str,
        title: &str,
        genre: &str,
        year: i32,
        episodes: u32,
    ) -> ContentRecord {
        ContentRecord {
            content_type: Some("series".to_string()),
            episodes: Some(episodes),
            ..content_record(id, title, genre, year, "HD", 8.0)
        }
    }

    /// A small mixed catalog in display order.
    pub fn sample_catalog() -> Vec<ContentRecord> {
        vec![
            content_record("c1", "Desert Storm", "action", 2021, "4K", 8.1),
            content_record("c2", "Quiet Harbor", "drama", 2019, "HD", 7.4),
            series_record("s1", "Night Shift", "drama", 2022, 10),
            content_record("c3", "Last Run", "action", 2018, "HD", 6.9),
            content_record("c4", "Bright Lights", "comedy", 2023, "4K", 7.4),
            content_record("b1", "Field Notes", "documentary", 2020, "PDF", 9.0),
            content_record("c5", "Cold Trail", "thriller", 2016, "HD", 5.5),
            series_record("s2", "Harbor Watch", "action", 2021, 8),
        ]
    }
}
