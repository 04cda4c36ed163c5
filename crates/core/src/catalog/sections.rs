//! Site sections carved out of the full catalog.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::types::CatalogError;
use crate::content::{ContentRecord, SERIES_TYPE};

/// Games shown when a section has to be derived from the full catalog.
const DERIVED_GAMES_LIMIT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Movies,
    Series,
    Books,
    Games,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Movies,
        Section::Series,
        Section::Books,
        Section::Games,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Movies => "movies",
            Section::Series => "series",
            Section::Books => "books",
            Section::Games => "games",
        }
    }

    /// Name of the dedicated catalog file, e.g. `movies.json`.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }

    /// Section of a page, judged by the last path segment
    /// (`/site/movies.html` is [`Section::Movies`]).
    pub fn from_page_path(path: &str) -> Option<Section> {
        let page = path.rsplit('/').next().unwrap_or_default();
        Section::ALL
            .into_iter()
            .find(|section| page.contains(section.as_str()))
    }

    /// Whether `record` belongs here when deriving from the full catalog.
    fn derived_match(&self, record: &ContentRecord) -> bool {
        match self {
            Section::Movies => {
                record.content_type.as_deref().unwrap_or_default().is_empty()
                    && record.id.starts_with('c')
            }
            Section::Series => {
                record.content_type.as_deref() == Some(SERIES_TYPE) || record.id.starts_with('s')
            }
            Section::Books => record
                .quality
                .as_deref()
                .is_some_and(|q| q.to_lowercase().contains("pdf")),
            Section::Games => true,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Section {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| CatalogError::Parse(format!("unknown section: {}", s)))
    }
}

/// Derive a section from the full catalog when no dedicated file exists.
///
/// The catalog has no games, so every fourth record stands in for one.
pub fn section_items(catalog: &[ContentRecord], section: Section) -> Vec<ContentRecord> {
    match section {
        Section::Games => catalog
            .iter()
            .step_by(4)
            .take(DERIVED_GAMES_LIMIT)
            .cloned()
            .collect(),
        _ => catalog
            .iter()
            .filter(|record| section.derived_match(record))
            .cloned()
            .collect(),
    }
}
