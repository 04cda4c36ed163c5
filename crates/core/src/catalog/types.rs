//! Types for catalog queries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content::ContentRecord;

/// Filter value meaning "do not filter on this dimension".
pub const FILTER_ALL: &str = "all";

/// Year filter value matching everything released before [`OLDER_BEFORE_YEAR`].
pub const FILTER_OLDER: &str = "older";

/// Release year threshold of the "older" filter (exclusive).
pub const OLDER_BEFORE_YEAR: i32 = 2020;

/// Default cap on quick-search results.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;

/// Exact-match filter on a text attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldFilter {
    #[default]
    All,
    Exactly(String),
}

impl FieldFilter {
    pub fn parse(value: &str) -> Self {
        if value == FILTER_ALL {
            FieldFilter::All
        } else {
            FieldFilter::Exactly(value.to_string())
        }
    }

    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            FieldFilter::All => true,
            FieldFilter::Exactly(expected) => value == Some(expected.as_str()),
        }
    }
}

impl From<String> for FieldFilter {
    fn from(value: String) -> Self {
        if value == FILTER_ALL {
            FieldFilter::All
        } else {
            FieldFilter::Exactly(value)
        }
    }
}

impl From<FieldFilter> for String {
    fn from(filter: FieldFilter) -> Self {
        match filter {
            FieldFilter::All => FILTER_ALL.to_string(),
            FieldFilter::Exactly(value) => value,
        }
    }
}

/// Release year filter.
///
/// Records without a readable year only pass [`YearFilter::All`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum YearFilter {
    #[default]
    All,
    /// Released before [`OLDER_BEFORE_YEAR`].
    Older,
    Exact(i32),
}

impl YearFilter {
    /// Parse a filter value. Values that are neither a sentinel nor a year
    /// do not filter at all.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            FILTER_ALL => YearFilter::All,
            FILTER_OLDER => YearFilter::Older,
            other => other.parse().map(YearFilter::Exact).unwrap_or_default(),
        }
    }

    pub fn matches(&self, year: Option<i32>) -> bool {
        match self {
            YearFilter::All => true,
            YearFilter::Older => year.is_some_and(|y| y < OLDER_BEFORE_YEAR),
            YearFilter::Exact(expected) => year == Some(*expected),
        }
    }
}

impl From<String> for YearFilter {
    fn from(value: String) -> Self {
        YearFilter::parse(&value)
    }
}

impl From<YearFilter> for String {
    fn from(filter: YearFilter) -> Self {
        match filter {
            YearFilter::All => FILTER_ALL.to_string(),
            YearFilter::Older => FILTER_OLDER.to_string(),
            YearFilter::Exact(year) => year.to_string(),
        }
    }
}

/// Genre, year and quality filter applied together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub genre: FieldFilter,
    #[serde(default)]
    pub year: YearFilter,
    #[serde(default)]
    pub quality: FieldFilter,
}

impl FilterCriteria {
    /// Build criteria from raw select-box values (`"all"`, `"older"`, ...).
    pub fn new(genre: &str, year: &str, quality: &str) -> Self {
        Self {
            genre: FieldFilter::parse(genre),
            year: YearFilter::parse(year),
            quality: FieldFilter::parse(quality),
        }
    }

    pub fn matches(&self, record: &ContentRecord) -> bool {
        self.genre.matches(record.genre.as_deref())
            && self.year.matches(record.year)
            && self.quality.matches(record.quality.as_deref())
    }
}

/// Display order of browse results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Catalog order.
    #[default]
    Popular,
    /// Year, most recent first.
    Newest,
    /// Rating, highest first.
    Rating,
    /// Title, alphabetical.
    Title,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Popular => "popular",
            SortKey::Newest => "newest",
            SortKey::Rating => "rating",
            SortKey::Title => "title",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popular" => Ok(SortKey::Popular),
            "newest" => Ok(SortKey::Newest),
            "rating" => Ok(SortKey::Rating),
            "title" => Ok(SortKey::Title),
            other => Err(CatalogError::InvalidSortKey(other.to_string())),
        }
    }
}

/// A visible prefix of a result list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub items: Vec<ContentRecord>,
    /// More records exist past `items`.
    pub has_more: bool,
    /// Length of the full result list.
    pub total: usize,
}

/// Errors for catalog loading and parameter parsing.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(String),

    #[error("Failed to parse catalog: {0}")]
    Parse(String),

    #[error("Unknown sort key: {0}")]
    InvalidSortKey(String),
}
