//! Loading the catalog from JSON files.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, info, warn};

use super::sections::{section_items, Section};
use super::types::CatalogError;
use crate::content::ContentRecord;

/// Parse a catalog document: a JSON array of records.
///
/// Array entries that are not objects are skipped.
pub fn parse_catalog(json: &str) -> Result<Vec<ContentRecord>, CatalogError> {
    let values: Vec<Value> =
        serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;

    let total = values.len();
    let records: Vec<ContentRecord> = values
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect();

    if records.len() < total {
        debug!("Skipped {} malformed catalog entries", total - records.len());
    }
    Ok(records)
}

/// Read and parse a catalog file.
pub async fn read_catalog(path: &Path) -> Result<Vec<ContentRecord>, CatalogError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CatalogError::Io(format!("{}: {}", path.display(), e)))?;
    let records = parse_catalog(&raw)?;
    info!("Loaded {} catalog records from {:?}", records.len(), path);
    Ok(records)
}

/// Read a catalog file, falling back to an empty catalog on any failure.
pub async fn load_catalog(path: &Path) -> Vec<ContentRecord> {
    match read_catalog(path).await {
        Ok(records) => records,
        Err(e) => {
            warn!("Catalog unavailable, continuing with none: {}", e);
            Vec::new()
        }
    }
}

/// Records of one section.
///
/// Prefers the dedicated `<section>.json` next to `catalog_path`, otherwise
/// derives the section from the full catalog.
pub async fn load_section(catalog_path: &Path, section: Section) -> Vec<ContentRecord> {
    let dedicated = catalog_path.with_file_name(section.file_name());
    match read_catalog(&dedicated).await {
        Ok(records) => records,
        Err(e) => {
            debug!("No dedicated {} catalog ({}), deriving it", section, e);
            section_items(&load_catalog(catalog_path).await, section)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"[
        {"id": "c1", "title": "Desert Storm", "genre": "action", "year": 2021, "quality": "4K", "rating": "8.1", "imageSeed": "desert"},
        {"id": "s1", "title": "Night Shift", "genre": "drama", "year": 2018, "quality": "HD", "rating": 7.2, "type": "series"},
        "garbage",
        42,
        {"id": "b1", "title": "Field Notes", "quality": "PDF"}
    ]"#;

    #[test]
    fn test_parse_catalog_skips_non_objects() {
        let records = parse_catalog(SAMPLE).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].rating, Some(8.1));
        assert!(records[1].is_series());
        assert!(records[2].year.is_none());
    }

    #[test]
    fn test_parse_catalog_rejects_non_array() {
        assert!(matches!(
            parse_catalog(r#"{"id": "c1"}"#),
            Err(CatalogError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_read_catalog_missing_file() {
        let result = read_catalog(Path::new("/nonexistent/catalog.json")).await;
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }

    #[tokio::test]
    async fn test_load_catalog_degrades_to_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sample_contents.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(load_catalog(&path).await.is_empty());
        assert!(load_catalog(&dir.path().join("missing.json")).await.is_empty());
    }

    #[tokio::test]
    async fn test_load_section_prefers_dedicated_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sample_contents.json");
        std::fs::write(&path, SAMPLE).unwrap();
        std::fs::write(
            dir.path().join("series.json"),
            r#"[{"id": "s9", "title": "Dedicated", "type": "series"}]"#,
        )
        .unwrap();

        let series = load_section(&path, Section::Series).await;
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].id, "s9");

        let books = load_section(&path, Section::Books).await;
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].id, "b1");
    }
}
