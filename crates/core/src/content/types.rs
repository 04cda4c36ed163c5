//! Types for catalog content.

use serde::{Deserialize, Serialize};

use super::lenient;

/// Opaque identifier of one content item.
pub type ContentId = String;

/// `type` marker carried by series records.
pub const SERIES_TYPE: &str = "series";

/// One item of the content catalog.
///
/// Every field is optional in the source JSON. Values of the wrong type are
/// read as absent instead of rejecting the whole record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    pub id: ContentId,
    #[serde(default, deserialize_with = "lenient::text_or_empty")]
    pub title: String,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub genre: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::year",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<i32>,
    /// Resolution or format tag, e.g. "4K", "HD", "PDF".
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub quality: Option<String>,
    /// Parsed rating. Strings contribute their leading number (`"8.5/10"` is 8.5).
    #[serde(
        default,
        deserialize_with = "lenient::rating",
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<f64>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub content_type: Option<String>,
    /// Seed for deterministic placeholder art.
    #[serde(
        rename = "imageSeed",
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_seed: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    /// Episode count for series.
    #[serde(
        default,
        deserialize_with = "lenient::count",
        skip_serializing_if = "Option::is_none"
    )]
    pub episodes: Option<u32>,
}

impl ContentRecord {
    pub fn is_series(&self) -> bool {
        self.content_type.as_deref() == Some(SERIES_TYPE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "id": "c1",
            "title": "Desert Storm",
            "genre": "action",
            "year": 2021,
            "quality": "4K",
            "rating": "8.5",
            "imageSeed": "desert",
            "description": "Sand everywhere."
        }"#;
        let record: ContentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "c1");
        assert_eq!(record.title, "Desert Storm");
        assert_eq!(record.genre.as_deref(), Some("action"));
        assert_eq!(record.year, Some(2021));
        assert_eq!(record.quality.as_deref(), Some("4K"));
        assert_eq!(record.rating, Some(8.5));
        assert_eq!(record.image_seed.as_deref(), Some("desert"));
        assert!(record.content_type.is_none());
        assert!(!record.is_series());
    }

    #[test]
    fn test_deserialize_missing_fields() {
        let record: ContentRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record, ContentRecord::default());
    }

    #[test]
    fn test_deserialize_wrong_types_degrade() {
        let json = r#"{
            "id": 42,
            "title": null,
            "genre": ["drama"],
            "year": "unknown",
            "rating": "N/A",
            "type": "series",
            "episodes": -3
        }"#;
        let record: ContentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "42");
        assert_eq!(record.title, "");
        assert!(record.genre.is_none());
        assert!(record.year.is_none());
        assert!(record.rating.is_none());
        assert!(record.episodes.is_none());
        assert!(record.is_series());
    }

    #[test]
    fn test_numeric_strings_are_parsed() {
        let json = r#"{"year": " 2019 ", "rating": 7, "episodes": 12}"#;
        let record: ContentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.year, Some(2019));
        assert_eq!(record.rating, Some(7.0));
        assert_eq!(record.episodes, Some(12));
    }

    #[test]
    fn test_serialize_uses_catalog_field_names() {
        let record = ContentRecord {
            id: "s1".to_string(),
            title: "Night Shift".to_string(),
            content_type: Some("series".to_string()),
            image_seed: Some("night".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "series");
        assert_eq!(json["imageSeed"], "night");
        assert!(json.get("genre").is_none());
    }
}
