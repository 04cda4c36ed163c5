//! Decoding of persisted collections.
//!
//! Anything that does not parse as the expected shape reads as an empty
//! collection. Duplicates and empty ids are dropped, first occurrence wins.

use std::collections::HashSet;

use tracing::warn;

use super::types::{Collection, ProgressRecord};
use crate::content::ContentId;

pub(super) fn decode_ids(collection: Collection, raw: Option<&str>) -> Vec<ContentId> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<ContentId>>(raw) {
        Ok(ids) => dedup_ids(ids),
        Err(e) => {
            warn!("Discarding corrupt {} collection: {}", collection, e);
            Vec::new()
        }
    }
}

pub(super) fn decode_history(raw: Option<&str>) -> Vec<ProgressRecord> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<ProgressRecord>>(raw) {
        Ok(records) => dedup_history(records),
        Err(e) => {
            warn!("Discarding corrupt {} collection: {}", Collection::History, e);
            Vec::new()
        }
    }
}

pub(super) fn dedup_ids(ids: Vec<ContentId>) -> Vec<ContentId> {
    let mut seen = HashSet::new();
    ids.into_iter()
        .filter(|id| !id.is_empty() && seen.insert(id.clone()))
        .collect()
}

pub(super) fn dedup_history(records: Vec<ProgressRecord>) -> Vec<ProgressRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| !r.id.is_empty() && seen.insert(r.id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_missing_is_empty() {
        assert!(decode_ids(Collection::Favorites, None).is_empty());
        assert!(decode_history(None).is_empty());
    }

    #[test]
    fn test_decode_corrupt_is_empty() {
        assert!(decode_ids(Collection::Favorites, Some("{not json")).is_empty());
        assert!(decode_ids(Collection::Watchlist, Some("null")).is_empty());
        assert!(decode_ids(Collection::Watchlist, Some("[1, 2]")).is_empty());
        assert!(decode_history(Some(r#"[{"id":"m1"}]"#)).is_empty());
        assert!(decode_history(Some(r#"[{"id":"m1","position":-4,"updated":0}]"#)).is_empty());
    }

    #[test]
    fn test_decode_drops_duplicates_and_empty_ids() {
        let ids = decode_ids(Collection::Favorites, Some(r#"["b","a","b","","a","c"]"#));
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_decode_history_keeps_first_record_per_id() {
        let raw = r#"[
            {"id":"m1","position":10,"updated":1},
            {"id":"m2","position":20,"updated":2},
            {"id":"m1","position":30,"updated":3}
        ]"#;
        let records = decode_history(Some(raw));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].position, 10);
        assert_eq!(records[1].id, "m2");
    }
}
