//! Pure catalog queries.
//!
//! Every function borrows its input and returns a new list; nothing here
//! mutates the catalog or fails.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::types::{FilterCriteria, Page, SortKey, DEFAULT_SEARCH_LIMIT};
use crate::content::ContentRecord;

/// Records matching every criterion, in catalog order.
pub fn filter(catalog: &[ContentRecord], criteria: &FilterCriteria) -> Vec<ContentRecord> {
    catalog
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}

/// A sorted copy of `records`. Ties keep their input order.
pub fn sort(records: &[ContentRecord], key: SortKey) -> Vec<ContentRecord> {
    let mut sorted = records.to_vec();
    match key {
        SortKey::Popular => {}
        SortKey::Newest => sorted.sort_by(|a, b| b.year.cmp(&a.year)),
        SortKey::Rating => sorted.sort_by(|a, b| rating_key(b).total_cmp(&rating_key(a))),
        SortKey::Title => sorted.sort_by(|a, b| compare_titles(&a.title, &b.title)),
    }
    sorted
}

/// Quick search with the default result cap.
pub fn search(catalog: &[ContentRecord], query: &str) -> Vec<ContentRecord> {
    search_with_limit(catalog, query, DEFAULT_SEARCH_LIMIT)
}

/// Records whose title, genre or type contains `query`, ignoring case.
///
/// A blank query means "no search active" and returns nothing.
pub fn search_with_limit(
    catalog: &[ContentRecord],
    query: &str,
    limit: usize,
) -> Vec<ContentRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    catalog
        .iter()
        .filter(|record| matches_query(record, &needle))
        .take(limit)
        .cloned()
        .collect()
}

/// The first `page_size * pages_shown` records.
pub fn paginate(records: &[ContentRecord], page_size: usize, pages_shown: usize) -> Page {
    let shown = page_size.saturating_mul(pages_shown).min(records.len());
    Page {
        items: records[..shown].to_vec(),
        has_more: records.len() > shown,
        total: records.len(),
    }
}

pub fn find_by_id<'a>(catalog: &'a [ContentRecord], id: &str) -> Option<&'a ContentRecord> {
    catalog.iter().find(|record| record.id == id)
}

/// "More like this" strip: the head of the catalog with the current item left out.
pub fn similar(catalog: &[ContentRecord], id: &str, limit: usize) -> Vec<ContentRecord> {
    catalog
        .iter()
        .take(limit)
        .filter(|record| record.id != id)
        .cloned()
        .collect()
}

fn matches_query(record: &ContentRecord, needle: &str) -> bool {
    let contains = |value: &str| value.to_lowercase().contains(needle);
    contains(&record.title)
        || record.genre.as_deref().is_some_and(contains)
        || record.content_type.as_deref().is_some_and(contains)
}

fn rating_key(record: &ContentRecord) -> f64 {
    record
        .rating
        .filter(|r| !r.is_nan())
        .unwrap_or(f64::NEG_INFINITY)
}

/// Title order approximating Arabic-locale collation.
///
/// The primary key is the lowercased title with accents and harakat removed
/// (canonical decomposition, combining marks dropped, tatweel dropped),
/// compared with Arabic letters ahead of other scripts. Titles equal under
/// that key fall back to their composed lowercase form.
fn compare_titles(a: &str, b: &str) -> Ordering {
    let primary = collation_key(a)
        .into_iter()
        .map(char_weight)
        .cmp(collation_key(b).into_iter().map(char_weight));
    primary.then_with(|| composed_lower(a).cmp(&composed_lower(b)))
}

const TATWEEL: char = '\u{0640}';

fn collation_key(title: &str) -> Vec<char> {
    title
        .trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c) && *c != TATWEEL)
        .flat_map(char::to_lowercase)
        .collect()
}

fn composed_lower(title: &str) -> String {
    title.trim().nfc().flat_map(char::to_lowercase).collect()
}

/// Punctuation and symbols, then digits, then Arabic, then other letters.
fn char_weight(c: char) -> (u8, char) {
    let class = if c.is_numeric() {
        1
    } else if !c.is_alphabetic() {
        0
    } else if is_arabic(c) {
        2
    } else {
        3
    };
    (class, c)
}

fn is_arabic(c: char) -> bool {
    matches!(
        c,
        '\u{0600}'..='\u{06FF}'
            | '\u{0750}'..='\u{077F}'
            | '\u{08A0}'..='\u{08FF}'
            | '\u{FB50}'..='\u{FDFF}'
            | '\u{FE70}'..='\u{FEFF}'
    )
}
