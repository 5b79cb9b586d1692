//! Bulk import of news items from loosely-typed JSON.
//!
//! Candidates come from an external automation and are trusted for shape
//! only as far as [`import_news`] checks: anything without a usable title
//! is skipped, duplicates of an existing `(title, date)` pair are skipped,
//! and every other field falls back to a default.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::model::{format_date, generate_suffixed_id, NewsCategory, NewsItem, Severity};
use crate::store::Store;

/// Id prefix of imported news.
pub const IMPORT_ID_PREFIX: &str = "imp";

/// Source recorded when a candidate names none.
pub const DEFAULT_SOURCE: &str = "external";

/// Parse payload text into a batch of candidates.
///
/// A JSON array is the batch; a single object becomes a one-element batch.
///
/// # Errors
///
/// Returns [`Error::ImportPayload`] for unparsable text or any other JSON
/// value.
pub fn parse_payload(text: &str) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_str(text.trim())
        .map_err(|e| Error::import_payload(format!("JSON 형식 오류: {e}")))?;
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(_) => Ok(vec![value]),
        other => Err(Error::import_payload(format!(
            "배열 형식이어야 합니다 (got {})",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A scalar field as text. Strings are trimmed; numbers are formatted;
/// anything else counts as absent.
fn scalar(candidate: &Value, field: &str) -> Option<String> {
    match candidate.get(field)? {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Like [`scalar`] but keeps strings as given, so the `(title, date)` pair
/// is compared exactly. Blank strings still count as absent.
fn exact_scalar(candidate: &Value, field: &str) -> Option<String> {
    match candidate.get(field)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn tags(candidate: &Value) -> Vec<String> {
    match candidate.get("tags") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .filter(|t| !t.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

/// Build a news item from one candidate, or `None` when it has no title.
fn candidate_to_news(candidate: &Value, today: &str) -> Option<NewsItem> {
    let title = exact_scalar(candidate, "title")?;
    Some(NewsItem {
        id: generate_suffixed_id(IMPORT_ID_PREFIX),
        title,
        summary: scalar(candidate, "summary").unwrap_or_default(),
        category: scalar(candidate, "category")
            .map_or(NewsCategory::Other, NewsCategory::from),
        severity: scalar(candidate, "severity").map_or(Severity::Info, Severity::from),
        source: scalar(candidate, "source").unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
        url: scalar(candidate, "url").unwrap_or_default(),
        date: exact_scalar(candidate, "date").unwrap_or_else(|| today.to_string()),
        tags: tags(candidate),
    })
}

/// Add the candidates in `batch` to the news collection.
///
/// Each accepted item is prepended, so the last candidate of the batch ends
/// up first. Returns the number of items actually added.
pub fn import_news(store: &mut Store, batch: &[Value], today: NaiveDate) -> usize {
    let today = format_date(today);
    let mut seen: HashSet<String> = store.news().iter().map(NewsItem::dedupe_key).collect();

    let mut added = 0;
    for candidate in batch {
        let Some(item) = candidate_to_news(candidate, &today) else {
            debug!("Skipping import candidate without a title");
            continue;
        };
        if !seen.insert(item.dedupe_key()) {
            debug!(title = %item.title, date = %item.date, "Skipping duplicate news item");
            continue;
        }
        store.upsert(item);
        added += 1;
    }

    info!(candidates = batch.len(), added, "Imported news batch");
    added
}
