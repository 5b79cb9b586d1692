//! Core record types for seclearn.
//!
//! This module defines the four record kinds (news, glossary, notes,
//! resources), the [`Collection`] enumeration used to dispatch between them,
//! and small helpers shared by forms, import and rendering.

mod category;
mod records;

use std::str::FromStr;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use category::{Difficulty, GlossaryCategory, NewsCategory, ResourceCategory, Severity};
pub use records::{GlossaryEntry, NewsItem, Note, Resource};

use crate::error::Error;

/// One of the four top-level record sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// News clippings.
    #[default]
    News,
    /// Glossary terms.
    Glossary,
    /// Study notes.
    Notes,
    /// Curated links.
    Resources,
}

impl Collection {
    /// All collections, in navigation order.
    pub const ALL: [Collection; 4] = [
        Collection::News,
        Collection::Glossary,
        Collection::Notes,
        Collection::Resources,
    ];

    /// The collection name, also used as its storage key suffix.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Glossary => "glossary",
            Self::Notes => "notes",
            Self::Resources => "resources",
        }
    }

    /// Navigation label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::News => "뉴스 스크랩",
            Self::Glossary => "용어사전",
            Self::Notes => "학습 노트",
            Self::Resources => "참고 자료",
        }
    }

    /// Prefix of ids generated for records created through forms.
    #[must_use]
    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::News => "n",
            Self::Glossary => "g",
            Self::Notes => "note",
            Self::Resources => "r",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "news" => Ok(Self::News),
            "glossary" => Ok(Self::Glossary),
            "notes" | "note" => Ok(Self::Notes),
            "resources" | "resource" => Ok(Self::Resources),
            other => Err(Error::UnknownCollection(other.to_string())),
        }
    }
}

/// Behaviour shared by the four record kinds.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// The collection records of this kind live in.
    const COLLECTION: Collection;

    /// The record id.
    fn id(&self) -> &str;

    /// Replace the record id.
    fn set_id(&mut self, id: String);

    /// Tags that feed the sidebar tag cloud.
    fn tags(&self) -> &[String] {
        &[]
    }
}

/// Last millisecond handed out by [`generate_id`].
static LAST_ID_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Generate a record id: `prefix` followed by the current Unix time in
/// milliseconds.
///
/// Within one process the timestamp part is strictly increasing, so two
/// records created in the same millisecond still get distinct ids.
#[must_use]
pub fn generate_id(prefix: &str) -> String {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_ID_MILLIS.load(Ordering::Relaxed);
    let stamp = loop {
        let next = now.max(last + 1);
        match LAST_ID_MILLIS.compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed)
        {
            Ok(_) => break next,
            Err(current) => last = current,
        }
    };
    format!("{prefix}{stamp}")
}

/// Generate a record id with a three-character random base-36 suffix.
#[must_use]
pub fn generate_suffixed_id(prefix: &str) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut token = rand::random::<u32>();
    let mut suffix = String::with_capacity(3);
    for _ in 0..3 {
        suffix.push(char::from(DIGITS[(token % 36) as usize]));
        token /= 36;
    }
    format!("{}{suffix}", generate_id(prefix))
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
#[must_use]
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Today's date in UTC.
#[must_use]
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Format a date the way records store it, `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Interpret a stored date string as a calendar date.
///
/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps. Returns `None` for empty
/// or unparsable input.
#[must_use]
pub fn calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_round_trip_names() {
        for collection in Collection::ALL {
            assert_eq!(collection.as_str().parse::<Collection>().unwrap(), collection);
        }
    }

    #[test]
    fn test_collection_singular_aliases() {
        assert_eq!("note".parse::<Collection>().unwrap(), Collection::Notes);
        assert_eq!(
            "resource".parse::<Collection>().unwrap(),
            Collection::Resources
        );
    }

    #[test]
    fn test_collection_unknown() {
        let err = "bookmarks".parse::<Collection>().unwrap_err();
        assert!(err.to_string().contains("bookmarks"));
    }

    #[test]
    fn test_generate_id_prefix_and_uniqueness() {
        let a = generate_id("n");
        let b = generate_id("n");
        assert!(a.starts_with('n'));
        assert!(a[1..].chars().all(|c| c.is_ascii_digit()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_generate_suffixed_id_shape() {
        let id = generate_suffixed_id("imp");
        assert!(id.starts_with("imp"));
        let suffix = &id[id.len() - 3..];
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(
            parse_tags(" CVE, 랜섬웨어 ,, Log4j ,"),
            vec!["CVE", "랜섬웨어", "Log4j"]
        );
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ,").is_empty());
    }

    #[test]
    fn test_today_format() {
        let today = format_date(today());
        assert_eq!(today.len(), 10);
        assert!(calendar_date(&today).is_some());
        assert_eq!(
            format_date(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()),
            "2025-01-02"
        );
    }

    #[test]
    fn test_calendar_date() {
        assert_eq!(
            calendar_date("2025-01-31"),
            NaiveDate::from_ymd_opt(2025, 1, 31)
        );
        assert_eq!(
            calendar_date("2025-01-31T23:00:00Z"),
            NaiveDate::from_ymd_opt(2025, 1, 31)
        );
        assert!(calendar_date("").is_none());
        assert!(calendar_date("yesterday").is_none());
        assert!(calendar_date("2025-02-30").is_none());
    }
}
