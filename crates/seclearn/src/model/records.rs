//! The four record kinds.
//!
//! Every struct is `#[serde(default)]` so that blobs written by older
//! versions, or by hand, load with missing fields defaulted.

use serde::{Deserialize, Serialize};

use super::category::{Difficulty, GlossaryCategory, NewsCategory, ResourceCategory, Severity};
use super::{Collection, Record};

/// A clipped security news item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsItem {
    /// Unique identifier within the news collection.
    pub id: String,
    /// Headline. Required.
    pub title: String,
    /// Summary or body text.
    pub summary: String,
    /// Topic.
    pub category: NewsCategory,
    /// Severity.
    pub severity: Severity,
    /// Where the item came from.
    pub source: String,
    /// Link to the original article.
    pub url: String,
    /// Publication date, `YYYY-MM-DD`.
    pub date: String,
    /// Free-form tags.
    pub tags: Vec<String>,
}

impl NewsItem {
    /// Key used to deduplicate imports: BLAKE3 over `(title, date)`.
    #[must_use]
    pub fn dedupe_key(&self) -> String {
        Self::compute_dedupe_key(&self.title, &self.date)
    }

    /// Compute the deduplication key for a `(title, date)` pair.
    #[must_use]
    pub fn compute_dedupe_key(title: &str, date: &str) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(title.as_bytes());
        hasher.update(&[0]);
        hasher.update(date.as_bytes());
        hasher.finalize().to_hex().to_string()
    }
}

impl Record for NewsItem {
    const COLLECTION: Collection = Collection::News;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// A glossary term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlossaryEntry {
    /// Unique identifier within the glossary.
    pub id: String,
    /// The term, usually Korean. Required.
    pub term: String,
    /// English name.
    pub eng: String,
    /// Topic.
    pub category: GlossaryCategory,
    /// Difficulty level.
    pub difficulty: Difficulty,
    /// Definition. Required.
    pub definition: String,
    /// Example or code snippet.
    pub example: String,
    /// Related terms.
    pub related: Vec<String>,
}

impl Record for GlossaryEntry {
    const COLLECTION: Collection = Collection::Glossary;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

/// A free-text study note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Note {
    /// Unique identifier within the notes collection.
    pub id: String,
    /// Title. Required.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Creation date, `YYYY-MM-DD`.
    pub date: String,
    /// Date of the last write, `YYYY-MM-DD`.
    pub updated: String,
}

impl Note {
    /// The date notes are ordered and labelled by: `updated`, else `date`.
    #[must_use]
    pub fn last_touched(&self) -> &str {
        if self.updated.is_empty() {
            &self.date
        } else {
            &self.updated
        }
    }
}

impl Record for Note {
    const COLLECTION: Collection = Collection::Notes;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// A curated link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resource {
    /// Unique identifier within the resources collection.
    pub id: String,
    /// Title. Required.
    pub title: String,
    /// Kind of resource.
    pub category: ResourceCategory,
    /// Link.
    pub url: String,
    /// Why it is worth reading.
    pub description: String,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Date added, `YYYY-MM-DD`.
    pub date: String,
}

impl Record for Resource {
    const COLLECTION: Collection = Collection::Resources;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_news_missing_fields_default() {
        let item: NewsItem = serde_json::from_str(r#"{"id":"n1","title":"Log4Shell"}"#).unwrap();
        assert_eq!(item.title, "Log4Shell");
        assert_eq!(item.category, NewsCategory::Other);
        assert_eq!(item.severity, Severity::Info);
        assert!(item.tags.is_empty());
        assert!(item.date.is_empty());
    }

    #[test]
    fn test_news_unknown_enum_values_round_trip() {
        let json = r#"{"id":"n1","title":"t","category":"ransomware","severity":"urgent"}"#;
        let item: NewsItem = serde_json::from_str(json).unwrap();
        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back["category"], "ransomware");
        assert_eq!(back["severity"], "urgent");
    }

    #[test]
    fn test_dedupe_key_depends_on_title_and_date() {
        let a = NewsItem::compute_dedupe_key("X", "2025-01-01");
        let b = NewsItem::compute_dedupe_key("X", "2025-01-01");
        let c = NewsItem::compute_dedupe_key("X", "2025-01-02");
        let d = NewsItem::compute_dedupe_key("x", "2025-01-01");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_dedupe_key_separates_fields() {
        let a = NewsItem::compute_dedupe_key("ab", "c");
        let b = NewsItem::compute_dedupe_key("a", "bc");
        assert_ne!(a, b);
    }

    #[test]
    fn test_note_last_touched() {
        let mut note = Note {
            date: "2025-01-01".to_string(),
            ..Note::default()
        };
        assert_eq!(note.last_touched(), "2025-01-01");
        note.updated = "2025-02-01".to_string();
        assert_eq!(note.last_touched(), "2025-02-01");
    }

    #[test]
    fn test_glossary_has_no_tags() {
        let entry = GlossaryEntry {
            related: vec!["XSS".to_string()],
            ..GlossaryEntry::default()
        };
        assert!(entry.tags().is_empty());
    }

    #[test]
    fn test_resource_serialization_field_names() {
        let resource = Resource {
            id: "r1".to_string(),
            title: "OWASP".to_string(),
            description: "top ten".to_string(),
            ..Resource::default()
        };
        let value = serde_json::to_value(&resource).unwrap();
        assert_eq!(value["description"], "top ten");
        assert_eq!(value["category"], "docs");
    }
}
