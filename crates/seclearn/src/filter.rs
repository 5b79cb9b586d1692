//! Filter and query engine.
//!
//! Pure functions mapping a collection and its filter state to the ordered
//! subset that should be displayed. Nothing here touches storage or markup.
//!
//! Matching rules:
//!
//! - **News**: category, then a case-sensitive substring of title, summary
//!   or source. Newest date first.
//! - **Glossary**: category, alphabet bucket, then a case-insensitive
//!   substring of term or English name, or a case-sensitive substring of the
//!   definition. Sorted by term.
//! - **Notes**: case-sensitive substring of title, content or any tag.
//!   Most recently updated first.
//! - **Resources**: category, then a substring of title, description or any
//!   tag. Stored order.

use std::cmp::{Ordering, Reverse};

use serde::{Deserialize, Serialize};

use crate::model::{calendar_date, GlossaryEntry, NewsItem, Note, Resource};

/// Number of code points after a Hangul bucket's base syllable that still
/// belong to the bucket.
pub const HANGUL_BUCKET_SPAN: u32 = 587;

/// Base syllables of the Hangul buckets, one per plain lead consonant.
pub const HANGUL_BUCKETS: [char; 14] = [
    '가', '나', '다', '라', '마', '바', '사', '아', '자', '차', '카', '타', '파', '하',
];

/// Category selector shared by news, glossary and resources.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryFilter {
    /// Match every category.
    #[default]
    All,
    /// Match records whose stored category equals this value exactly.
    Only(String),
}

impl CategoryFilter {
    /// Parse a selector value; `"all"` and the empty string select everything.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" | "all" => Self::All,
            value => Self::Only(value.to_string()),
        }
    }

    /// Whether a stored category passes this selector.
    #[must_use]
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }

    /// The selector value, `"all"` for [`CategoryFilter::All`].
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Only(value) => value,
        }
    }
}

/// Alphabet bucket used to narrow the glossary.
///
/// Hangul buckets cover the 588 code points starting at their base syllable,
/// which is exactly the block of syllables with that plain lead consonant.
/// Syllables with tense lead consonants (ㄲ ㄸ ㅃ ㅆ ㅉ) and bare jamo fall
/// into no bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Bucket {
    /// No bucket restriction.
    #[default]
    All,
    /// Terms whose uppercased first character is this letter.
    Latin(char),
    /// Terms whose first character falls in this syllable block.
    Hangul(char),
}

impl Bucket {
    /// Parse a bucket selector: `"all"`, a Latin letter, or a Hangul base.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() || raw == "all" || raw == "전체" {
            return Some(Self::All);
        }
        let mut chars = raw.chars();
        let first = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        if first.is_ascii_alphabetic() {
            Some(Self::Latin(first.to_ascii_uppercase()))
        } else if HANGUL_BUCKETS.contains(&first) {
            Some(Self::Hangul(first))
        } else {
            None
        }
    }

    /// Every selectable bucket, in display order.
    #[must_use]
    pub fn choices() -> Vec<Self> {
        std::iter::once(Self::All)
            .chain(('A'..='Z').map(Self::Latin))
            .chain(HANGUL_BUCKETS.iter().copied().map(Self::Hangul))
            .collect()
    }

    /// Button label.
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::All => "전체".to_string(),
            Self::Latin(c) | Self::Hangul(c) => c.to_string(),
        }
    }

    /// Selector value, `"all"` for [`Bucket::All`].
    #[must_use]
    pub fn value(self) -> String {
        match self {
            Self::All => "all".to_string(),
            Self::Latin(c) | Self::Hangul(c) => c.to_string(),
        }
    }

    /// Whether a glossary term belongs to this bucket.
    #[must_use]
    pub fn matches(self, term: &str) -> bool {
        let first = term.chars().next();
        match (self, first) {
            (Self::All, _) => true,
            (_, None) => false,
            (Self::Latin(letter), Some(first)) => first.to_uppercase().eq(std::iter::once(letter)),
            (Self::Hangul(base), Some(first)) => {
                let start = u32::from(base);
                let code = u32::from(first);
                code >= start && code <= start + HANGUL_BUCKET_SPAN
            }
        }
    }
}

/// Filter state of the news section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsFilter {
    /// Search text.
    pub query: String,
    /// Category selector.
    pub category: CategoryFilter,
}

impl NewsFilter {
    /// Whether an item passes every active predicate.
    #[must_use]
    pub fn matches(&self, item: &NewsItem) -> bool {
        let q = self.query.as_str();
        self.category.matches(item.category.as_str())
            && (q.is_empty()
                || item.title.contains(q)
                || item.summary.contains(q)
                || item.source.contains(q))
    }
}

/// Filter state of the glossary section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlossaryFilter {
    /// Search text.
    pub query: String,
    /// Category selector.
    pub category: CategoryFilter,
    /// Alphabet bucket.
    pub bucket: Bucket,
}

impl GlossaryFilter {
    /// Whether an entry passes every active predicate.
    #[must_use]
    pub fn matches(&self, entry: &GlossaryEntry) -> bool {
        if !self.category.matches(entry.category.as_str()) || !self.bucket.matches(&entry.term) {
            return false;
        }
        if self.query.is_empty() {
            return true;
        }
        let lowered = self.query.to_lowercase();
        entry.term.to_lowercase().contains(&lowered)
            || entry.eng.to_lowercase().contains(&lowered)
            || entry.definition.contains(&self.query)
    }
}

/// Filter state of the notes section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotesFilter {
    /// Search text.
    pub query: String,
}

impl NotesFilter {
    /// Whether a note passes the search.
    #[must_use]
    pub fn matches(&self, note: &Note) -> bool {
        let q = self.query.as_str();
        q.is_empty()
            || note.title.contains(q)
            || note.content.contains(q)
            || note.tags.iter().any(|t| t.contains(q))
    }
}

/// Filter state of the resources section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourcesFilter {
    /// Search text.
    pub query: String,
    /// Category selector.
    pub category: CategoryFilter,
}

impl ResourcesFilter {
    /// Whether a resource passes every active predicate.
    #[must_use]
    pub fn matches(&self, resource: &Resource) -> bool {
        let q = self.query.as_str();
        self.category.matches(resource.category.as_str())
            && (q.is_empty()
                || resource.title.contains(q)
                || resource.description.contains(q)
                || resource.tags.iter().any(|t| t.contains(q)))
    }
}

/// Transient filter state of all four sections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// News filter.
    pub news: NewsFilter,
    /// Glossary filter.
    pub glossary: GlossaryFilter,
    /// Notes filter.
    pub notes: NotesFilter,
    /// Resources filter.
    pub resources: ResourcesFilter,
}

/// Filtered news, newest first. Undated items go last.
#[must_use]
pub fn filter_news<'a>(items: &'a [NewsItem], filter: &NewsFilter) -> Vec<&'a NewsItem> {
    let mut list: Vec<&NewsItem> = items.iter().filter(|n| filter.matches(n)).collect();
    list.sort_by_cached_key(|n| Reverse(calendar_date(&n.date)));
    list
}

/// Filtered glossary entries, sorted by term.
#[must_use]
pub fn filter_glossary<'a>(
    entries: &'a [GlossaryEntry],
    filter: &GlossaryFilter,
) -> Vec<&'a GlossaryEntry> {
    let mut list: Vec<&GlossaryEntry> = entries.iter().filter(|g| filter.matches(g)).collect();
    list.sort_by(|a, b| locale_cmp(&a.term, &b.term));
    list
}

/// Filtered notes, most recently updated first.
#[must_use]
pub fn filter_notes<'a>(notes: &'a [Note], filter: &NotesFilter) -> Vec<&'a Note> {
    let mut list: Vec<&Note> = notes.iter().filter(|n| filter.matches(n)).collect();
    list.sort_by_cached_key(|n| Reverse(calendar_date(n.last_touched())));
    list
}

/// Filtered resources, in stored order.
#[must_use]
pub fn filter_resources<'a>(
    resources: &'a [Resource],
    filter: &ResourcesFilter,
) -> Vec<&'a Resource> {
    resources.iter().filter(|r| filter.matches(r)).collect()
}

/// Compare two terms for display order.
///
/// Case-folded comparison first, then raw code points as a tie-break.
/// Hangul syllables are encoded in dictionary order, so this sorts Korean
/// terms the way a Korean collation does; Latin terms sort before Hangul.
#[must_use]
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let fold = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();
    fold(a).cmp(&fold(b)).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GlossaryCategory, NewsCategory, ResourceCategory};
    use crate::seed::{default_glossary, default_resources};

    fn news(id: &str, title: &str, date: &str) -> NewsItem {
        NewsItem {
            id: id.to_string(),
            title: title.to_string(),
            date: date.to_string(),
            ..NewsItem::default()
        }
    }

    fn note(id: &str, title: &str, date: &str, updated: &str) -> Note {
        Note {
            id: id.to_string(),
            title: title.to_string(),
            date: date.to_string(),
            updated: updated.to_string(),
            ..Note::default()
        }
    }

    fn terms(list: &[&GlossaryEntry]) -> Vec<String> {
        list.iter().map(|g| g.term.clone()).collect()
    }

    #[test]
    fn test_category_filter_parse() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse("cve"),
            CategoryFilter::Only("cve".to_string())
        );
        assert_eq!(CategoryFilter::parse("cve").as_str(), "cve");
    }

    #[test]
    fn test_bucket_parse() {
        assert_eq!(Bucket::parse("all"), Some(Bucket::All));
        assert_eq!(Bucket::parse("전체"), Some(Bucket::All));
        assert_eq!(Bucket::parse("s"), Some(Bucket::Latin('S')));
        assert_eq!(Bucket::parse("가"), Some(Bucket::Hangul('가')));
        assert_eq!(Bucket::parse("까"), None);
        assert_eq!(Bucket::parse("AB"), None);
    }

    #[test]
    fn test_bucket_choices() {
        let choices = Bucket::choices();
        assert_eq!(choices.len(), 1 + 26 + 14);
        assert_eq!(choices[0], Bucket::All);
        assert_eq!(choices[1], Bucket::Latin('A'));
        assert_eq!(choices.last(), Some(&Bucket::Hangul('하')));
    }

    #[test]
    fn test_latin_bucket_is_case_insensitive() {
        assert!(Bucket::Latin('X').matches("XSS"));
        assert!(Bucket::Latin('X').matches("xss"));
        assert!(!Bucket::Latin('X').matches("SQL"));
        assert!(!Bucket::Latin('A').matches(""));
    }

    #[test]
    fn test_hangul_bucket_window() {
        assert!(Bucket::Hangul('가').matches("공격"));
        assert!(Bucket::Hangul('가').matches("깋"));
        assert!(!Bucket::Hangul('가').matches("까치"));
        assert!(Bucket::Hangul('바').matches("버퍼 오버플로우"));
        assert!(Bucket::Hangul('바').matches("방화벽"));
        assert!(Bucket::Hangul('자').matches("제로데이"));
        assert!(!Bucket::Hangul('자').matches("취약점"));
        assert!(Bucket::Hangul('차').matches("취약점"));
        assert!(!Bucket::Hangul('가').matches("AES"));
    }

    #[test]
    fn test_every_plain_syllable_lands_in_its_bucket() {
        for base in HANGUL_BUCKETS {
            let last = char::from_u32(u32::from(base) + HANGUL_BUCKET_SPAN).unwrap();
            assert!(Bucket::Hangul(base).matches(&last.to_string()));
            let next = char::from_u32(u32::from(base) + HANGUL_BUCKET_SPAN + 1).unwrap();
            assert!(!Bucket::Hangul(base).matches(&next.to_string()));
        }
    }

    #[test]
    fn test_news_category_and_text() {
        let mut a = news("1", "Log4Shell exploited", "2025-01-01");
        a.category = NewsCategory::Cve;
        a.source = "NVD".to_string();
        let mut b = news("2", "Policy update", "2025-01-02");
        b.category = NewsCategory::Policy;
        b.summary = "new rules for Log4Shell".to_string();
        let items = vec![a, b];

        let filter = NewsFilter {
            query: "Log4Shell".to_string(),
            category: CategoryFilter::All,
        };
        assert_eq!(filter_news(&items, &filter).len(), 2);

        let filter = NewsFilter {
            query: "Log4Shell".to_string(),
            category: CategoryFilter::parse("cve"),
        };
        let result = filter_news(&items, &filter);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "1");

        let filter = NewsFilter {
            query: "NVD".to_string(),
            category: CategoryFilter::All,
        };
        assert_eq!(filter_news(&items, &filter).len(), 1);
    }

    #[test]
    fn test_news_search_is_case_sensitive() {
        let items = vec![news("1", "Ransomware", "2025-01-01")];
        let filter = NewsFilter {
            query: "ransomware".to_string(),
            category: CategoryFilter::All,
        };
        assert!(filter_news(&items, &filter).is_empty());
    }

    #[test]
    fn test_news_sorted_newest_first_invalid_last() {
        let items = vec![
            news("old", "a", "2024-01-01"),
            news("bad", "b", "not a date"),
            news("new", "c", "2025-06-01"),
            news("none", "d", ""),
            news("mid", "e", "2024-06-01"),
        ];
        let ids: Vec<&str> = filter_news(&items, &NewsFilter::default())
            .iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(ids, vec!["new", "mid", "old", "bad", "none"]);
    }

    #[test]
    fn test_glossary_attack_category() {
        let glossary = default_glossary();
        let filter = GlossaryFilter {
            category: CategoryFilter::parse("attack"),
            ..GlossaryFilter::default()
        };
        let mut result = terms(&filter_glossary(&glossary, &filter));
        result.sort();
        let mut expected = vec!["SQL 인젝션", "XSS", "CSRF", "버퍼 오버플로우", "중간자 공격", "제로데이"];
        expected.sort_unstable();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_glossary_text_match_rules() {
        let glossary = default_glossary();

        let filter = GlossaryFilter {
            query: "xss".to_string(),
            ..GlossaryFilter::default()
        };
        assert_eq!(terms(&filter_glossary(&glossary, &filter)), vec!["XSS"]);

        let filter = GlossaryFilter {
            query: "firewall".to_string(),
            ..GlossaryFilter::default()
        };
        assert_eq!(terms(&filter_glossary(&glossary, &filter)), vec!["방화벽"]);

        // Definitions match case-sensitively.
        let filter = GlossaryFilter {
            query: "MITRE".to_string(),
            ..GlossaryFilter::default()
        };
        assert_eq!(terms(&filter_glossary(&glossary, &filter)), vec!["CVE"]);
        let filter = GlossaryFilter {
            query: "mitre".to_string(),
            ..GlossaryFilter::default()
        };
        assert!(filter_glossary(&glossary, &filter).is_empty());
    }

    #[test]
    fn test_glossary_bucket_and_category_combine() {
        let glossary = default_glossary();
        let filter = GlossaryFilter {
            category: CategoryFilter::parse("attack"),
            bucket: Bucket::Latin('C'),
            ..GlossaryFilter::default()
        };
        assert_eq!(terms(&filter_glossary(&glossary, &filter)), vec!["CSRF"]);

        let filter = GlossaryFilter {
            bucket: Bucket::Hangul('바'),
            ..GlossaryFilter::default()
        };
        assert_eq!(
            terms(&filter_glossary(&glossary, &filter)),
            vec!["방화벽", "버퍼 오버플로우"]
        );
    }

    #[test]
    fn test_glossary_sorted_by_term() {
        let glossary = default_glossary();
        let result = terms(&filter_glossary(&glossary, &GlossaryFilter::default()));
        assert_eq!(result.first().map(String::as_str), Some("AES"));
        assert_eq!(result.last().map(String::as_str), Some("침투 테스트"));
        let ko: Vec<&String> = result.iter().filter(|t| !t.is_ascii()).collect();
        let mut sorted = ko.clone();
        sorted.sort();
        assert_eq!(ko, sorted);
    }

    #[test]
    fn test_locale_cmp_folds_case() {
        assert_eq!(locale_cmp("abc", "ABD"), Ordering::Less);
        assert_eq!(locale_cmp("Zeta", "alpha"), Ordering::Greater);
        assert_eq!(locale_cmp("가", "나"), Ordering::Less);
        assert_eq!(locale_cmp("Z", "가"), Ordering::Less);
    }

    #[test]
    fn test_notes_match_title_content_tags() {
        let mut a = note("a", "Kerberos", "2025-01-01", "");
        a.tags = vec!["AD".to_string()];
        let mut b = note("b", "Other", "2025-01-01", "");
        b.content = "about Kerberos tickets".to_string();
        let c = note("c", "Unrelated", "2025-01-01", "");
        let notes = vec![a, b, c];

        let by_text = NotesFilter {
            query: "Kerberos".to_string(),
        };
        assert_eq!(filter_notes(&notes, &by_text).len(), 2);

        let by_tag = NotesFilter {
            query: "AD".to_string(),
        };
        let result = filter_notes(&notes, &by_tag);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "a");
    }

    #[test]
    fn test_notes_sorted_by_updated() {
        let notes = vec![
            note("a", "a", "2025-01-01", "2025-03-01"),
            note("b", "b", "2025-02-01", ""),
            note("c", "c", "2025-01-15", "2025-04-01"),
        ];
        let ids: Vec<&str> = filter_notes(&notes, &NotesFilter::default())
            .iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_resources_keep_order_and_filter() {
        let resources = default_resources();
        let all = filter_resources(&resources, &ResourcesFilter::default());
        assert_eq!(all.len(), 10);
        assert_eq!(all[0].id, "r_owasp");

        let ctf = ResourcesFilter {
            category: CategoryFilter::parse(ResourceCategory::Ctf.as_str()),
            ..ResourcesFilter::default()
        };
        let ids: Vec<&str> = filter_resources(&resources, &ctf)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["r_thm", "r_htb"]);

        let tagged = ResourcesFilter {
            query: "한국어".to_string(),
            ..ResourcesFilter::default()
        };
        assert_eq!(filter_resources(&resources, &tagged).len(), 1);
    }

    #[test]
    fn test_filter_result_is_exactly_matching_records() {
        let glossary = default_glossary();
        let filter = GlossaryFilter {
            query: "공격".to_string(),
            category: CategoryFilter::parse(GlossaryCategory::Attack.as_str()),
            bucket: Bucket::All,
        };
        let result = filter_glossary(&glossary, &filter);
        for entry in &glossary {
            let included = result.iter().any(|g| g.id == entry.id);
            assert_eq!(included, filter.matches(entry), "mismatch for {}", entry.term);
        }
    }
}
