//! Sidebar aggregates and markup.
//!
//! Aggregation ([`SidebarStats::collect`]) is kept apart from markup
//! ([`sidebar`]) so the numbers can be checked without parsing HTML.

use std::collections::HashMap;

use serde::Serialize;

use super::html::escape;
use crate::model::{Collection, NewsCategory, Record, ResourceCategory};
use crate::store::Store;

/// Default number of tags in the tag cloud.
pub const DEFAULT_TAG_CLOUD_SIZE: usize = 12;

/// Number of records in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// Stored category key.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Records in the category.
    pub count: usize,
}

/// Everything the sidebar shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarStats {
    /// Record count per collection, in navigation order.
    pub counts: Vec<(Collection, usize)>,
    /// Most used tags with their counts.
    pub tags: Vec<(String, usize)>,
    /// Category breakdown of the active section.
    pub categories: Vec<CategoryCount>,
    /// The section the breakdown belongs to.
    pub active: Collection,
}

impl SidebarStats {
    /// Aggregate the current store.
    #[must_use]
    pub fn collect(store: &Store, tag_cloud_size: usize) -> Self {
        Self {
            counts: Collection::ALL
                .iter()
                .map(|c| (*c, store.len(*c)))
                .collect(),
            tags: tag_cloud(store, tag_cloud_size),
            categories: category_breakdown(store),
            active: store.active(),
        }
    }
}

/// Most frequent tags across news, notes and resources.
///
/// Sorted by descending count; ties keep the order in which tags were
/// first seen (news, then notes, then resources, each in stored order).
#[must_use]
pub fn tag_cloud(store: &Store, limit: usize) -> Vec<(String, usize)> {
    let all_tags = store
        .news()
        .iter()
        .flat_map(Record::tags)
        .chain(store.notes().iter().flat_map(Record::tags))
        .chain(store.resources().iter().flat_map(Record::tags));

    let mut counted = tally(all_tags.map(String::as_str));
    counted.sort_by(|a, b| b.1.cmp(&a.1));
    counted.truncate(limit);
    counted
}

/// Category counts of the active section, in first-seen order.
///
/// Only news and resources have a breakdown; other sections get none.
#[must_use]
pub fn category_breakdown(store: &Store) -> Vec<CategoryCount> {
    match store.active() {
        Collection::News => tally(store.news().iter().map(|n| n.category.as_str()))
            .into_iter()
            .map(|(key, count)| CategoryCount {
                label: NewsCategory::from(key.as_str()).label().to_string(),
                key,
                count,
            })
            .collect(),
        Collection::Resources => tally(store.resources().iter().map(|r| r.category.as_str()))
            .into_iter()
            .map(|(key, count)| CategoryCount {
                label: ResourceCategory::from(key.as_str()).label().to_string(),
                key,
                count,
            })
            .collect(),
        Collection::Glossary | Collection::Notes => Vec::new(),
    }
}

/// Count occurrences, keeping first-seen order.
fn tally<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut counted: Vec<(String, usize)> = Vec::new();
    for value in values {
        if let Some(&i) = index.get(value) {
            counted[i].1 += 1;
        } else {
            index.insert(value, counted.len());
            counted.push((value.to_string(), 1));
        }
    }
    counted
}

/// Sidebar markup.
#[must_use]
pub fn sidebar(stats: &SidebarStats) -> String {
    let counts: String = stats
        .counts
        .iter()
        .map(|(collection, count)| {
            format!(
                r#"<div class="stat-item"><span class="stat-label">{}</span><span class="stat-count" id="sb-{}">{count}</span></div>"#,
                collection.label(),
                collection.as_str()
            )
        })
        .collect();

    let tags: String = stats
        .tags
        .iter()
        .map(|(tag, _)| {
            let tag = escape(tag);
            format!(r#"<span class="tag-chip" data-action="quick-search" data-tag="{tag}">{tag}</span>"#)
        })
        .collect();

    let categories: String = stats
        .categories
        .iter()
        .map(|c| {
            format!(
                r#"<div class="cat-item" data-action="category" data-collection="{}" data-category="{}">{} <span class="cat-count">{}</span></div>"#,
                stats.active.as_str(),
                escape(&c.key),
                escape(&c.label),
                c.count
            )
        })
        .collect();

    format!(
        r#"<div class="sb-block"><div class="sb-title">현황</div>{counts}</div>
<div class="sb-block"><div class="sb-title">태그</div><div class="tag-cloud" id="sb-tags">{tags}</div></div>
<div class="sb-block"><div class="sb-title">카테고리</div><div id="sb-cats">{categories}</div></div>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewsItem, Note, Resource};

    fn tagged_news(id: &str, category: &str, tags: &[&str]) -> NewsItem {
        NewsItem {
            id: id.to_string(),
            title: id.to_string(),
            category: NewsCategory::from(category),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            ..NewsItem::default()
        }
    }

    #[test]
    fn test_tally_keeps_first_seen_order() {
        let counted = tally(["b", "a", "b", "c", "a", "b"].into_iter());
        assert_eq!(
            counted,
            vec![
                ("b".to_string(), 3),
                ("a".to_string(), 2),
                ("c".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_tag_cloud_merges_and_breaks_ties_by_first_seen() {
        let mut store = Store::new();
        store.replace_all(vec![tagged_news("n1", "cve", &["web", "CVE"])]);
        store.replace_all(vec![Note {
            id: "note1".to_string(),
            title: "t".to_string(),
            tags: vec!["linux".to_string(), "CVE".to_string()],
            ..Note::default()
        }]);
        store.replace_all(vec![Resource {
            id: "r1".to_string(),
            title: "t".to_string(),
            tags: vec!["linux".to_string(), "free".to_string()],
            ..Resource::default()
        }]);

        let cloud = tag_cloud(&store, 12);
        let names: Vec<&str> = cloud.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(names, vec!["CVE", "linux", "web", "free"]);
        assert_eq!(cloud[0].1, 2);
    }

    #[test]
    fn test_tag_cloud_limit() {
        let mut store = Store::new();
        let tags: Vec<String> = (0..20).map(|i| format!("t{i}")).collect();
        let refs: Vec<&str> = tags.iter().map(String::as_str).collect();
        store.replace_all(vec![tagged_news("n1", "other", &refs)]);

        let cloud = tag_cloud(&store, DEFAULT_TAG_CLOUD_SIZE);
        assert_eq!(cloud.len(), 12);
        assert_eq!(cloud[0].0, "t0");
        assert_eq!(cloud[11].0, "t11");
    }

    #[test]
    fn test_glossary_related_terms_not_in_cloud() {
        let mut store = Store::new();
        store.seed_defaults();
        let cloud = tag_cloud(&store, 100);
        assert!(!cloud.iter().any(|(t, _)| t == "ROP"));
        assert!(cloud.iter().any(|(t, _)| t == "무료"));
    }

    #[test]
    fn test_category_breakdown_follows_active_section() {
        let mut store = Store::new();
        store.seed_defaults();
        store.replace_all(vec![
            tagged_news("n1", "vuln", &[]),
            tagged_news("n2", "cve", &[]),
            tagged_news("n3", "vuln", &[]),
        ]);

        let news = category_breakdown(&store);
        assert_eq!(
            news,
            vec![
                CategoryCount {
                    key: "vuln".to_string(),
                    label: "취약점".to_string(),
                    count: 2
                },
                CategoryCount {
                    key: "cve".to_string(),
                    label: "CVE".to_string(),
                    count: 1
                },
            ]
        );

        store.set_active(Collection::Resources);
        let resources = category_breakdown(&store);
        assert_eq!(resources[0].key, "docs");
        assert_eq!(resources.iter().map(|c| c.count).sum::<usize>(), 10);

        store.set_active(Collection::Glossary);
        assert!(category_breakdown(&store).is_empty());
        store.set_active(Collection::Notes);
        assert!(category_breakdown(&store).is_empty());
    }

    #[test]
    fn test_unknown_category_label_verbatim() {
        let mut store = Store::new();
        store.replace_all(vec![tagged_news("n1", "malware", &[])]);
        assert_eq!(category_breakdown(&store)[0].label, "malware");
    }

    #[test]
    fn test_collect_counts() {
        let mut store = Store::new();
        store.seed_defaults();
        let stats = SidebarStats::collect(&store, 12);
        assert_eq!(
            stats.counts,
            vec![
                (Collection::News, 0),
                (Collection::Glossary, 12),
                (Collection::Notes, 0),
                (Collection::Resources, 10)
            ]
        );
        assert_eq!(stats.active, Collection::News);
        assert!(stats.categories.is_empty());
    }

    #[test]
    fn test_sidebar_markup_escapes_tags() {
        let stats = SidebarStats {
            counts: vec![(Collection::News, 3)],
            tags: vec![("<img>".to_string(), 1)],
            categories: Vec::new(),
            active: Collection::News,
        };
        let html = sidebar(&stats);
        assert!(html.contains(r#"id="sb-news">3<"#));
        assert!(html.contains("&lt;img&gt;"));
        assert!(!html.contains("<img>"));
    }
}
