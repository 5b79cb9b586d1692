//! Per-collection list views, detail views and the alphabet bucket bar.
//!
//! Every function takes an already filtered and sorted list; see
//! [`crate::filter`].

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use super::html::{empty_state, escape, tag_badges};
use super::reldate::relative_date;
use super::Modal;
use crate::filter::Bucket;
use crate::model::{GlossaryEntry, NewsItem, Note, Resource};

/// Accent colors cycled through by note cards.
pub const NOTE_COLORS: [&str; 6] = [
    "#58a6ff", "#00d4aa", "#bc8cff", "#d29922", "#3fb950", "#f85149",
];

/// Empty-state text per section.
pub const NEWS_EMPTY: &str = "조건에 맞는 뉴스가 없습니다";
/// Shown when no glossary entry matches.
pub const GLOSSARY_EMPTY: &str = "조건에 맞는 용어가 없습니다";
/// Shown when no note matches.
pub const NOTES_EMPTY: &str = "조건에 맞는 노트가 없습니다";
/// Shown when no resource matches.
pub const RESOURCES_EMPTY: &str = "조건에 맞는 자료가 없습니다";

fn severity_badge(item: &NewsItem) -> String {
    let key = item.severity.as_str();
    if key.is_empty() {
        return String::new();
    }
    format!(
        r#"<span class="sev sev-{}">{}</span>"#,
        escape(key),
        escape(&key.to_uppercase())
    )
}

fn category_badge(key: &str, label: &str) -> String {
    format!(
        r#"<span class="badge b-{}">{}</span>"#,
        escape(key),
        escape(label)
    )
}

/// One news card.
#[must_use]
pub fn news_card(item: &NewsItem, annotated: bool, today: NaiveDate) -> String {
    let marker = if annotated {
        r#"<span class="has-note-dot" title="메모 있음"></span>"#
    } else {
        ""
    };
    let source = if item.source.is_empty() {
        String::new()
    } else {
        format!(r#"<span class="card-source">{}</span>"#, escape(&item.source))
    };

    format!(
        r#"<div class="news-card" data-action="news-detail" data-id="{id}" style="--card-color:{color}">
  <div class="card-title">{title}</div>
  <div class="card-summary">{summary}</div>
  <div class="card-footer">{category}{severity}{tags}{marker}{source}<span class="card-date">{date}</span></div>
</div>"#,
        id = escape(&item.id),
        color = item.category.color(),
        title = escape(&item.title),
        summary = escape(&item.summary),
        category = category_badge(item.category.as_str(), item.category.label()),
        severity = severity_badge(item),
        tags = tag_badges(&item.tags),
        date = escape(&relative_date(&item.date, today)),
    )
}

/// The news grid, or its empty state.
#[must_use]
pub fn news_list(
    items: &[&NewsItem],
    annotations: &BTreeMap<String, String>,
    today: NaiveDate,
) -> String {
    if items.is_empty() {
        return empty_state("news", NEWS_EMPTY);
    }
    let cards: String = items
        .iter()
        .map(|n| news_card(n, annotations.contains_key(&n.id), today))
        .collect();
    format!(r#"<div class="news-grid" id="news-grid">{cards}</div>"#)
}

/// Detail view of a news item, with its annotation editor.
#[must_use]
pub fn news_detail(item: &NewsItem, annotation: Option<&str>, today: NaiveDate) -> Modal {
    let source = if item.source.is_empty() {
        String::new()
    } else {
        format!(
            r#"<span class="card-source">출처: {}</span>"#,
            escape(&item.source)
        )
    };
    let link = if item.url.is_empty() {
        String::new()
    } else {
        format!(
            r#"<a href="{}" target="_blank" rel="noopener" class="detail-link">&#128279; 원문 보기</a>"#,
            escape(&item.url)
        )
    };
    let id = escape(&item.id);

    let body = format!(
        r#"<div class="detail-meta">{category}{severity}{tags}{source}<span class="card-date">{date}</span></div>
<div class="detail-body">{summary}</div>
{link}
<div class="note-editor">
  <div class="note-editor-label">&#128221; 학습 메모</div>
  <textarea id="news-note-area" name="annotation" placeholder="이 뉴스에서 배운 점, 참고 사항을 메모하세요...">{annotation}</textarea>
  <div class="note-editor-actions"><button class="btn btn-primary btn-sm" data-action="save-annotation" data-id="{id}">저장</button></div>
</div>
<div class="form-actions">
  <button class="btn btn-secondary btn-sm" data-action="edit" data-collection="news" data-id="{id}">수정</button>
  <button class="btn btn-danger btn-sm" data-action="delete" data-collection="news" data-id="{id}">삭제</button>
</div>"#,
        category = category_badge(item.category.as_str(), item.category.label()),
        severity = severity_badge(item),
        tags = tag_badges(&item.tags),
        date = escape(&relative_date(&item.date, today)),
        summary = escape(&item.summary),
        annotation = escape(annotation.unwrap_or_default()),
    );

    Modal {
        title: item.title.clone(),
        body,
        wide: true,
    }
}

/// One glossary row; `open` shows it expanded.
#[must_use]
pub fn glossary_row(entry: &GlossaryEntry, open: bool) -> String {
    let difficulty = if entry.difficulty.as_str().is_empty() {
        String::new()
    } else {
        format!(
            r#"<span class="diff diff-{}">{}</span>"#,
            escape(entry.difficulty.as_str()),
            escape(entry.difficulty.label())
        )
    };
    let example = if entry.example.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="g-example">{}</div>"#, escape(&entry.example))
    };
    let related = if entry.related.is_empty() {
        String::new()
    } else {
        let chips: String = entry
            .related
            .iter()
            .map(|r| format!(r#"<span class="g-rel-tag">{}</span>"#, escape(r)))
            .collect();
        format!(r#"<div class="g-related">{chips}</div>"#)
    };
    let id = escape(&entry.id);

    format!(
        r#"<div class="glossary-item{open}" id="gi-{id}">
  <div class="glossary-header" data-action="toggle-glossary" data-id="{id}">
    <span class="g-term">{term}</span><span class="g-eng">{eng}</span>{category}{difficulty}<span class="g-arrow">&#9660;</span>
  </div>
  <div class="glossary-body">
    <div class="g-definition">{definition}</div>{example}{related}
    <div class="g-actions">
      <button class="btn btn-secondary btn-sm" data-action="edit" data-collection="glossary" data-id="{id}">수정</button>
      <button class="btn btn-danger btn-sm" data-action="delete" data-collection="glossary" data-id="{id}">삭제</button>
    </div>
  </div>
</div>"#,
        open = if open { " open" } else { "" },
        term = escape(&entry.term),
        eng = escape(&entry.eng),
        category = category_badge(entry.category.as_str(), entry.category.label()),
        definition = escape(&entry.definition),
    )
}

/// The glossary list, or its empty state.
#[must_use]
pub fn glossary_list(entries: &[&GlossaryEntry], expanded: &BTreeSet<String>) -> String {
    if entries.is_empty() {
        return empty_state("glossary", GLOSSARY_EMPTY);
    }
    let rows: String = entries
        .iter()
        .map(|g| glossary_row(g, expanded.contains(&g.id)))
        .collect();
    format!(r#"<div class="glossary-list" id="glossary-list">{rows}</div>"#)
}

/// The alphabet bucket bar with `active` highlighted.
#[must_use]
pub fn bucket_bar(active: Bucket) -> String {
    let buttons: String = Bucket::choices()
        .into_iter()
        .map(|bucket| {
            format!(
                r#"<button class="alpha-btn{}" data-action="bucket" data-alpha="{}">{}</button>"#,
                if bucket == active { " active" } else { "" },
                escape(&bucket.value()),
                escape(&bucket.label())
            )
        })
        .collect();
    format!(r#"<div class="alpha-filter" id="alpha-filter">{buttons}</div>"#)
}

/// One note card; `position` picks the accent color.
#[must_use]
pub fn note_card(note: &Note, position: usize, today: NaiveDate) -> String {
    format!(
        r#"<div class="note-card" data-action="note-detail" data-id="{id}" style="--note-color:{color}">
  <div class="note-title">{title}</div>
  <div class="note-preview">{content}</div>
  <div class="note-footer">{tags}<span class="note-date">{date}</span></div>
</div>"#,
        id = escape(&note.id),
        color = NOTE_COLORS[position % NOTE_COLORS.len()],
        title = escape(&note.title),
        content = escape(&note.content),
        tags = tag_badges(&note.tags),
        date = escape(&relative_date(note.last_touched(), today)),
    )
}

/// The notes grid, or its empty state.
#[must_use]
pub fn notes_list(notes: &[&Note], today: NaiveDate) -> String {
    if notes.is_empty() {
        return empty_state("notes", NOTES_EMPTY);
    }
    let cards: String = notes
        .iter()
        .enumerate()
        .map(|(i, n)| note_card(n, i, today))
        .collect();
    format!(r#"<div class="notes-grid" id="notes-grid">{cards}</div>"#)
}

/// Detail view of a note.
#[must_use]
pub fn note_detail(note: &Note, today: NaiveDate) -> Modal {
    let id = escape(&note.id);
    let body = format!(
        r#"<div class="detail-meta">{tags}<span class="card-date">{date}</span></div>
<div class="detail-body">{content}</div>
<div class="form-actions">
  <button class="btn btn-secondary btn-sm" data-action="edit" data-collection="notes" data-id="{id}">수정</button>
  <button class="btn btn-danger btn-sm" data-action="delete" data-collection="notes" data-id="{id}">삭제</button>
</div>"#,
        tags = tag_badges(&note.tags),
        date = escape(&relative_date(note.last_touched(), today)),
        content = escape(&note.content),
    );

    Modal {
        title: note.title.clone(),
        body,
        wide: true,
    }
}

/// One resource card.
#[must_use]
pub fn resource_card(resource: &Resource) -> String {
    let link = if resource.url.is_empty() {
        String::new()
    } else {
        let url = escape(&resource.url);
        format!(
            r#"<a href="{url}" target="_blank" rel="noopener" class="resource-url">&#128279; {url}</a>"#
        )
    };
    let id = escape(&resource.id);

    format!(
        r#"<div class="resource-card">
  <div class="resource-card-header"><div class="resource-title">{title}</div>{category}</div>
  <div class="resource-desc">{description}</div>{link}
  <div class="resource-footer">{tags}
    <div class="resource-actions">
      <button class="btn-icon" data-action="edit" data-collection="resources" data-id="{id}" title="수정">&#9998;</button>
      <button class="btn-icon" data-action="delete" data-collection="resources" data-id="{id}" title="삭제">&#128465;</button>
    </div>
  </div>
</div>"#,
        title = escape(&resource.title),
        category = category_badge(resource.category.as_str(), resource.category.label()),
        description = escape(&resource.description),
        tags = tag_badges(&resource.tags),
    )
}

/// The resources grid, or its empty state.
#[must_use]
pub fn resources_list(resources: &[&Resource]) -> String {
    if resources.is_empty() {
        return empty_state("resources", RESOURCES_EMPTY);
    }
    let cards: String = resources.iter().map(|r| resource_card(r)).collect();
    format!(r#"<div class="resources-grid" id="resources-grid">{cards}</div>"#)
}
