//! The standalone dashboard document.

use super::html::{escape, select_options};
use super::{Modal, Notice, Screen};
use crate::filter::CategoryFilter;
use crate::model::{Collection, GlossaryCategory, NewsCategory, ResourceCategory};
use crate::store::Store;

const STYLE: &str = r"
:root { --bg:#0d1117; --panel:#161b22; --border:#30363d; --text:#e6edf3; --text2:#8b949e; --accent:#00d4aa; }
* { box-sizing:border-box; }
body { margin:0; background:var(--bg); color:var(--text); font-family:-apple-system,'Noto Sans KR',sans-serif; }
header { display:flex; gap:8px; align-items:center; padding:12px 20px; border-bottom:1px solid var(--border); }
.logo { font-weight:700; color:var(--accent); margin-right:16px; }
.nav-tab { background:none; border:none; color:var(--text2); padding:8px 12px; }
.nav-tab.active { color:var(--text); border-bottom:2px solid var(--accent); }
.layout { display:grid; grid-template-columns:1fr 260px; gap:20px; padding:20px; }
.section.hidden { display:none; }
.toolbar { display:flex; gap:8px; margin-bottom:12px; }
.news-grid, .notes-grid, .resources-grid { display:grid; grid-template-columns:repeat(auto-fill,minmax(280px,1fr)); gap:12px; }
.news-card, .note-card, .resource-card, .glossary-item { background:var(--panel); border:1px solid var(--border); border-radius:8px; padding:12px; }
.news-card { border-left:3px solid var(--card-color); }
.note-card { border-top:3px solid var(--note-color); }
.glossary-body { display:none; }
.glossary-item.open .glossary-body { display:block; }
.badge, .sev, .diff, .tag-chip, .g-rel-tag { display:inline-block; font-size:11px; padding:2px 6px; border-radius:10px; border:1px solid var(--border); margin-right:4px; }
.has-note-dot { display:inline-block; width:8px; height:8px; border-radius:50%; background:var(--accent); }
.alpha-btn.active { background:var(--accent); color:var(--bg); }
.empty-state { color:var(--text2); text-align:center; padding:40px; }
.modal-overlay { position:fixed; inset:0; background:rgba(0,0,0,.6); display:flex; align-items:center; justify-content:center; }
.modal { background:var(--panel); border:1px solid var(--border); border-radius:10px; padding:20px; width:520px; }
.modal.modal-lg { width:760px; }
.toast { position:fixed; bottom:20px; right:20px; padding:10px 16px; border-radius:6px; background:var(--panel); border:1px solid var(--border); }
.toast.success { border-color:#3fb950; } .toast.error { border-color:#f85149; }
";

fn nav(active: Collection) -> String {
    Collection::ALL
        .iter()
        .map(|c| {
            format!(
                r#"<button class="nav-tab{}" data-section="{}">{}</button>"#,
                if *c == active { " active" } else { "" },
                c.as_str(),
                c.label()
            )
        })
        .collect()
}

fn search_input(collection: Collection, query: &str) -> String {
    format!(
        r#"<input class="search-input" id="{}-search" type="search" placeholder="검색..." value="{}" />"#,
        collection.as_str(),
        escape(query)
    )
}

fn category_select(
    collection: Collection,
    options: &[(&str, &str)],
    selected: &CategoryFilter,
) -> String {
    let mut all = vec![("all", "전체")];
    all.extend_from_slice(options);
    format!(
        r#"<select class="filter-select" id="{}-cat-filter">{}</select>"#,
        collection.as_str(),
        select_options(&all, selected.as_str())
    )
}

fn toolbar(collection: Collection, store: &Store) -> String {
    let filters = store.filters();
    match collection {
        Collection::News => format!(
            r#"<div class="toolbar">{}{}<button class="btn btn-secondary" id="n8n-btn" data-action="import">뉴스 가져오기</button><button class="btn btn-danger" id="news-clear-btn" data-action="clear-news">초기화</button></div>"#,
            search_input(collection, &filters.news.query),
            category_select(collection, NewsCategory::OPTIONS, &filters.news.category),
        ),
        Collection::Glossary => format!(
            r#"<div class="toolbar">{}{}</div>"#,
            search_input(collection, &filters.glossary.query),
            category_select(
                collection,
                GlossaryCategory::OPTIONS,
                &filters.glossary.category
            ),
        ),
        Collection::Notes => format!(
            r#"<div class="toolbar">{}</div>"#,
            search_input(collection, &filters.notes.query),
        ),
        Collection::Resources => format!(
            r#"<div class="toolbar">{}{}</div>"#,
            search_input(collection, &filters.resources.query),
            category_select(
                collection,
                ResourceCategory::OPTIONS,
                &filters.resources.category
            ),
        ),
    }
}

fn modal(modal: &Modal) -> String {
    format!(
        r#"<div class="modal-overlay" id="modal-overlay"><div class="modal{}" id="modal-box"><div class="modal-header"><span id="modal-title">{}</span><button id="modal-close" data-action="close-modal">&times;</button></div><div id="modal-body">{}</div></div></div>"#,
        if modal.wide { " modal-lg" } else { "" },
        escape(&modal.title),
        modal.body
    )
}

fn toast(notice: &Notice) -> String {
    format!(
        r#"<div class="toast {}">{}</div>"#,
        notice.kind.as_str(),
        escape(&notice.message)
    )
}

/// Assemble the full HTML document.
#[must_use]
pub fn page(screen: &Screen, store: &Store) -> String {
    let active = store.active();
    let sections: String = Collection::ALL
        .iter()
        .map(|c| {
            format!(
                r#"<section class="section{}" id="section-{}">{}{}</section>"#,
                if *c == active { "" } else { " hidden" },
                c.as_str(),
                toolbar(*c, store),
                screen.region(*c)
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="ko">
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1" />
<title>SecLearn</title>
<style>{style}</style>
</head>
<body>
<header><span class="logo">SecLearn</span>{nav}<button class="btn btn-primary" id="addBtn" data-action="add">+ 추가</button></header>
<div class="layout">
<main>{sections}</main>
<aside class="sidebar">{sidebar}</aside>
</div>
{modal}{toast}
</body>
</html>
"#,
        style = STYLE,
        nav = nav(active),
        sidebar = screen.sidebar,
        modal = screen.modal.as_ref().map(modal).unwrap_or_default(),
        toast = screen.notice.as_ref().map(toast).unwrap_or_default(),
    )
}
