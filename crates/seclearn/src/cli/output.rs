//! Text output of the `list` command and the shell.

use std::fmt::Write as _;

use crate::error::Result;
use crate::filter::{filter_glossary, filter_news, filter_notes, filter_resources};
use crate::model::Collection;
use crate::store::Store;

use super::commands::OutputFormat;

/// The filtered records of `collection`, using the store's current filter
/// state, in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn list(store: &Store, collection: Collection, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Plain => Ok(list_plain(store, collection)),
        OutputFormat::Json => list_json(store, collection),
    }
}

/// One line per record: id, then the most telling fields, tab separated.
#[must_use]
pub fn list_plain(store: &Store, collection: Collection) -> String {
    let filters = store.filters();
    let mut out = String::new();
    match collection {
        Collection::News => {
            for n in filter_news(store.news(), &filters.news) {
                let marker = if store.annotation(&n.id).is_some() { "*" } else { "" };
                let _ = writeln!(
                    out,
                    "{}\t{}\t{}\t{}\t{}{marker}",
                    n.id, n.date, n.severity, n.category, n.title
                );
            }
        }
        Collection::Glossary => {
            for g in filter_glossary(store.glossary(), &filters.glossary) {
                let _ = writeln!(out, "{}\t{}\t{}\t{}", g.id, g.category, g.difficulty, g.term);
            }
        }
        Collection::Notes => {
            for n in filter_notes(store.notes(), &filters.notes) {
                let _ = writeln!(out, "{}\t{}\t{}", n.id, n.last_touched(), n.title);
            }
        }
        Collection::Resources => {
            for r in filter_resources(store.resources(), &filters.resources) {
                let _ = writeln!(out, "{}\t{}\t{}\t{}", r.id, r.category, r.title, r.url);
            }
        }
    }
    out
}

/// The filtered records as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn list_json(store: &Store, collection: Collection) -> Result<String> {
    let filters = store.filters();
    let json = match collection {
        Collection::News => serde_json::to_string_pretty(&filter_news(store.news(), &filters.news))?,
        Collection::Glossary => serde_json::to_string_pretty(&filter_glossary(
            store.glossary(),
            &filters.glossary,
        ))?,
        Collection::Notes => {
            serde_json::to_string_pretty(&filter_notes(store.notes(), &filters.notes))?
        }
        Collection::Resources => serde_json::to_string_pretty(&filter_resources(
            store.resources(),
            &filters.resources,
        ))?,
    };
    Ok(json)
}

/// One-line record counts, as shown after shell commands.
#[must_use]
pub fn summary(store: &Store) -> String {
    Collection::ALL
        .iter()
        .map(|c| format!("{} {}", c.label(), store.len(*c)))
        .collect::<Vec<_>>()
        .join(" | ")
}
