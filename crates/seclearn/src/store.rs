//! The domain store.
//!
//! [`Store`] holds the four collections, the per-news annotations, the
//! filter state and the active section. It is the only mutation surface;
//! callers persist and re-render after each change.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::filter::{Bucket, CategoryFilter, FilterState};
use crate::model::{Collection, GlossaryEntry, NewsItem, Note, Record, Resource};
use crate::seed;

/// Which collections have already received their built-in defaults.
///
/// Persisted alongside the data so that a collection the user emptied is
/// not filled again on the next start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedMarkers {
    /// The glossary has been seeded.
    pub glossary: bool,
    /// The resource list has been seeded.
    pub resources: bool,
}

/// Result of [`Store::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upserted {
    /// No record had the id; the record was inserted.
    Created,
    /// A record with the id was replaced in place.
    Updated,
}

/// A record kind the store keeps a list of.
pub trait Stored: Record {
    /// Whether new records go to the front of the list.
    const PREPEND: bool;

    /// The list holding this kind.
    fn list(store: &Store) -> &Vec<Self>;

    /// Mutable access to the list holding this kind.
    fn list_mut(store: &mut Store) -> &mut Vec<Self>;
}

impl Stored for NewsItem {
    const PREPEND: bool = true;

    fn list(store: &Store) -> &Vec<Self> {
        &store.news
    }

    fn list_mut(store: &mut Store) -> &mut Vec<Self> {
        &mut store.news
    }
}

impl Stored for GlossaryEntry {
    const PREPEND: bool = false;

    fn list(store: &Store) -> &Vec<Self> {
        &store.glossary
    }

    fn list_mut(store: &mut Store) -> &mut Vec<Self> {
        &mut store.glossary
    }
}

impl Stored for Note {
    const PREPEND: bool = true;

    fn list(store: &Store) -> &Vec<Self> {
        &store.notes
    }

    fn list_mut(store: &mut Store) -> &mut Vec<Self> {
        &mut store.notes
    }
}

impl Stored for Resource {
    const PREPEND: bool = true;

    fn list(store: &Store) -> &Vec<Self> {
        &store.resources
    }

    fn list_mut(store: &mut Store) -> &mut Vec<Self> {
        &mut store.resources
    }
}

/// In-memory application state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    news: Vec<NewsItem>,
    glossary: Vec<GlossaryEntry>,
    notes: Vec<Note>,
    resources: Vec<Resource>,
    annotations: BTreeMap<String, String>,
    seeded: SeedMarkers,
    filters: FilterState,
    active: Collection,
}

impl Store {
    /// Create an empty, unseeded store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every record of one kind, in stored order.
    #[must_use]
    pub fn records<R: Stored>(&self) -> &[R] {
        R::list(self)
    }

    /// News items in stored order.
    #[must_use]
    pub fn news(&self) -> &[NewsItem] {
        &self.news
    }

    /// Glossary entries in stored order.
    #[must_use]
    pub fn glossary(&self) -> &[GlossaryEntry] {
        &self.glossary
    }

    /// Notes in stored order.
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Resources in stored order.
    #[must_use]
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Number of records in a collection.
    #[must_use]
    pub fn len(&self, collection: Collection) -> usize {
        match collection {
            Collection::News => self.news.len(),
            Collection::Glossary => self.glossary.len(),
            Collection::Notes => self.notes.len(),
            Collection::Resources => self.resources.len(),
        }
    }

    /// Whether all four collections are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Collection::ALL.iter().all(|c| self.len(*c) == 0)
    }

    /// Look up a record by id.
    #[must_use]
    pub fn get<R: Stored>(&self, id: &str) -> Option<&R> {
        R::list(self).iter().find(|r| r.id() == id)
    }

    /// Whether a record with `id` exists in `collection`.
    #[must_use]
    pub fn contains(&self, collection: Collection, id: &str) -> bool {
        match collection {
            Collection::News => self.get::<NewsItem>(id).is_some(),
            Collection::Glossary => self.get::<GlossaryEntry>(id).is_some(),
            Collection::Notes => self.get::<Note>(id).is_some(),
            Collection::Resources => self.get::<Resource>(id).is_some(),
        }
    }

    /// Replace the record with the same id, or insert it at the kind's
    /// insertion point.
    pub fn upsert<R: Stored>(&mut self, record: R) -> Upserted {
        let list = R::list_mut(self);
        if let Some(slot) = list.iter_mut().find(|r| r.id() == record.id()) {
            debug!("Replacing {} record {}", R::COLLECTION, record.id());
            *slot = record;
            return Upserted::Updated;
        }

        debug!("Inserting {} record {}", R::COLLECTION, record.id());
        if R::PREPEND {
            list.insert(0, record);
        } else {
            list.push(record);
        }
        Upserted::Created
    }

    /// Replace a whole collection, as when loading from storage.
    pub fn replace_all<R: Stored>(&mut self, records: Vec<R>) {
        *R::list_mut(self) = records;
    }

    /// Delete a record by id. Deleting a news item also drops its
    /// annotation. Returns whether anything was removed.
    pub fn delete(&mut self, collection: Collection, id: &str) -> bool {
        let removed = match collection {
            Collection::News => remove_by_id(&mut self.news, id),
            Collection::Glossary => remove_by_id(&mut self.glossary, id),
            Collection::Notes => remove_by_id(&mut self.notes, id),
            Collection::Resources => remove_by_id(&mut self.resources, id),
        };
        if collection == Collection::News {
            self.annotations.remove(id);
        }
        debug!(removed, "Delete {} record {}", collection, id);
        removed
    }

    /// Remove every news item and every annotation.
    pub fn clear_news(&mut self) {
        info!("Clearing {} news items", self.news.len());
        self.news.clear();
        self.annotations.clear();
    }

    // === Annotations ===

    /// The annotation attached to a news item.
    #[must_use]
    pub fn annotation(&self, news_id: &str) -> Option<&str> {
        self.annotations.get(news_id).map(String::as_str)
    }

    /// Attach an annotation to a news item; empty text removes it.
    pub fn set_annotation(&mut self, news_id: &str, text: &str) {
        if text.is_empty() {
            self.annotations.remove(news_id);
        } else {
            self.annotations
                .insert(news_id.to_string(), text.to_string());
        }
    }

    /// All annotations keyed by news id.
    #[must_use]
    pub fn annotations(&self) -> &BTreeMap<String, String> {
        &self.annotations
    }

    /// Replace all annotations, as when loading from storage.
    pub fn replace_annotations(&mut self, annotations: BTreeMap<String, String>) {
        self.annotations = annotations;
    }

    // === Seeding ===

    /// Seed markers as they should be persisted.
    #[must_use]
    pub fn seed_markers(&self) -> SeedMarkers {
        self.seeded
    }

    /// Restore seed markers, as when loading from storage.
    pub fn set_seed_markers(&mut self, markers: SeedMarkers) {
        self.seeded = markers;
    }

    /// Fill an empty glossary and an empty resource list with the built-in
    /// defaults, once per collection.
    ///
    /// A collection whose marker is unset but which already holds records
    /// (data written before markers existed) is marked without seeding.
    /// Returns whether any collection was filled.
    pub fn seed_defaults(&mut self) -> bool {
        let mut filled = false;

        if !self.seeded.glossary {
            if self.glossary.is_empty() {
                self.glossary = seed::default_glossary();
                info!("Seeded glossary with {} entries", self.glossary.len());
                filled = true;
            }
            self.seeded.glossary = true;
        }

        if !self.seeded.resources {
            if self.resources.is_empty() {
                self.resources = seed::default_resources();
                info!("Seeded resources with {} entries", self.resources.len());
                filled = true;
            }
            self.seeded.resources = true;
        }

        filled
    }

    // === Filters and navigation ===

    /// Current filter state.
    #[must_use]
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Set the search text of a collection. Surrounding whitespace is
    /// dropped.
    pub fn set_search(&mut self, collection: Collection, text: &str) {
        let text = text.trim().to_string();
        match collection {
            Collection::News => self.filters.news.query = text,
            Collection::Glossary => self.filters.glossary.query = text,
            Collection::Notes => self.filters.notes.query = text,
            Collection::Resources => self.filters.resources.query = text,
        }
    }

    /// Set the category selector of a collection. Notes have no categories;
    /// returns `false` and changes nothing for them.
    pub fn set_category(&mut self, collection: Collection, category: CategoryFilter) -> bool {
        match collection {
            Collection::News => self.filters.news.category = category,
            Collection::Glossary => self.filters.glossary.category = category,
            Collection::Resources => self.filters.resources.category = category,
            Collection::Notes => return false,
        }
        true
    }

    /// Set the glossary alphabet bucket.
    pub fn set_bucket(&mut self, bucket: Bucket) {
        self.filters.glossary.bucket = bucket;
    }

    /// The section currently shown.
    #[must_use]
    pub fn active(&self) -> Collection {
        self.active
    }

    /// Switch the section currently shown.
    pub fn set_active(&mut self, collection: Collection) {
        self.active = collection;
    }
}

fn remove_by_id<R: Record>(list: &mut Vec<R>, id: &str) -> bool {
    let before = list.len();
    list.retain(|r| r.id() != id);
    list.len() != before
}
