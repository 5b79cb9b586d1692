//! Snapshot persistence of the domain store.
//!
//! Each collection, the annotation map and the seed markers are written as
//! independent JSON blobs under `<prefix><name>`. Failures are logged and
//! dropped: a broken store never takes the dashboard down, and a corrupt
//! blob leaves the in-memory value untouched.

use std::collections::BTreeMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::{KeyValueStore, MemoryStore, SqliteStore};
use crate::model::{Collection, GlossaryEntry, NewsItem, Note, Resource};
use crate::store::{Store, Stored};

/// Key suffix of the news annotation map.
pub const ANNOTATIONS_KEY: &str = "newsNotes";

/// Key suffix of the seed markers.
pub const SEEDED_KEY: &str = "seeded";

/// Reads and writes a [`Store`] through a [`KeyValueStore`].
#[derive(Debug)]
pub struct Persistence {
    backend: Box<dyn KeyValueStore>,
    prefix: String,
}

impl Persistence {
    /// Wrap a backend, namespacing keys with `prefix`.
    #[must_use]
    pub fn new(backend: Box<dyn KeyValueStore>, prefix: impl Into<String>) -> Self {
        Self {
            backend,
            prefix: prefix.into(),
        }
    }

    /// Persistence over a fresh [`MemoryStore`].
    #[must_use]
    pub fn in_memory(prefix: impl Into<String>) -> Self {
        Self::new(Box::new(MemoryStore::new()), prefix)
    }

    /// Open the `SQLite` database at `path`.
    ///
    /// When the database cannot be opened the session falls back to an
    /// in-memory store: everything keeps working, nothing survives exit.
    #[must_use]
    pub fn open(path: &Path, prefix: impl Into<String>) -> Self {
        match SqliteStore::open(path) {
            Ok(store) => Self::new(Box::new(store), prefix),
            Err(e) => {
                warn!("Storage unavailable, changes will not be saved: {e}");
                Self::in_memory(prefix)
            }
        }
    }

    /// The full storage key for a blob name.
    #[must_use]
    pub fn key(&self, name: &str) -> String {
        format!("{}{name}", self.prefix)
    }

    /// The underlying backend.
    #[must_use]
    pub fn backend(&self) -> &dyn KeyValueStore {
        self.backend.as_ref()
    }

    /// Write every blob of `store`.
    pub fn save(&mut self, store: &Store) {
        self.write(Collection::News.as_str(), store.news());
        self.write(Collection::Glossary.as_str(), store.glossary());
        self.write(Collection::Notes.as_str(), store.notes());
        self.write(Collection::Resources.as_str(), store.resources());
        self.write(ANNOTATIONS_KEY, store.annotations());
        self.write(SEEDED_KEY, &store.seed_markers());
    }

    /// Read every blob present into `store`. Missing or unreadable blobs
    /// leave the corresponding in-memory value as it was.
    pub fn load(&self, store: &mut Store) {
        self.load_records::<NewsItem>(store);
        self.load_records::<GlossaryEntry>(store);
        self.load_records::<Note>(store);
        self.load_records::<Resource>(store);
        if let Some(annotations) = self.read::<Map<String, Value>>(ANNOTATIONS_KEY) {
            store.replace_annotations(
                annotations
                    .into_iter()
                    .filter_map(|(id, text)| loose_text(text).map(|text| (id, text)))
                    .collect::<BTreeMap<_, _>>(),
            );
        }
        if let Some(markers) = self.read(SEEDED_KEY) {
            store.set_seed_markers(markers);
        }
    }

    /// Records are converted one by one, so a single malformed entry costs
    /// that entry only.
    fn load_records<R: Stored>(&self, store: &mut Store) {
        let name = R::COLLECTION.as_str();
        let Some(raw) = self.read::<Vec<Value>>(name) else {
            return;
        };
        let total = raw.len();
        let records: Vec<R> = raw
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| {
                let Value::Object(fields) = value else {
                    warn!("Skipping {name}[{index}]: not an object");
                    return None;
                };
                match serde_json::from_value(Value::Object(loosen(fields))) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        warn!("Skipping {name}[{index}]: {e}");
                        None
                    }
                }
            })
            .collect();
        if records.len() < total {
            warn!("Recovered {} of {total} {name} records", records.len());
        }
        store.replace_all(records);
    }

    fn read<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let key = self.key(name);
        let raw = match self.backend.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read {key}: {e}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => {
                debug!("Loaded {key}");
                Some(value)
            }
            Err(e) => {
                warn!("Ignoring unreadable {key}: {e}");
                None
            }
        }
    }

    fn write<T: Serialize + ?Sized>(&mut self, name: &str, value: &T) {
        let key = self.key(name);
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize {key}: {e}");
                return;
            }
        };
        if let Err(e) = self.backend.set(&key, &json) {
            warn!("Failed to save {key}: {e}");
        }
    }
}

/// Coerce a stored record towards the record shape. Every record field is
/// text or a list of text: `null` and nested objects fall back to the field
/// default, numbers and booleans become text, and list entries that are not
/// scalars are dropped.
fn loosen(fields: Map<String, Value>) -> Map<String, Value> {
    fields
        .into_iter()
        .filter_map(|(name, value)| {
            let value = match value {
                Value::Array(items) => Value::Array(
                    items
                        .into_iter()
                        .filter_map(loose_text)
                        .map(Value::String)
                        .collect(),
                ),
                other => Value::String(loose_text(other)?),
            };
            Some((name, value))
        })
        .collect()
}

fn loose_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
