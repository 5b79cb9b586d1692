//! The dashboard: owns the store and its persistence and keeps the
//! rendered [`Screen`] in step with every change.
//!
//! Every mutating action follows the same sequence: change the store,
//! persist, re-render the affected section and the sidebar, then set a
//! notice. Filter and navigation changes skip the persist step.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::filter::{
    filter_glossary, filter_news, filter_notes, filter_resources, Bucket, CategoryFilter,
};
use crate::forms::{self, FormInput, FormKind, Submitted};
use crate::import;
use crate::model::{self, Collection, NewsItem, Note};
use crate::render::sidebar::{sidebar, DEFAULT_TAG_CLOUD_SIZE};
use crate::render::views;
use crate::render::{page, Notice, Screen, SidebarStats};
use crate::storage::Persistence;
use crate::store::Store;

/// Notice after a delete.
const DELETED: &str = "삭제됨";
/// Notice after an annotation is saved.
const ANNOTATION_SAVED: &str = "메모 저장됨";
/// Notice after all news is cleared.
const NEWS_CLEARED: &str = "뉴스 데이터가 초기화되었습니다";
/// Notice after an import that added nothing.
const NOTHING_IMPORTED: &str = "새 뉴스 없음";

/// A running dashboard session.
#[derive(Debug)]
pub struct Dashboard {
    store: Store,
    persistence: Persistence,
    screen: Screen,
    expanded: BTreeSet<String>,
    tag_cloud_size: usize,
    fixed_today: Option<NaiveDate>,
}

impl Dashboard {
    /// A dashboard over `persistence`. Nothing is loaded until
    /// [`Dashboard::bootstrap`].
    #[must_use]
    pub fn new(persistence: Persistence) -> Self {
        Self {
            store: Store::new(),
            persistence,
            screen: Screen::default(),
            expanded: BTreeSet::new(),
            tag_cloud_size: DEFAULT_TAG_CLOUD_SIZE,
            fixed_today: None,
        }
    }

    /// Open the configured database and bootstrap.
    #[must_use]
    pub fn open(config: &Config) -> Self {
        let persistence =
            Persistence::open(&config.database_path(), config.storage.key_prefix.clone());
        let mut dashboard =
            Self::new(persistence).with_tag_cloud_size(config.ui.tag_cloud_size);
        dashboard.bootstrap();
        dashboard
    }

    /// Show at most `size` tags in the tag cloud.
    #[must_use]
    pub fn with_tag_cloud_size(mut self, size: usize) -> Self {
        self.tag_cloud_size = size;
        self
    }

    /// Pin the current date, for reproducible output.
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    /// Load persisted state, seed empty defaults and render everything.
    pub fn bootstrap(&mut self) {
        self.persistence.load(&mut self.store);
        let markers = self.store.seed_markers();
        let filled = self.store.seed_defaults();
        if filled || self.store.seed_markers() != markers {
            self.persistence.save(&self.store);
        }
        info!(
            news = self.store.news().len(),
            glossary = self.store.glossary().len(),
            notes = self.store.notes().len(),
            resources = self.store.resources().len(),
            "Dashboard ready"
        );
        self.render_all();
    }

    /// The date used for defaults and relative dates.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.fixed_today.unwrap_or_else(model::today)
    }

    /// The domain store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The rendered regions.
    #[must_use]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// The persistence layer.
    #[must_use]
    pub fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    /// The whole page as a standalone HTML document.
    #[must_use]
    pub fn page(&self) -> String {
        page::page(&self.screen, &self.store)
    }

    // === Rendering ===

    /// Re-render every section and the sidebar.
    pub fn render_all(&mut self) {
        for collection in Collection::ALL {
            self.render_section(collection);
        }
        self.render_sidebar();
    }

    fn render_section(&mut self, collection: Collection) {
        let today = self.today();
        let filters = self.store.filters();
        let html = match collection {
            Collection::News => views::news_list(
                &filter_news(self.store.news(), &filters.news),
                self.store.annotations(),
                today,
            ),
            Collection::Glossary => format!(
                "{}{}",
                views::bucket_bar(filters.glossary.bucket),
                views::glossary_list(
                    &filter_glossary(self.store.glossary(), &filters.glossary),
                    &self.expanded
                )
            ),
            Collection::Notes => {
                views::notes_list(&filter_notes(self.store.notes(), &filters.notes), today)
            }
            Collection::Resources => views::resources_list(&filter_resources(
                self.store.resources(),
                &filters.resources,
            )),
        };
        *self.screen.region_mut(collection) = html;
    }

    fn render_sidebar(&mut self) {
        let stats = SidebarStats::collect(&self.store, self.tag_cloud_size);
        self.screen.sidebar = sidebar(&stats);
    }

    fn persist(&mut self) {
        self.persistence.save(&self.store);
    }

    fn notify(&mut self, notice: Notice) {
        debug!(kind = notice.kind.as_str(), "{}", notice.message);
        self.screen.notice = Some(notice);
    }

    fn fail(&mut self, err: &Error) {
        let message = match err {
            Error::Validation { message, .. } | Error::ImportPayload { message } => message.clone(),
            other => other.to_string(),
        };
        self.notify(Notice::error(message));
    }

    // === Navigation and filters ===

    /// Show another section. The sidebar breakdown follows it.
    pub fn switch_section(&mut self, collection: Collection) {
        self.store.set_active(collection);
        self.render_sidebar();
    }

    /// Apply search text to a section.
    pub fn set_search(&mut self, collection: Collection, text: &str) {
        self.store.set_search(collection, text);
        self.render_section(collection);
    }

    /// Apply a category selector value to a section. Ignored for notes.
    pub fn set_category(&mut self, collection: Collection, raw: &str) {
        if self.store.set_category(collection, CategoryFilter::parse(raw)) {
            self.render_section(collection);
        }
    }

    /// Apply a glossary bucket. Returns `false` for an unknown bucket
    /// value, which changes nothing.
    pub fn set_bucket(&mut self, raw: &str) -> bool {
        let Some(bucket) = Bucket::parse(raw) else {
            return false;
        };
        self.store.set_bucket(bucket);
        self.render_section(Collection::Glossary);
        true
    }

    /// Search for a tag from the tag cloud in the active section, or in
    /// news when the active section has no tag search.
    pub fn quick_search(&mut self, tag: &str) {
        let target = match self.store.active() {
            Collection::Glossary => Collection::News,
            other => other,
        };
        self.set_search(target, tag);
    }

    /// Apply a category from the sidebar breakdown to the active section.
    pub fn category_shortcut(&mut self, raw: &str) {
        self.set_category(self.store.active(), raw);
    }

    /// Open or close a glossary entry. Returns whether it is now open.
    pub fn toggle_glossary(&mut self, id: &str) -> bool {
        let open = if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.to_string());
            true
        };
        self.render_section(Collection::Glossary);
        open
    }

    // === Modals ===

    /// Open the create form of the active section.
    pub fn open_add(&mut self) {
        let kind = FormKind::from(self.store.active());
        match forms::open_form(&self.store, kind, None, self.today()) {
            Ok(modal) => self.screen.modal = Some(modal),
            Err(e) => self.fail(&e),
        }
    }

    /// Open the edit form of a record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if no record has `id`.
    pub fn open_edit(&mut self, collection: Collection, id: &str) -> Result<()> {
        let kind = FormKind::from(collection);
        let modal = forms::open_form(&self.store, kind, Some(id), self.today())?;
        self.screen.modal = Some(modal);
        Ok(())
    }

    /// Open the detail view of a news item or note.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if no such record exists, and a
    /// validation error for collections without a detail view.
    pub fn open_detail(&mut self, collection: Collection, id: &str) -> Result<()> {
        let not_found = || Error::RecordNotFound {
            collection: collection.as_str(),
            id: id.to_string(),
        };
        let today = self.today();
        let modal = match collection {
            Collection::News => {
                let item = self.store.get::<NewsItem>(id).ok_or_else(not_found)?;
                views::news_detail(item, self.store.annotation(id), today)
            }
            Collection::Notes => {
                let note = self.store.get::<Note>(id).ok_or_else(not_found)?;
                views::note_detail(note, today)
            }
            Collection::Glossary | Collection::Resources => {
                return Err(Error::validation(
                    "collection",
                    format!("{collection} records have no detail view"),
                ))
            }
        };
        self.screen.modal = Some(modal);
        Ok(())
    }

    /// Open the bulk import dialog.
    pub fn open_import(&mut self) {
        self.screen.modal = Some(forms::import_form());
    }

    /// Close any open modal.
    pub fn close_modal(&mut self) {
        self.screen.modal = None;
    }

    // === Mutations ===

    /// Submit a create or edit form.
    ///
    /// On success the modal closes and a confirmation is shown. On failure
    /// an error notice is shown, the modal stays open and nothing changes.
    ///
    /// # Errors
    ///
    /// Returns the validation or lookup error from [`forms::submit`].
    pub fn submit_form(
        &mut self,
        kind: FormKind,
        edit_id: Option<&str>,
        input: &FormInput,
    ) -> Result<Submitted> {
        let today = self.today();
        let submitted = match forms::submit(&mut self.store, kind, edit_id, input, today) {
            Ok(submitted) => submitted,
            Err(e) => {
                self.fail(&e);
                return Err(e);
            }
        };
        self.persist();
        self.render_section(kind.collection());
        self.render_sidebar();
        self.close_modal();
        self.notify(Notice::success(kind.saved_message(submitted.outcome)));
        Ok(submitted)
    }

    /// Delete a record. Returns whether it existed.
    pub fn delete(&mut self, collection: Collection, id: &str) -> bool {
        let removed = self.store.delete(collection, id);
        if removed {
            self.expanded.remove(id);
            self.persist();
            self.render_section(collection);
            self.render_sidebar();
        }
        self.close_modal();
        self.notify(Notice::info(DELETED));
        removed
    }

    /// Save the annotation of a news item. Empty text removes it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if no news item has `news_id`.
    pub fn save_annotation(&mut self, news_id: &str, text: &str) -> Result<()> {
        if !self.store.contains(Collection::News, news_id) {
            return Err(Error::RecordNotFound {
                collection: Collection::News.as_str(),
                id: news_id.to_string(),
            });
        }
        self.store.set_annotation(news_id, text);
        self.persist();
        self.render_section(Collection::News);
        self.notify(Notice::success(ANNOTATION_SAVED));
        Ok(())
    }

    /// Remove all news and annotations.
    pub fn clear_news(&mut self) {
        self.store.clear_news();
        self.persist();
        self.render_section(Collection::News);
        self.render_sidebar();
        self.notify(Notice::info(NEWS_CLEARED));
    }

    /// Import payload text. Returns the number of news items added.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ImportPayload`] when the text is not a JSON array
    /// or object; nothing changes and the dialog stays open.
    pub fn import_text(&mut self, text: &str) -> Result<usize> {
        match import::parse_payload(text) {
            Ok(batch) => Ok(self.import_values(&batch)),
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    /// Import already parsed candidates. Returns the number added.
    pub fn import_values(&mut self, batch: &[Value]) -> usize {
        let today = self.today();
        let added = import::import_news(&mut self.store, batch, today);
        self.persist();
        self.render_section(Collection::News);
        self.render_sidebar();
        self.close_modal();
        if added > 0 {
            self.notify(Notice::success(format!("{added}개 뉴스 추가됨")));
        } else {
            self.notify(Notice::info(NOTHING_IMPORTED));
        }
        added
    }
}
