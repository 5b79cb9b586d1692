//! Form controller.
//!
//! Builds the create/edit modal for each record kind and turns a submitted
//! [`FormInput`] into a full replacement record. Validation is limited to
//! required fields; on failure the store is left untouched.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::model::{
    format_date, generate_id, parse_tags, Collection, Difficulty, GlossaryCategory, GlossaryEntry,
    NewsCategory, NewsItem, Note, Resource, ResourceCategory, Severity,
};
use crate::render::html::{escape, select_options};
use crate::render::Modal;
use crate::store::{Store, Upserted};

const TITLE_REQUIRED: &str = "제목을 입력하세요";
const TERM_REQUIRED: &str = "용어와 정의를 입력하세요";

/// Which editor a form belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    /// News item editor.
    News,
    /// Glossary entry editor.
    Glossary,
    /// Note editor.
    Note,
    /// Resource editor.
    Resource,
}

impl FormKind {
    /// The collection this form writes to.
    #[must_use]
    pub fn collection(self) -> Collection {
        match self {
            Self::News => Collection::News,
            Self::Glossary => Collection::Glossary,
            Self::Note => Collection::Notes,
            Self::Resource => Collection::Resources,
        }
    }

    /// Modal title.
    #[must_use]
    pub fn title(self, editing: bool) -> &'static str {
        match (self, editing) {
            (Self::News, false) => "뉴스 스크랩 추가",
            (Self::News, true) => "뉴스 수정",
            (Self::Glossary, false) => "용어 추가",
            (Self::Glossary, true) => "용어 수정",
            (Self::Note, false) => "새 학습 노트",
            (Self::Note, true) => "노트 수정",
            (Self::Resource, false) => "참고 자료 추가",
            (Self::Resource, true) => "자료 수정",
        }
    }

    /// Confirmation shown after a successful submit.
    #[must_use]
    pub fn saved_message(self, outcome: Upserted) -> &'static str {
        match (self, outcome) {
            (Self::News, Upserted::Created) => "뉴스 추가됨",
            (Self::News, Upserted::Updated) => "뉴스 수정됨",
            (Self::Glossary, Upserted::Created) => "용어 추가됨",
            (Self::Glossary, Upserted::Updated) => "용어 수정됨",
            (Self::Note, Upserted::Created) => "노트 저장됨",
            (Self::Note, Upserted::Updated) => "노트 수정됨",
            (Self::Resource, Upserted::Created) => "자료 추가됨",
            (Self::Resource, Upserted::Updated) => "자료 수정됨",
        }
    }
}

impl From<Collection> for FormKind {
    fn from(collection: Collection) -> Self {
        match collection {
            Collection::News => Self::News,
            Collection::Glossary => Self::Glossary,
            Collection::Notes => Self::Note,
            Collection::Resources => Self::Resource,
        }
    }
}

/// Raw submitted field values keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    fields: BTreeMap<String, String>,
}

impl FormInput {
    /// An empty submission.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`FormInput::set`].
    #[must_use]
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.set(name, value);
        self
    }

    /// Set one field.
    pub fn set(&mut self, name: &str, value: &str) {
        self.fields.insert(name.to_string(), value.to_string());
    }

    /// Trimmed value of a field, empty when absent.
    #[must_use]
    pub fn get(&self, name: &str) -> &str {
        self.fields.get(name).map_or("", |v| v.trim())
    }

    /// Parse `name=value` assignments, later ones overriding earlier ones.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an assignment without `=` or with an
    /// empty name.
    pub fn parse_assignments<I, S>(mut self, assignments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for assignment in assignments {
            let assignment = assignment.as_ref();
            match assignment.split_once('=') {
                Some((name, value)) if !name.trim().is_empty() => {
                    self.set(name.trim(), value);
                }
                _ => {
                    return Err(Error::validation(
                        "field",
                        format!("expected name=value, got {assignment:?}"),
                    ))
                }
            }
        }
        Ok(self)
    }

    /// The values an edit form starts with for an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if no record has `id`.
    pub fn prefill(store: &Store, kind: FormKind, id: &str) -> Result<Self> {
        let not_found = || Error::RecordNotFound {
            collection: kind.collection().as_str(),
            id: id.to_string(),
        };

        let input = match kind {
            FormKind::News => {
                let n = store.get::<NewsItem>(id).ok_or_else(not_found)?;
                Self::new()
                    .with("title", &n.title)
                    .with("summary", &n.summary)
                    .with("category", n.category.as_str())
                    .with("severity", n.severity.as_str())
                    .with("source", &n.source)
                    .with("date", &n.date)
                    .with("url", &n.url)
                    .with("tags", &n.tags.join(", "))
            }
            FormKind::Glossary => {
                let g = store.get::<GlossaryEntry>(id).ok_or_else(not_found)?;
                Self::new()
                    .with("term", &g.term)
                    .with("eng", &g.eng)
                    .with("category", g.category.as_str())
                    .with("difficulty", g.difficulty.as_str())
                    .with("definition", &g.definition)
                    .with("example", &g.example)
                    .with("related", &g.related.join(", "))
            }
            FormKind::Note => {
                let n = store.get::<Note>(id).ok_or_else(not_found)?;
                Self::new()
                    .with("title", &n.title)
                    .with("content", &n.content)
                    .with("tags", &n.tags.join(", "))
            }
            FormKind::Resource => {
                let r = store.get::<Resource>(id).ok_or_else(not_found)?;
                Self::new()
                    .with("title", &r.title)
                    .with("category", r.category.as_str())
                    .with("url", &r.url)
                    .with("description", &r.description)
                    .with("tags", &r.tags.join(", "))
            }
        };
        Ok(input)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormInput {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Outcome of a successful [`submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted {
    /// Id of the written record.
    pub id: String,
    /// Whether it was created or replaced.
    pub outcome: Upserted,
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() {
        default
    } else {
        value
    }
}

/// Validate a submission and write the resulting record.
///
/// `edit_id` selects an existing record to replace; `None` creates a new
/// one with a fresh id. `today` stamps dates that default to the current
/// day.
///
/// # Errors
///
/// Returns [`Error::Validation`] when a required field is empty and
/// [`Error::RecordNotFound`] when `edit_id` names no record. The store is
/// unchanged in both cases.
pub fn submit(
    store: &mut Store,
    kind: FormKind,
    edit_id: Option<&str>,
    input: &FormInput,
    today: NaiveDate,
) -> Result<Submitted> {
    let today = format_date(today);

    if let Some(id) = edit_id {
        if !store.contains(kind.collection(), id) {
            return Err(Error::RecordNotFound {
                collection: kind.collection().as_str(),
                id: id.to_string(),
            });
        }
    }
    let id = edit_id.map_or_else(
        || generate_id(kind.collection().id_prefix()),
        str::to_string,
    );

    let outcome = match kind {
        FormKind::News => {
            let title = input.get("title");
            if title.is_empty() {
                return Err(Error::validation("title", TITLE_REQUIRED));
            }
            store.upsert(NewsItem {
                id: id.clone(),
                title: title.to_string(),
                summary: input.get("summary").to_string(),
                category: NewsCategory::from(or_default(input.get("category"), "other")),
                severity: Severity::from(or_default(input.get("severity"), "info")),
                source: input.get("source").to_string(),
                url: input.get("url").to_string(),
                date: or_default(input.get("date"), &today).to_string(),
                tags: parse_tags(input.get("tags")),
            })
        }
        FormKind::Glossary => {
            let term = input.get("term");
            let definition = input.get("definition");
            if term.is_empty() {
                return Err(Error::validation("term", TERM_REQUIRED));
            }
            if definition.is_empty() {
                return Err(Error::validation("definition", TERM_REQUIRED));
            }
            store.upsert(GlossaryEntry {
                id: id.clone(),
                term: term.to_string(),
                eng: input.get("eng").to_string(),
                category: GlossaryCategory::from(or_default(input.get("category"), "concept")),
                difficulty: Difficulty::from(or_default(input.get("difficulty"), "beginner")),
                definition: definition.to_string(),
                example: input.get("example").to_string(),
                related: parse_tags(input.get("related")),
            })
        }
        FormKind::Note => {
            let title = input.get("title");
            if title.is_empty() {
                return Err(Error::validation("title", TITLE_REQUIRED));
            }
            let created = store
                .get::<Note>(&id)
                .map_or_else(|| today.clone(), |n| n.date.clone());
            store.upsert(Note {
                id: id.clone(),
                title: title.to_string(),
                content: input.get("content").to_string(),
                tags: parse_tags(input.get("tags")),
                date: or_default(&created, &today).to_string(),
                updated: today.clone(),
            })
        }
        FormKind::Resource => {
            let title = input.get("title");
            if title.is_empty() {
                return Err(Error::validation("title", TITLE_REQUIRED));
            }
            store.upsert(Resource {
                id: id.clone(),
                title: title.to_string(),
                category: ResourceCategory::from(or_default(input.get("category"), "docs")),
                url: input.get("url").to_string(),
                description: input.get("description").to_string(),
                tags: parse_tags(input.get("tags")),
                date: today.clone(),
            })
        }
    };

    Ok(Submitted { id, outcome })
}

// === Markup ===

fn text_input(out: &mut String, name: &str, label: &str, value: &str, placeholder: &str) {
    let _ = write!(
        out,
        r#"<div class="form-group"><label class="form-label" for="f-{name}">{}</label><input class="form-input" id="f-{name}" name="{name}" value="{}" placeholder="{}" /></div>"#,
        escape(label),
        escape(value),
        escape(placeholder)
    );
}

fn textarea(out: &mut String, name: &str, label: &str, value: &str, placeholder: &str) {
    let _ = write!(
        out,
        r#"<div class="form-group"><label class="form-label" for="f-{name}">{}</label><textarea class="form-textarea" id="f-{name}" name="{name}" placeholder="{}">{}</textarea></div>"#,
        escape(label),
        escape(placeholder),
        escape(value)
    );
}

fn select(out: &mut String, name: &str, label: &str, options: &[(&str, &str)], selected: &str) {
    let _ = write!(
        out,
        r#"<div class="form-group"><label class="form-label" for="f-{name}">{}</label><select class="form-select" id="f-{name}" name="{name}">{}</select></div>"#,
        escape(label),
        select_options(options, selected)
    );
}

/// Render the editor for `kind`, pre-filled from `edit_id` when editing.
///
/// # Errors
///
/// Returns [`Error::RecordNotFound`] if `edit_id` names no record.
pub fn open_form(
    store: &Store,
    kind: FormKind,
    edit_id: Option<&str>,
    today: NaiveDate,
) -> Result<Modal> {
    let input = match edit_id {
        Some(id) => FormInput::prefill(store, kind, id)?,
        None => FormInput::new(),
    };
    let v = |name: &str| input.get(name).to_string();

    let mut body = String::new();
    match kind {
        FormKind::News => {
            text_input(&mut body, "title", "제목 *", &v("title"), "뉴스 제목");
            textarea(&mut body, "summary", "요약 / 내용", &v("summary"), "뉴스 요약 또는 내용");
            select(
                &mut body,
                "category",
                "카테고리",
                NewsCategory::OPTIONS,
                or_default(&v("category"), "cve"),
            );
            select(
                &mut body,
                "severity",
                "심각도",
                Severity::OPTIONS,
                or_default(&v("severity"), "critical"),
            );
            text_input(&mut body, "source", "출처", &v("source"), "NVD, KISA, ...");
            let date = or_default(&v("date"), &format_date(today)).to_string();
            text_input(&mut body, "date", "날짜", &date, "YYYY-MM-DD");
            text_input(&mut body, "url", "원문 URL", &v("url"), "https://...");
            text_input(&mut body, "tags", "태그 (쉼표 구분)", &v("tags"), "예: CVE, 랜섬웨어, Log4j");
        }
        FormKind::Glossary => {
            text_input(&mut body, "term", "용어 (한글) *", &v("term"), "예: 버퍼 오버플로우");
            text_input(&mut body, "eng", "영문명", &v("eng"), "Buffer Overflow");
            select(
                &mut body,
                "category",
                "카테고리",
                GlossaryCategory::OPTIONS,
                or_default(&v("category"), "attack"),
            );
            select(
                &mut body,
                "difficulty",
                "난이도",
                Difficulty::OPTIONS,
                or_default(&v("difficulty"), "beginner"),
            );
            textarea(&mut body, "definition", "정의 *", &v("definition"), "용어에 대한 설명");
            textarea(&mut body, "example", "예시 / 코드", &v("example"), "예시 코드나 실제 사례");
            text_input(&mut body, "related", "관련 용어 (쉼표 구분)", &v("related"), "SQL Injection, XSS, ...");
        }
        FormKind::Note => {
            text_input(&mut body, "title", "제목 *", &v("title"), "노트 제목");
            textarea(
                &mut body,
                "content",
                "내용",
                &v("content"),
                "공부한 내용, 정리, 메모 등을 자유롭게 작성하세요...",
            );
            text_input(&mut body, "tags", "태그 (쉼표 구분)", &v("tags"), "태그1, 태그2, ...");
        }
        FormKind::Resource => {
            text_input(&mut body, "title", "제목 *", &v("title"), "자료 제목");
            select(
                &mut body,
                "category",
                "카테고리",
                ResourceCategory::OPTIONS,
                or_default(&v("category"), "course"),
            );
            text_input(&mut body, "url", "URL", &v("url"), "https://...");
            textarea(
                &mut body,
                "description",
                "설명",
                &v("description"),
                "이 자료에 대한 설명, 추천 이유 등",
            );
            text_input(&mut body, "tags", "태그 (쉼표 구분)", &v("tags"), "무료, 실습, 필수, ...");
        }
    }

    let form = format!(
        r#"<form class="record-form" data-collection="{collection}" data-id="{id}">{body}<div class="form-actions"><button type="button" class="btn btn-secondary" data-action="close-modal">취소</button><button type="submit" class="btn btn-primary">저장</button></div></form>"#,
        collection = kind.collection().as_str(),
        id = escape(edit_id.unwrap_or_default()),
    );

    Ok(Modal {
        title: kind.title(edit_id.is_some()).to_string(),
        body: form,
        wide: kind == FormKind::Note,
    })
}

/// The bulk import dialog: a JSON textarea and the accepted field list.
#[must_use]
pub fn import_form() -> Modal {
    let body = r#"<div class="form-group"><label class="form-label" for="import-json">JSON 데이터</label><textarea class="form-textarea code" id="import-json" name="payload" placeholder='[{"title": "뉴스 제목", "date": "2025-01-01", "tags": ["태그1"]}]'></textarea></div>
<div class="code-box">{
  "title":    "string (필수)",
  "summary":  "string",
  "category": "cve | vuln | breach | tools | policy | other",
  "severity": "critical | high | medium | low | info",
  "source":   "string",
  "url":      "string",
  "date":     "YYYY-MM-DD",
  "tags":     ["string"]
}</div>
<div class="form-actions"><button type="button" class="btn btn-secondary" data-action="close-modal">취소</button><button type="button" class="btn btn-primary" data-action="import-submit">가져오기</button></div>"#;

    Modal {
        title: "뉴스 가져오기".to_string(),
        body: body.to_string(),
        wide: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[test]
    fn test_form_input_trims_and_defaults_missing() {
        let input = FormInput::new().with("title", "  Log4Shell  ");
        assert_eq!(input.get("title"), "Log4Shell");
        assert_eq!(input.get("summary"), "");
    }

    #[test]
    fn test_parse_assignments() {
        let input = FormInput::new()
            .parse_assignments(["title=A=B", "tags=x, y", "title=C=D"])
            .unwrap();
        assert_eq!(input.get("title"), "C=D");
        assert_eq!(input.get("tags"), "x, y");

        let err = FormInput::new().parse_assignments(["oops"]).unwrap_err();
        assert!(err.is_validation());
        let err = FormInput::new().parse_assignments(["=x"]).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_news_requires_title() {
        let mut store = Store::new();
        let input = FormInput::new().with("title", "   ").with("summary", "s");
        let err = submit(&mut store, FormKind::News, None, &input, day()).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "제목을 입력하세요");
        assert!(store.news().is_empty());
    }

    #[test]
    fn test_news_defaults() {
        let mut store = Store::new();
        let input = FormInput::new()
            .with("title", "Patch Tuesday")
            .with("tags", "MS, , patch ");
        let saved = submit(&mut store, FormKind::News, None, &input, day()).unwrap();

        assert_eq!(saved.outcome, Upserted::Created);
        assert!(saved.id.starts_with('n'));
        let item = store.get::<NewsItem>(&saved.id).unwrap();
        assert_eq!(item.category, NewsCategory::Other);
        assert_eq!(item.severity, Severity::Info);
        assert_eq!(item.date, "2025-03-10");
        assert_eq!(item.tags, vec!["MS", "patch"]);
    }

    #[test]
    fn test_glossary_requires_term_and_definition() {
        let mut store = Store::new();
        let input = FormInput::new().with("term", "XSS");
        let err = submit(&mut store, FormKind::Glossary, None, &input, day()).unwrap_err();
        assert_eq!(err.to_string(), "용어와 정의를 입력하세요");

        let input = FormInput::new().with("definition", "d");
        assert!(submit(&mut store, FormKind::Glossary, None, &input, day()).is_err());
        assert!(store.glossary().is_empty());
    }

    #[test]
    fn test_glossary_defaults_and_append() {
        let mut store = Store::new();
        store.seed_defaults();
        let input = FormInput::new()
            .with("term", "샌드박스")
            .with("definition", "격리된 실행 환경")
            .with("related", "VM, 컨테이너");
        let saved = submit(&mut store, FormKind::Glossary, None, &input, day()).unwrap();

        let last = store.glossary().last().unwrap();
        assert_eq!(last.id, saved.id);
        assert!(saved.id.starts_with('g'));
        assert_eq!(last.category, GlossaryCategory::Concept);
        assert_eq!(last.difficulty, Difficulty::Beginner);
        assert_eq!(last.related, vec!["VM", "컨테이너"]);
    }

    #[test]
    fn test_note_edit_keeps_created_date() {
        let mut store = Store::new();
        let created = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let input = FormInput::new().with("title", "T");
        let saved = submit(&mut store, FormKind::Note, None, &input, created).unwrap();
        assert!(saved.id.starts_with("note"));

        let input = FormInput::new().with("title", "T2").with("content", "body");
        let edited = submit(&mut store, FormKind::Note, Some(&saved.id), &input, day()).unwrap();
        assert_eq!(edited.outcome, Upserted::Updated);
        assert_eq!(edited.id, saved.id);

        let note = store.get::<Note>(&saved.id).unwrap();
        assert_eq!(note.title, "T2");
        assert_eq!(note.date, "2025-01-01");
        assert_eq!(note.updated, "2025-03-10");
        assert_eq!(store.notes().len(), 1);
    }

    #[test]
    fn test_resource_defaults_to_docs() {
        let mut store = Store::new();
        let input = FormInput::new().with("title", "Rust Book");
        let saved = submit(&mut store, FormKind::Resource, None, &input, day()).unwrap();
        let resource = store.get::<Resource>(&saved.id).unwrap();
        assert_eq!(resource.category, ResourceCategory::Docs);
        assert_eq!(resource.date, "2025-03-10");
        assert_eq!(store.resources()[0].id, saved.id);
    }

    #[test]
    fn test_edit_missing_record() {
        let mut store = Store::new();
        let input = FormInput::new().with("title", "x");
        let err = submit(&mut store, FormKind::News, Some("n404"), &input, day()).unwrap_err();
        assert!(matches!(err, Error::RecordNotFound { .. }));
        assert!(store.news().is_empty());
    }

    #[test]
    fn test_unknown_select_value_kept() {
        let mut store = Store::new();
        let input = FormInput::new()
            .with("title", "t")
            .with("category", "ransomware");
        let saved = submit(&mut store, FormKind::News, None, &input, day()).unwrap();
        let item = store.get::<NewsItem>(&saved.id).unwrap();
        assert_eq!(item.category.as_str(), "ransomware");
    }

    #[test]
    fn test_prefill_joins_tags() {
        let mut store = Store::new();
        store.seed_defaults();
        let input = FormInput::prefill(&store, FormKind::Resource, "r_owasp").unwrap();
        assert_eq!(input.get("tags"), "웹 보안, 필수, 무료");
        assert_eq!(input.get("category"), "docs");

        assert!(FormInput::prefill(&store, FormKind::Note, "missing").is_err());
    }

    #[test]
    fn test_open_form_create() {
        let store = Store::new();
        let modal = open_form(&store, FormKind::News, None, day()).unwrap();
        assert_eq!(modal.title, "뉴스 스크랩 추가");
        assert!(modal.body.contains(r#"name="title" value="""#));
        assert!(modal.body.contains(r#"name="date" value="2025-03-10""#));
        assert!(modal.body.contains(r#"data-collection="news" data-id="""#));
    }

    #[test]
    fn test_open_form_edit_prefills_escaped() {
        let mut store = Store::new();
        store.upsert(Note {
            id: "note1".to_string(),
            title: "<T>".to_string(),
            content: "a & b".to_string(),
            tags: vec!["x".to_string(), "y".to_string()],
            ..Note::default()
        });
        let modal = open_form(&store, FormKind::Note, Some("note1"), day()).unwrap();
        assert_eq!(modal.title, "노트 수정");
        assert!(modal.wide);
        assert!(modal.body.contains(r#"value="&lt;T&gt;""#));
        assert!(modal.body.contains("a &amp; b</textarea>"));
        assert!(modal.body.contains(r#"value="x, y""#));
    }

    #[test]
    fn test_open_form_glossary_selects() {
        let mut store = Store::new();
        store.seed_defaults();
        let modal = open_form(&store, FormKind::Glossary, Some("g_aes"), day()).unwrap();
        assert!(modal.body.contains(r#"<option value="crypto" selected>암호화</option>"#));
        assert!(modal.body.contains(r#"<option value="intermediate" selected>중급</option>"#));
    }

    #[test]
    fn test_import_form() {
        let modal = import_form();
        assert_eq!(modal.title, "뉴스 가져오기");
        assert!(modal.body.contains(r#"name="payload""#));
        assert!(modal.body.contains(r#"data-action="import-submit""#));
    }

    #[test]
    fn test_saved_messages() {
        assert_eq!(FormKind::Note.saved_message(Upserted::Created), "노트 저장됨");
        assert_eq!(FormKind::Resource.saved_message(Upserted::Updated), "자료 수정됨");
        assert_eq!(FormKind::from(Collection::Notes), FormKind::Note);
    }
}
