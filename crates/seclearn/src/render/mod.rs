//! View renderer.
//!
//! Pure functions from filtered records to HTML fragments. The
//! [`Screen`] value holds the current fragment of every page region; the
//! dashboard replaces regions after each change and [`page::page`]
//! assembles them into a standalone document.

pub mod html;
pub mod page;
pub mod reldate;
pub mod sidebar;
pub mod views;

use serde::Serialize;

pub use html::escape;
pub use reldate::relative_date;
pub use sidebar::{CategoryCount, SidebarStats};

use crate::model::Collection;

/// An open modal dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Modal {
    /// Title text, unescaped.
    pub title: String,
    /// Body markup.
    pub body: String,
    /// Use the wide layout.
    pub wide: bool,
}

/// Kind of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    /// Something was saved.
    Success,
    /// Neutral information.
    Info,
    /// Something was rejected.
    Error,
}

impl NoticeKind {
    /// CSS class of the toast.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

/// A transient confirmation or error message. A new notice replaces the
/// previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Kind of notice.
    pub kind: NoticeKind,
    /// Message text.
    pub message: String,
}

impl Notice {
    /// A success notice.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    /// An informational notice.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    /// An error notice.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Rendered markup of every page region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Screen {
    /// News section content.
    pub news: String,
    /// Glossary section content, bucket bar included.
    pub glossary: String,
    /// Notes section content.
    pub notes: String,
    /// Resources section content.
    pub resources: String,
    /// Sidebar content.
    pub sidebar: String,
    /// The open modal, if any.
    pub modal: Option<Modal>,
    /// The current toast, if any.
    pub notice: Option<Notice>,
}

impl Screen {
    /// The content region of a section.
    #[must_use]
    pub fn region(&self, collection: Collection) -> &str {
        match collection {
            Collection::News => &self.news,
            Collection::Glossary => &self.glossary,
            Collection::Notes => &self.notes,
            Collection::Resources => &self.resources,
        }
    }

    /// Mutable access to the content region of a section.
    pub fn region_mut(&mut self, collection: Collection) -> &mut String {
        match collection {
            Collection::News => &mut self.news,
            Collection::Glossary => &mut self.glossary,
            Collection::Notes => &mut self.notes,
            Collection::Resources => &mut self.resources,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_constructors() {
        assert_eq!(Notice::success("ok").kind, NoticeKind::Success);
        assert_eq!(Notice::info("hm").kind, NoticeKind::Info);
        assert_eq!(Notice::error("no").message, "no");
        assert_eq!(NoticeKind::Error.as_str(), "error");
    }

    #[test]
    fn test_screen_regions() {
        let mut screen = Screen::default();
        *screen.region_mut(Collection::Notes) = "notes".to_string();
        assert_eq!(screen.region(Collection::Notes), "notes");
        assert_eq!(screen.region(Collection::News), "");
    }
}
