//! `seclearn` - a local dashboard for learning security
//!
//! Four collections (news clippings, a glossary, study notes and curated
//! resources) live in a [`Store`], are saved through
//! [`storage::Persistence`] and are rendered to HTML by [`render`]. The
//! [`Dashboard`] ties these together and exposes every user action.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod dashboard;
pub mod debounce;
pub mod error;
pub mod filter;
pub mod forms;
pub mod import;
pub mod logging;
pub mod model;
pub mod render;
pub mod seed;
pub mod storage;
pub mod store;

pub use config::Config;
pub use dashboard::Dashboard;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use model::{Collection, GlossaryEntry, NewsItem, Note, Resource};
pub use store::Store;
