//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::model::Collection;

/// Render command arguments.
#[derive(Debug, Args)]
pub struct RenderCommand {
    /// Write the page here instead of the configured output (or stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Section shown when the page opens
    #[arg(short, long)]
    pub section: Option<Collection>,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Collection to list (news, glossary, notes, resources)
    pub collection: Collection,

    /// Search text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Category key, or "all"
    #[arg(long)]
    pub category: Option<String>,

    /// Glossary bucket: A-Z, one of 가 나 다 ... 하, or "all"
    #[arg(short, long)]
    pub bucket: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Collection to add to
    pub collection: Collection,

    /// Form field, repeatable (e.g. --field title=Log4Shell)
    #[arg(short, long = "field", value_name = "KEY=VALUE")]
    pub fields: Vec<String>,
}

/// Edit command arguments.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Collection of the record
    pub collection: Collection,

    /// Record id
    pub id: String,

    /// Changed form field, repeatable; other fields keep their values
    #[arg(short, long = "field", value_name = "KEY=VALUE")]
    pub fields: Vec<String>,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Collection of the record
    pub collection: Collection,

    /// Record id
    pub id: String,
}

/// Annotate command arguments.
#[derive(Debug, Args)]
pub struct AnnotateCommand {
    /// News item id
    pub news_id: String,

    /// Annotation text; empty removes the annotation
    pub text: String,
}

/// Import command arguments.
#[derive(Debug, Args)]
pub struct ImportCommand {
    /// JSON file to import, or "-" for stdin
    #[arg(value_name = "FILE")]
    pub file: String,
}

/// Clear-news command arguments.
#[derive(Debug, Args)]
pub struct ClearNewsCommand {
    /// Confirm removal of all news and annotations
    #[arg(long)]
    pub yes: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show configuration file path
    Path,

    /// Validate configuration file
    Validate {
        /// Path to config file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for list results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// One line per record
    #[default]
    Plain,
    /// JSON array of records
    Json,
}
