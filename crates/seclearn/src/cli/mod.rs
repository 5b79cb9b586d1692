//! Command-line interface for seclearn.
//!
//! This module provides the CLI structure for the `seclearn` binary, the
//! output helpers of `list` and the line commands of the interactive shell.

mod commands;
pub mod output;
pub mod shell;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, AnnotateCommand, ClearNewsCommand, ConfigCommand, DeleteCommand, EditCommand,
    ImportCommand, ListCommand, OutputFormat, RenderCommand,
};

use crate::logging::Verbosity;

/// seclearn - Security learning dashboard
///
/// Keeps security news clippings, a glossary, study notes and curated
/// resources in a local database and renders them as one HTML page.
#[derive(Debug, Parser)]
#[command(name = "seclearn")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write the dashboard as an HTML page
    Render(RenderCommand),

    /// List the records of a collection
    List(ListCommand),

    /// Add a record through its form
    Add(AddCommand),

    /// Edit a record through its form
    Edit(EditCommand),

    /// Delete a record
    Delete(DeleteCommand),

    /// Save or remove the annotation of a news item
    Annotate(AnnotateCommand),

    /// Bulk import news items from JSON
    Import(ImportCommand),

    /// Remove all news items and annotations
    ClearNews(ClearNewsCommand),

    /// Interactive session with debounced search
    Shell,

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.verbose, self.quiet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Collection;
    use clap::CommandFactory;

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "seclearn");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_flags() {
        let cli = Cli::try_parse_from(["seclearn", "-vv", "shell"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Trace);

        let cli = Cli::try_parse_from(["seclearn", "-q", "-v", "shell"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_parse_render() {
        let cli =
            Cli::try_parse_from(["seclearn", "render", "-o", "out.html", "--section", "notes"])
                .unwrap();
        let Command::Render(render) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(render.output, Some(PathBuf::from("out.html")));
        assert_eq!(render.section, Some(Collection::Notes));
    }

    #[test]
    fn test_parse_list() {
        let cli = Cli::try_parse_from([
            "seclearn", "list", "glossary", "--bucket", "가", "--category", "attack", "-f",
            "json",
        ])
        .unwrap();
        let Command::List(list) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(list.collection, Collection::Glossary);
        assert_eq!(list.bucket.as_deref(), Some("가"));
        assert!(matches!(list.format, OutputFormat::Json));
    }

    #[test]
    fn test_parse_unknown_collection() {
        assert!(Cli::try_parse_from(["seclearn", "list", "inbox"]).is_err());
    }

    #[test]
    fn test_parse_add_fields() {
        let cli = Cli::try_parse_from([
            "seclearn",
            "add",
            "note",
            "--field",
            "title=Kerberos",
            "-f",
            "tags=AD, 인증",
        ])
        .unwrap();
        let Command::Add(add) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(add.collection, Collection::Notes);
        assert_eq!(add.fields, vec!["title=Kerberos", "tags=AD, 인증"]);
    }

    #[test]
    fn test_parse_edit_and_delete() {
        let cli = Cli::try_parse_from(["seclearn", "edit", "resources", "r_owasp", "-f", "url=x"])
            .unwrap();
        assert!(matches!(cli.command, Command::Edit(ref e) if e.id == "r_owasp"));

        let cli = Cli::try_parse_from(["seclearn", "delete", "news", "n1"]).unwrap();
        assert!(matches!(cli.command, Command::Delete(_)));
    }

    #[test]
    fn test_parse_import_stdin() {
        let cli = Cli::try_parse_from(["seclearn", "import", "-"]).unwrap();
        assert!(matches!(cli.command, Command::Import(ref i) if i.file == "-"));
    }

    #[test]
    fn test_parse_clear_news_unconfirmed_by_default() {
        let cli = Cli::try_parse_from(["seclearn", "clear-news"]).unwrap();
        assert!(matches!(cli.command, Command::ClearNews(ClearNewsCommand { yes: false })));
    }

    #[test]
    fn test_parse_with_config() {
        let args = vec!["seclearn", "-c", "/custom/config.toml", "config", "path"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert!(matches!(cli.command, Command::Config(ConfigCommand::Path)));
    }
}
