//! Line commands of the interactive shell.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::model::Collection;

/// Help text printed by `help`.
pub const HELP: &str = "\
section <news|glossary|notes|resources>   switch section
search <text>                             search the active section (debounced)
category <key|all>                        category filter of the active section
bucket <letter|all>                       glossary alphabet bucket
tag <tag>                                 quick search from the tag cloud
toggle <glossary-id>                      expand or collapse a glossary entry
show <collection> <id>                    open a news item or note
delete <collection> <id>                  delete a record
annotate <news-id> <text>                 save a news annotation
clear-news yes                            remove all news and annotations
list                                      list the active section
render <file>                             write the page to a file
help                                      this text
quit                                      leave the shell";

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Blank line.
    Nothing,
    /// Switch section.
    Section(Collection),
    /// Search text for the active section.
    Search(String),
    /// Category filter value.
    Category(String),
    /// Glossary bucket value.
    Bucket(String),
    /// Tag cloud quick search.
    Tag(String),
    /// Toggle a glossary entry.
    Toggle(String),
    /// Open a detail view.
    Show(Collection, String),
    /// Delete a record.
    Delete(Collection, String),
    /// Save an annotation.
    Annotate(String, String),
    /// Clear all news, confirmed by `clear-news yes`.
    ClearNews,
    /// List the active section.
    List,
    /// Write the page.
    Render(PathBuf),
    /// Print help.
    Help,
    /// Leave.
    Quit,
}

fn usage(message: &str) -> Error {
    Error::validation("command", message)
}

fn collection_and_id(rest: &str, usage_text: &str) -> Result<(Collection, String)> {
    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(collection), Some(id), None) => Ok((collection.parse()?, id.to_string())),
        _ => Err(usage(usage_text)),
    }
}

impl ShellCommand {
    /// Parse one input line.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unknown command or missing
    /// arguments.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(w, r)| (w, r.trim()));

        let command = match word {
            "" => Self::Nothing,
            "section" => Self::Section(rest.parse()?),
            // An empty search clears the filter.
            "search" => Self::Search(rest.to_string()),
            "category" if !rest.is_empty() => Self::Category(rest.to_string()),
            "bucket" if !rest.is_empty() => Self::Bucket(rest.to_string()),
            "tag" if !rest.is_empty() => Self::Tag(rest.to_string()),
            "toggle" if !rest.is_empty() => Self::Toggle(rest.to_string()),
            "show" => {
                let (collection, id) = collection_and_id(rest, "usage: show <collection> <id>")?;
                Self::Show(collection, id)
            }
            "delete" => {
                let (collection, id) =
                    collection_and_id(rest, "usage: delete <collection> <id>")?;
                Self::Delete(collection, id)
            }
            "annotate" => match rest.split_once(char::is_whitespace) {
                Some((id, text)) => Self::Annotate(id.to_string(), text.trim().to_string()),
                None if !rest.is_empty() => Self::Annotate(rest.to_string(), String::new()),
                None => return Err(usage("usage: annotate <news-id> <text>")),
            },
            "clear-news" if rest == "yes" => Self::ClearNews,
            "clear-news" => {
                return Err(usage(
                    "usage: clear-news yes (removes every news item and annotation)",
                ))
            }
            "list" | "ls" => Self::List,
            "render" if !rest.is_empty() => Self::Render(PathBuf::from(rest)),
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            "category" | "bucket" | "tag" | "toggle" | "render" => {
                return Err(usage(&format!("usage: {word} <value>")))
            }
            other => return Err(usage(&format!("unknown command: {other} (try help)"))),
        };
        Ok(command)
    }
}
