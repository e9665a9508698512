//! Core CLI commands for frost: link, strip, list, info.

use std::path::PathBuf;
use std::process::ExitCode;

use serde::Serialize;

use crate::config;
use crate::content;
use crate::diagnostics;
use crate::error;
use crate::resolver;
use crate::store;
use crate::types::{Collection, LibEntry};

/// A `lib` record prepared for display.
#[derive(Debug, Serialize, PartialEq, Eq)]
struct EntryRow {
    /// Doc comment, as written.
    comment: Option<String>,
    /// Link to the definition in its flake, when one could be built.
    link: Option<String>,
    /// `<path>:<line>:<column>` with the store prefix removed.
    location: Option<String>,
    /// Dotted attribute path.
    name: String,
    /// Rendered type signature.
    #[serde(rename = "type")]
    signature: String,
}

/// Build the display row for one record. The link error, if any, is returned
/// beside the row so the record is still listed.
fn build_entry_row(entry: &LibEntry, flake: Option<&str>) -> (EntryRow, Option<error::Error>) {
    let source = entry
        .location
        .as_ref()
        .map(|loc| return (store::strip_store_path(&loc.file), loc.line, loc.column));

    let mut failure = None;
    let link = match (flake, &source) {
        (Some(uri), Some((file, _, _))) => match resolver::resolve(uri, Some(file.as_str())) {
            Err(e) => {
                failure = Some(e);
                None
            },
            Ok(link) => Some(link),
        },
        _ => None,
    };

    let row = EntryRow {
        comment: entry.comment.clone(),
        link,
        location: source.map(|(file, line, column)| return format!("{file}:{line}:{column}")),
        name: entry.qualified_name(),
        signature: entry.signature.clone(),
    };
    return (row, failure);
}

/// Output the frost reference document.
pub fn info(json: bool) {
    return crate::info::run(json);
}

/// Resolve a flake identifier and print the link.
///
/// # Errors
///
/// Returns `Error::UnsupportedProtocol` for unknown protocols.
pub fn link(uri: &str, path: Option<&str>) -> Result<(), error::Error> {
    let link = resolver::resolve(uri, path)?;
    println!("{link}");
    return Ok(());
}

/// Render every `lib` record with its display location and source link.
/// Exits 1 if any record could not be linked; the diagnostic is printed once.
///
/// # Errors
///
/// Returns errors from config loading or record parsing.
pub fn list(flake: Option<String>, json: bool) -> Result<ExitCode, error::Error> {
    let root = PathBuf::from(".");
    let config = config::Config::load(&root)?.with_flake_override(flake);
    let records: Vec<LibEntry> = content::load_collection(&config.content, Collection::Lib)?;

    let mut rows = Vec::with_capacity(records.len());
    let mut first_failure = None;
    let mut unlinked = 0_usize;
    for record in &records {
        let (row, failure) = build_entry_row(record, config.flake.as_deref());
        if let Some(e) = failure {
            unlinked = unlinked.saturating_add(1);
            if first_failure.is_none() {
                first_failure = Some(e);
            }
        }
        rows.push(row);
    }

    if json {
        // serde_json::to_string_pretty won't fail on this structure.
        println!("{}", serde_json::to_string_pretty(&rows).unwrap_or_default());
    } else {
        print_rows(&rows);
    }

    let total = rows.len();
    eprintln!("Listed {total} entries from {}", config.content.join(Collection::Lib.dir_name()).display());

    let Some(failure) = first_failure else {
        return Ok(ExitCode::SUCCESS);
    };
    diagnostics::print_error(&failure);
    eprintln!("{unlinked} entries could not be linked");
    return Ok(ExitCode::from(1));
}

/// Print rows as plain text: signature line, then summary, location and link indented.
fn print_rows(rows: &[EntryRow]) {
    for row in rows {
        println!("{} :: {}", row.name, row.signature);
        if let Some(summary) = row.comment.as_deref().and_then(|c| return c.lines().next()) {
            println!("  {summary}");
        }
        if let Some(location) = &row.location {
            println!("  {location}");
        }
        if let Some(link) = &row.link {
            println!("  {link}");
        }
    }
    return;
}

/// Print a path with its store prefix removed.
pub fn strip(path: &str) {
    println!("{}", store::strip_store_path(path));
    return;
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "tests")]
mod tests {
    use super::*;
    use crate::types::SourceLocation;

    /// A record defined in a store-path source tree.
    fn entry() -> LibEntry {
        return LibEntry {
            comment: Some("Map then concatenate.".to_string()),
            location: Some(SourceLocation {
                column: 3,
                file: format!("/nix/store/{}-source/lib/lists.nix", "x".repeat(32)),
                line: 12,
            }),
            name: "concatMap".to_string(),
            path: vec!["lib".to_string(), "lists".to_string(), "concatMap".to_string()],
            signature: "(a -> [b]) -> [a] -> [b]".to_string(),
        };
    }

    #[test]
    fn row_links_into_github() {
        let (row, failure) = build_entry_row(&entry(), Some("github:owner/repo/v1"));
        assert!(failure.is_none());
        assert_eq!(row.name, "lib.lists.concatMap");
        assert_eq!(row.location.as_deref(), Some("/lib/lists.nix:12:3"));
        assert_eq!(
            row.link.as_deref(),
            Some("https://github.com/owner/repo/blob/v1/lib/lists.nix")
        );
    }

    #[test]
    fn row_without_flake_has_no_link() {
        let (row, failure) = build_entry_row(&entry(), None);
        assert!(failure.is_none());
        assert_eq!(row.link, None);
        assert!(row.location.is_some());
    }

    #[test]
    fn row_without_location_has_no_link() {
        let mut unlocated = entry();
        unlocated.location = None;
        let (row, failure) = build_entry_row(&unlocated, Some("path:/srv/flake"));
        assert!(failure.is_none());
        assert_eq!(row.link, None);
        assert_eq!(row.location, None);
    }

    #[test]
    fn unsupported_flake_keeps_row() {
        let (row, failure) = build_entry_row(&entry(), Some("gitlab:owner/repo"));
        assert!(matches!(failure, Some(error::Error::UnsupportedProtocol { .. })));
        assert_eq!(row.link, None);
        assert_eq!(row.name, "lib.lists.concatMap");
    }

    #[test]
    fn row_serializes_signature_as_type() {
        let (row, _) = build_entry_row(&entry(), Some("path:/srv/flake"));
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["type"], "(a -> [b]) -> [a] -> [b]");
        assert_eq!(value["link"], "file:///srv/flake/lib/lists.nix");
    }
}
