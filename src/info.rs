use std::path::PathBuf;

use serde::Serialize;

use crate::config;
use crate::content;
use crate::types::{Collection, FlakeProtocol};

/// Output the comprehensive frost reference document.
pub fn run(json: bool) {
    let root = PathBuf::from(".");
    let state = gather_state(&root);

    if json {
        print_json(&state);
    } else {
        print_markdown(&state);
    }
}

// ── State gathering ───────────────────────────────────────────────────

struct CurrentState {
    /// Record count per collection, or why the collection could not be walked.
    collections: Vec<(&'static str, Result<usize, String>)>,
    /// Why `.frost.toml` could not be loaded.
    config_error: Option<String>,
    config_found: bool,
    content_root: Option<String>,
    flake: Option<String>,
}

fn gather_state(root: &std::path::Path) -> CurrentState {
    let config_found = root.join(config::CONFIG_FILE).exists();
    let (config, config_error) = match config::Config::load(root) {
        Ok(config) => (Some(config), None),
        Err(err) => (None, Some(err.to_string())),
    };

    let collections: Vec<(&'static str, Result<usize, String>)> = config
        .as_ref()
        .map(|c| {
            Collection::ALL
                .iter()
                .map(|&col| {
                    let count = content::count_records(&c.content, col).map_err(|e| e.to_string());
                    (col.dir_name(), count)
                })
                .collect()
        })
        .unwrap_or_default();

    CurrentState {
        collections,
        config_error,
        config_found,
        content_root: config.as_ref().map(|c| c.content.display().to_string()),
        flake: config.and_then(|c| c.flake),
    }
}

// ── Markdown output ───────────────────────────────────────────────────

fn print_markdown(state: &CurrentState) {
    let version = env!("CARGO_PKG_VERSION");
    print_markdown_header(version);
    print_markdown_state(state);
    println!();
    print_markdown_exit_codes();
}

fn print_markdown_header(version: &str) {
    print!(
        "\
# frost {version}

Turn flake identifiers and nix store paths from documentation records into
readable paths and links back to the source.

## Flake Identifiers

    path:/home/user/flake             file:///home/user/flake
    github:owner/repo                 https://github.com/owner/repo/tree/main
    github:owner/repo/v2              https://github.com/owner/repo/tree/v2

With a file inside the flake, GitHub links point at `blob/<ref>/<file>`.

## Commands

    frost link <uri> [file]           Print the link for a flake (and file)
    frost strip <path>                Remove the /nix/store/<hash>-<name> prefix
    frost list [--flake <uri>]        List lib records with locations and links
    frost info [--json]               Show this document

## Configuration (.frost.toml)

    flake = \"github:owner/repo\"       # where records link to
    content = \"src/content\"           # collection root
    extends = \"../.frost.toml\"        # inherit unset keys

## Current State

"
    );
}

fn print_markdown_state(state: &CurrentState) {
    if state.config_found {
        println!("Config:      .frost.toml (found)");
    } else {
        println!("Config:      .frost.toml (not found)");
    }

    match &state.flake {
        Some(flake) => println!("Flake:       {flake}"),
        None => println!("Flake:       (none)"),
    }

    match (&state.content_root, &state.config_error) {
        (Some(root), _) => println!("Content:     {root}"),
        (None, Some(reason)) => println!("Content:     (config invalid: {reason})"),
        (None, None) => println!("Content:     (config invalid)"),
    }

    let counts = state
        .collections
        .iter()
        .filter_map(|(name, count)| match count {
            Ok(0) => None,
            Ok(n) => Some(format!("{name} ({n})")),
            Err(reason) => Some(format!("{name} (unreadable: {reason})")),
        })
        .collect::<Vec<_>>();
    if counts.is_empty() {
        println!("Collections: (none)");
    } else {
        println!("Collections: {}", counts.join(", "));
    }
}

fn print_markdown_exit_codes() {
    print!(
        "\
## Exit Codes

| Code | Meaning |
|------|---------|
| 0    | Success |
| 1    | Some records could not be linked |
| 3    | Runtime error |
"
    );
}

// ── JSON output ───────────────────────────────────────────────────────

#[derive(Serialize)]
struct InfoJson {
    version: String,
    protocols: Vec<String>,
    exit_codes: Vec<ExitCodeInfo>,
    current_state: StateJson,
}

#[derive(Serialize)]
struct ExitCodeInfo {
    code: u8,
    meaning: String,
}

#[derive(Serialize)]
struct StateJson {
    config_error: Option<String>,
    config_found: bool,
    content_root: Option<String>,
    flake: Option<String>,
    collections: Vec<CollectionJson>,
}

#[derive(Serialize)]
struct CollectionJson {
    error: Option<String>,
    name: String,
    records: Option<usize>,
}

fn print_json(state: &CurrentState) {
    let info = InfoJson {
        version: env!("CARGO_PKG_VERSION").to_string(),
        protocols: FlakeProtocol::ALL.iter().map(|p| p.token().to_string()).collect(),
        exit_codes: vec![
            ExitCodeInfo { code: 0, meaning: "Success".to_string() },
            ExitCodeInfo { code: 1, meaning: "Some records could not be linked".to_string() },
            ExitCodeInfo { code: 3, meaning: "Runtime error".to_string() },
        ],
        current_state: StateJson {
            config_error: state.config_error.clone(),
            config_found: state.config_found,
            content_root: state.content_root.clone(),
            flake: state.flake.clone(),
            collections: state
                .collections
                .iter()
                .map(|(name, count)| CollectionJson {
                    error: count.as_ref().err().cloned(),
                    name: (*name).to_string(),
                    records: count.as_ref().ok().copied(),
                })
                .collect(),
        },
    };

    // serde_json::to_string_pretty won't fail on this structure.
    let json = serde_json::to_string_pretty(&info).unwrap_or_default();
    println!("{json}");
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "tests")]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_keeps_the_reason() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(config::CONFIG_FILE), "flake = [unclosed").unwrap();

        let state = gather_state(dir.path());
        assert!(state.config_found);
        assert!(state.content_root.is_none());
        assert!(state.collections.is_empty());
        let reason = state.config_error.unwrap();
        assert!(reason.starts_with("toml deserialize"), "unexpected reason: {reason}");
    }

    #[test]
    fn valid_config_has_no_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(config::CONFIG_FILE), "flake = \"github:o/r\"\n").unwrap();

        let state = gather_state(dir.path());
        assert_eq!(state.config_error, None);
        assert_eq!(state.flake.as_deref(), Some("github:o/r"));
        assert!(state.collections.iter().all(|(_, count)| *count == Ok(0)));
    }
}
