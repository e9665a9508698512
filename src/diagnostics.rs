use std::fmt::Write as _;

use crate::error::Error;
use crate::types::FlakeProtocol;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened and, where there is one,
/// how to fix it.
pub fn render_error(e: &Error) -> String {
    match e {
        Error::UnsupportedProtocol { protocol, uri } => render_unsupported_protocol(protocol, uri),
        Error::ConfigCycle { chain } => render_config_cycle(chain),
        _ => render_generic(e),
    }
}

fn render_generic(e: &Error) -> String {
    match e {
        Error::ConfigNotFound { path } => format!("\
# Error: Config Not Found

`{}` does not exist.

## Fix

Check the `extends` path in your `.frost.toml`.
", path.display()),

        Error::ParseFailed { file, reason } => format!("\
# Error: Parse Failed

Could not parse content record `{}`: {reason}

## Fix

Every `lib` record needs `name`, `path` and `type`; `location` and `comment`
are optional.
", file.display()),

        Error::Io(e) => format!("\
# Error: I/O

{e}
"),
        Error::TomlDe(e) => format!("\
# Error: Invalid TOML

{e}
"),
        // Already handled in render_error, but need exhaustive match.
        _ => format!("\
# Error

{e}
"),
    }
}

fn render_config_cycle(chain: &[std::path::PathBuf]) -> String {
    let chain_str = chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ");

    format!(
        "\
# Error: Config Cycle Detected

Circular `extends` chain: {chain_str}

## Fix

Remove the circular `extends` reference in one of the config files.
"
    )
}

fn render_unsupported_protocol(protocol: &str, uri: &str) -> String {
    let mut out = format!("\
# Error: Unsupported Protocol

Flake uri `{uri}` uses protocol `{protocol}`, which frost cannot link to.

## Supported protocols

");
    for supported in FlakeProtocol::ALL {
        let _ = writeln!(out, "- `{}:`", supported.token());
    }

    out.push_str("\
\n## Fix

Set `flake` in `.frost.toml`, or pass `--flake`, using one of:

    path:/absolute/path/to/flake
    github:owner/repo[/ref]
");
    out
}
