//! Flake identifier resolution: turn `<protocol>:<rest>` plus an optional
//! sub-path into a link to the upstream source.

use crate::error::Error;
use crate::types::FlakeProtocol;

/// Ref used for GitHub links when the identifier does not pin one.
const DEFAULT_GITHUB_REF: &str = "main";

/// Build a GitHub tree or blob link. `rest` is `<owner>/<repo>[/<ref>...]`.
/// A missing repo segment is left empty; an empty ref falls back to `main`.
/// `github:owner` is deliberately not an error: `UnsupportedProtocol` is the
/// resolver's only failure, so a malformed remainder still yields a link
/// (`https://github.com/owner//tree/main`) and the caller sees the gap.
fn github_link(rest: &str, sub_path: Option<&str>) -> String {
    let mut segments = rest.split('/');
    let owner = segments.next().unwrap_or_default();
    let repo = segments.next().unwrap_or_default();
    let joined_ref = segments.collect::<Vec<_>>().join("/");
    let git_ref = if joined_ref.is_empty() { DEFAULT_GITHUB_REF } else { joined_ref.as_str() };

    let base = format!("https://github.com/{owner}/{repo}");
    return match sub_path {
        Some(sub) => format!("{base}/blob/{git_ref}/{sub}"),
        None => format!("{base}/tree/{git_ref}"),
    };
}

/// Drop exactly one leading `/`. An empty result counts as no sub-path.
fn normalize_sub_path(sub_path: Option<&str>) -> Option<&str> {
    let sub = sub_path?;
    let stripped = sub.strip_prefix('/').unwrap_or(sub);
    if stripped.is_empty() {
        return None;
    }
    return Some(stripped);
}

/// Build a `file://` link. `rest` is used verbatim, colons and all.
fn path_link(rest: &str, sub_path: Option<&str>) -> String {
    return match sub_path {
        Some(sub) => format!("file://{rest}/{sub}"),
        None => format!("file://{rest}"),
    };
}

/// Resolve a flake identifier to a link, optionally pointing at a file inside it.
///
/// Only the first colon separates the protocol; everything after it is passed
/// to the protocol unchanged. The sub-path may carry one leading `/`.
///
/// # Errors
///
/// Returns `Error::UnsupportedProtocol` if the protocol token is not `path` or `github`.
pub fn resolve(uri: &str, sub_path: Option<&str>) -> Result<String, Error> {
    let (token, rest) = uri.split_once(':').unwrap_or((uri, ""));
    let sub_path = normalize_sub_path(sub_path);

    let Some(protocol) = FlakeProtocol::from_token(token) else {
        return Err(Error::UnsupportedProtocol {
            protocol: token.to_string(),
            uri: uri.to_string(),
        });
    };

    return Ok(match protocol {
        FlakeProtocol::GitHub => github_link(rest, sub_path),
        FlakeProtocol::Path => path_link(rest, sub_path),
    });
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "tests")]
mod tests {
    use super::*;

    #[test]
    fn path_with_sub_path() {
        let link = resolve("path:/home/user/project", Some("src/main.nix")).unwrap();
        assert_eq!(link, "file:///home/user/project/src/main.nix");
    }

    #[test]
    fn path_without_sub_path() {
        let link = resolve("path:/home/user/project", None).unwrap();
        assert_eq!(link, "file:///home/user/project");
    }

    #[test]
    fn path_keeps_colons_after_the_first() {
        let link = resolve("path:C:/Users/me/flake", Some("default.nix")).unwrap();
        assert_eq!(link, "file://C:/Users/me/flake/default.nix");
    }

    #[test]
    fn github_defaults_to_main_for_blob() {
        let link = resolve("github:owner/repo", Some("lib/x.nix")).unwrap();
        assert_eq!(link, "https://github.com/owner/repo/blob/main/lib/x.nix");
    }

    #[test]
    fn github_uses_pinned_ref() {
        let link = resolve("github:owner/repo/v2", Some("lib/x.nix")).unwrap();
        assert_eq!(link, "https://github.com/owner/repo/blob/v2/lib/x.nix");
    }

    #[test]
    fn github_ref_keeps_slashes() {
        let link = resolve("github:owner/repo/release/24.05", None).unwrap();
        assert_eq!(link, "https://github.com/owner/repo/tree/release/24.05");
    }

    #[test]
    fn github_without_sub_path_links_tree() {
        let link = resolve("github:owner/repo", None).unwrap();
        assert_eq!(link, "https://github.com/owner/repo/tree/main");
    }

    #[test]
    fn github_trailing_slash_falls_back_to_main() {
        let link = resolve("github:owner/repo/", None).unwrap();
        assert_eq!(link, "https://github.com/owner/repo/tree/main");
    }

    #[test]
    fn github_missing_repo_is_left_empty() {
        let link = resolve("github:owner", None).unwrap();
        assert_eq!(link, "https://github.com/owner//tree/main");
    }

    #[test]
    fn leading_separator_is_ignored() {
        for uri in ["path:/srv/flake", "github:owner/repo", "github:owner/repo/dev"] {
            for sub in ["lib/x.nix", "a", "nested/dir/file.nix"] {
                let with = resolve(uri, Some(format!("/{sub}").as_str())).unwrap();
                let without = resolve(uri, Some(sub)).unwrap();
                assert_eq!(with, without, "uri {uri} sub {sub}");
            }
        }
    }

    #[test]
    fn only_one_leading_separator_is_stripped() {
        let link = resolve("path:/srv/flake", Some("//lib/x.nix")).unwrap();
        assert_eq!(link, "file:///srv/flake//lib/x.nix");
    }

    #[test]
    fn empty_sub_path_counts_as_absent() {
        assert_eq!(resolve("github:o/r", Some("")).unwrap(), "https://github.com/o/r/tree/main");
        assert_eq!(resolve("path:/srv", Some("/")).unwrap(), "file:///srv");
    }

    #[test]
    fn unknown_protocol_is_rejected() {
        let err = resolve("svn:foo/bar", None).unwrap_err();
        match err {
            Error::UnsupportedProtocol { protocol, uri } => {
                assert_eq!(protocol, "svn");
                assert_eq!(uri, "svn:foo/bar");
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn identifier_without_colon_uses_whole_string_as_protocol() {
        let err = resolve("owner/repo", Some("x.nix")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedProtocol { protocol, .. } if protocol == "owner/repo"));
    }

    #[test]
    fn error_message_names_protocol_and_uri() {
        let err = resolve("git+https://example.com/repo", None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown protocol \"git+https\" in flake uri \"git+https://example.com/repo\""
        );
    }
}
