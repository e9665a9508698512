//! Store path normalization: hide the `/nix/store/<hash>-<name>` prefix that
//! evaluated source locations carry, leaving the path inside the source tree.

use std::sync::LazyLock;

use regex::Regex;

/// One store path segment: root, 32-character hash, hyphen, name up to the next `/`.
#[allow(clippy::expect_used, reason = "hardcoded pattern, compile-time invariant")]
static STORE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    return Regex::new(r"/nix/store/[0-9A-Za-z_]{32}-[^/]+").expect("valid regex");
});

/// Remove the first store path segment from `path`.
///
/// The match may start anywhere in the string. Only the leftmost occurrence is
/// spliced out; a second store path later in the same value is left alone.
/// Paths without a store segment are returned unchanged.
pub fn strip_store_path(path: &str) -> String {
    let mut stripped = path.to_string();
    if let Some(found) = STORE_PATH.find(path) {
        stripped.replace_range(found.range(), "");
    }
    return stripped;
}
