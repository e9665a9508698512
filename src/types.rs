//! Core domain types for frost: flake protocols, collections, and content records.

/// Content collections the documentation site knows about.
/// Each collection lives in its own directory under the content root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    /// Flake apps.
    Apps,
    /// Library functions.
    Lib,
    /// Flake metadata.
    Meta,
    /// Module options.
    Options,
    /// Nixpkgs overlays.
    Overlays,
    /// Packages.
    Packages,
    /// Development shells.
    Shells,
}

/// Source protocols a flake identifier may use. The set is closed: any other
/// token is rejected by the resolver rather than guessed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlakeProtocol {
    /// `github:<owner>/<repo>[/<ref>]`
    GitHub,
    /// `path:<absolute path>`
    Path,
}

/// A record of the `lib` collection, as written by the documentation extractor.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct LibEntry {
    /// Doc comment attached to the definition.
    #[serde(default)]
    pub comment: Option<String>,
    /// Where the definition lives, if the extractor could tell.
    #[serde(default)]
    pub location: Option<SourceLocation>,
    /// Short name of the definition.
    pub name: String,
    /// Attribute path from the flake's `lib` root.
    pub path: Vec<String>,
    /// Rendered type signature.
    #[serde(rename = "type")]
    pub signature: String,
}

/// Position of a definition in its source file. `file` is usually a store path.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct SourceLocation {
    /// One-based column.
    pub column: u32,
    /// Path of the file as recorded by the evaluator.
    pub file: String,
    /// One-based line.
    pub line: u32,
}

impl Collection {
    /// Every known collection, in display order.
    pub const ALL: [Self; 7] = [
        Self::Apps,
        Self::Lib,
        Self::Meta,
        Self::Options,
        Self::Overlays,
        Self::Packages,
        Self::Shells,
    ];

    /// Directory name of the collection under the content root.
    pub const fn dir_name(self) -> &'static str {
        return match self {
            Self::Apps => "apps",
            Self::Lib => "lib",
            Self::Meta => "meta",
            Self::Options => "options",
            Self::Overlays => "overlays",
            Self::Packages => "packages",
            Self::Shells => "shells",
        };
    }
}

impl FlakeProtocol {
    /// Every supported protocol, used for diagnostics and `info` output.
    pub const ALL: [Self; 2] = [Self::GitHub, Self::Path];

    /// Map a protocol token to a known protocol. Matching is exact and case-sensitive.
    pub fn from_token(token: &str) -> Option<Self> {
        return match token {
            "github" => Some(Self::GitHub),
            "path" => Some(Self::Path),
            _ => None,
        };
    }

    /// The token written before the first colon of an identifier.
    pub const fn token(self) -> &'static str {
        return match self {
            Self::GitHub => "github",
            Self::Path => "path",
        };
    }
}

impl LibEntry {
    /// Dotted attribute path, falling back to the bare name for root entries.
    pub fn qualified_name(&self) -> String {
        if self.path.is_empty() {
            return self.name.clone();
        }
        return self.path.join(".");
    }
}
