use std::path::{Path, PathBuf};

use crate::error::Error;

/// File name of the project config, looked up in the working directory.
pub const CONFIG_FILE: &str = ".frost.toml";

/// Content root used when no config sets one, relative to the project root.
const DEFAULT_CONTENT_DIR: &str = "src/content";

/// Project configuration loaded from `.frost.toml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding one subdirectory per content collection.
    pub content: PathBuf,
    /// Flake identifier the documented records come from.
    pub flake: Option<String>,
}

/// Raw TOML structure for `.frost.toml`.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct FrostTomlConfig {
    /// Content root, relative to the file that sets it.
    #[serde(default)]
    content: Option<String>,
    /// Parent config to inherit unset keys from, relative to this file.
    #[serde(default)]
    extends: Option<String>,
    /// Flake identifier.
    #[serde(default)]
    flake: Option<String>,
}

/// Values one config file contributes after its `extends` chain is applied.
struct Layer {
    /// Content root, already joined onto the declaring file's directory.
    content: Option<PathBuf>,
    /// Flake identifier.
    flake: Option<String>,
}

impl Config {
    /// Load config from `.frost.toml` in the given root directory.
    /// Returns defaults if the file doesn't exist. Returns an error if the
    /// file, or any file it extends, exists but is malformed.
    ///
    /// # Errors
    ///
    /// Returns `Error::TomlDe` if any TOML is malformed,
    /// `Error::ConfigNotFound` if an `extends` target is missing,
    /// `Error::ConfigCycle` if the `extends` chain loops,
    /// or `Error::Io` for other read failures.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE);
        let layer = match load_layer(&path, &mut Vec::new()) {
            Err(Error::ConfigNotFound { path: missing }) if missing == path => {
                return Ok(Self::defaults(root));
            },
            other => other?,
        };

        return Ok(Self {
            content: layer.content.unwrap_or_else(|| return root.join(DEFAULT_CONTENT_DIR)),
            flake: layer.flake,
        });
    }

    /// Default config: no flake, content under `src/content`.
    fn defaults(root: &Path) -> Self {
        return Self {
            content: root.join(DEFAULT_CONTENT_DIR),
            flake: None,
        };
    }

    /// Replace the configured flake when one was given on the command line.
    #[must_use]
    pub fn with_flake_override(self, flake: Option<String>) -> Self {
        return Self {
            flake: flake.or(self.flake),
            ..self
        };
    }
}

/// Read one config file and, recursively, the files it extends.
/// `chain` holds the canonical paths already visited, for cycle detection.
///
/// # Errors
///
/// Returns `Error::ConfigNotFound` if `path` doesn't exist,
/// `Error::ConfigCycle` if `path` was already visited,
/// `Error::TomlDe` if the content is malformed, or `Error::Io` otherwise.
fn load_layer(path: &Path, chain: &mut Vec<PathBuf>) -> Result<Layer, Error> {
    let text = match std::fs::read_to_string(path) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::ConfigNotFound { path: path.to_path_buf() });
        },
        Err(e) => return Err(Error::Io(e)),
        Ok(c) => c,
    };

    let canonical = std::fs::canonicalize(path)?;
    if chain.contains(&canonical) {
        chain.push(canonical);
        return Err(Error::ConfigCycle { chain: chain.clone() });
    }
    chain.push(canonical);

    let raw: FrostTomlConfig = toml::from_str(&text)?;
    let dir = path.parent().unwrap_or_else(|| return Path::new(""));
    let own = Layer {
        content: raw.content.map(|c| return dir.join(c)),
        flake: raw.flake,
    };

    let Some(parent) = raw.extends else {
        return Ok(own);
    };
    let inherited = load_layer(&dir.join(parent), chain)?;
    return Ok(Layer {
        content: own.content.or(inherited.content),
        flake: own.flake.or(inherited.flake),
    });
}
