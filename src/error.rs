/// Crate-level error types for frost diagnostics.
use std::path::PathBuf;

/// All errors in frost carry enough context to produce a useful diagnostic
/// without a debugger. Each variant names the file, identifier, or reason for failure.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Config file `extends` chain forms a cycle.
    #[error("config cycle detected: {}", chain.iter().map(|p| return p.display().to_string()).collect::<Vec<_>>().join(" -> "))]
    ConfigCycle {
        /// Ordered chain of config file paths forming the cycle.
        chain: Vec<PathBuf>,
    },

    /// A config file named by `extends` does not exist on disk.
    #[error("config not found: {}", path.display())]
    ConfigNotFound {
        /// Path to the missing config file.
        path: PathBuf,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// A content record exists but cannot be deserialized.
    #[error("parse failed: {}: {reason}", file.display())]
    ParseFailed {
        /// File that failed to parse.
        file: PathBuf,
        /// Description of the parse failure.
        reason: String,
    },

    /// TOML deserialization of `.frost.toml` failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// The protocol token of a flake identifier is not one frost can link to.
    #[error("unknown protocol \"{protocol}\" in flake uri \"{uri}\"")]
    UnsupportedProtocol {
        /// Protocol token as written before the first colon.
        protocol: String,
        /// The full flake identifier.
        uri: String,
    },
}
