//! Error types for hono-registry-migrate.
//!
//! Every failure is fatal: the transformer never emits a partial batch, so
//! callers only ever see one of these or a complete document list.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for migration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while transforming a registry dump.
#[derive(Error, Debug)]
pub enum Error {
    /// Reading the dump or writing the output failed (MIGRATE-001).
    #[error("[MIGRATE-001] IO error on '{}': {source}", .path.display())]
    Io {
        /// File involved, `-` for standard streams.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Dump is not valid JSON (MIGRATE-002).
    #[error("[MIGRATE-002] Failed to parse dump: {0}")]
    Parse(#[source] serde_json::Error),

    /// Dump lacks a required key or has the wrong shape (MIGRATE-003).
    #[error("[MIGRATE-003] Schema error at {location}: {message}")]
    Schema {
        /// Where in the dump the problem was found.
        location: String,
        /// What was wrong.
        message: String,
    },

    /// Collection kind is not one of credentials, devices or tenants (MIGRATE-004).
    #[error("[MIGRATE-004] Unsupported collection '{0}' (expected credentials, devices or tenants)")]
    UnsupportedKind(String),

    /// Options are invalid or the options file cannot be read (MIGRATE-005).
    #[error("[MIGRATE-005] Configuration error: {0}")]
    Config(String),

    /// Rendering the output documents failed (MIGRATE-006).
    #[error("[MIGRATE-006] Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl Error {
    /// Returns the error code (e.g., "MIGRATE-003").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "MIGRATE-001",
            Self::Parse(_) => "MIGRATE-002",
            Self::Schema { .. } => "MIGRATE-003",
            Self::UnsupportedKind(_) => "MIGRATE-004",
            Self::Config(_) => "MIGRATE-005",
            Self::Serialization(_) => "MIGRATE-006",
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Builds a schema error from a failed typed deserialization.
    pub(crate) fn schema(location: impl Into<String>, err: &serde_json::Error) -> Self {
        Self::Schema {
            location: location.into(),
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Config(err.to_string())
    }
}
