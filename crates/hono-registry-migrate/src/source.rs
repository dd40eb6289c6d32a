//! Where a registry dump is read from.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{Error, Result};

/// Source of a registry dump.
///
/// Loading consumes the source, so a dump is read at most once.
#[derive(Debug, Clone)]
pub enum DumpSource {
    /// JSON file exported by the file-based registry.
    File(PathBuf),
    /// Already parsed dump.
    Value(serde_json::Value),
}

impl DumpSource {
    /// Reads the whole dump into memory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be opened or read and
    /// [`Error::Parse`] if it is not valid JSON.
    pub fn load(self) -> Result<serde_json::Value> {
        match self {
            Self::File(path) => {
                debug!("Reading dump from {}", path.display());
                let file = File::open(&path).map_err(|e| Error::io(&path, e))?;
                let reader = BufReader::new(file);
                serde_json::from_reader(reader).map_err(|e| {
                    if e.is_io() {
                        Error::io(&path, e.into())
                    } else {
                        Error::Parse(e)
                    }
                })
            }
            Self::Value(value) => Ok(value),
        }
    }
}

impl From<PathBuf> for DumpSource {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

impl From<serde_json::Value> for DumpSource {
    fn from(value: serde_json::Value) -> Self {
        Self::Value(value)
    }
}
