//! Configuration types for hono-registry-migrate.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Tenants whose records are never migrated.
///
/// These are the built-in tenants of the file-based registry; the target
/// registry provisions its own.
pub const DEFAULT_IGNORED_TENANTS: [&str; 2] = ["DEFAULT_TENANT", "HTTP_TENANT"];

const MAX_INDENT: usize = 16;

/// Options controlling a transformation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformOptions {
    /// Tenant identifiers excluded from the output.
    #[serde(default = "default_ignored_tenants")]
    pub ignored_tenants: Vec<String>,
    /// Number of spaces per indentation level of the rendered JSON.
    #[serde(default = "default_indent")]
    pub indent: usize,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            ignored_tenants: default_ignored_tenants(),
            indent: default_indent(),
        }
    }
}

fn default_ignored_tenants() -> Vec<String> {
    DEFAULT_IGNORED_TENANTS.iter().map(|t| (*t).to_string()).collect()
}

fn default_indent() -> usize {
    4
}

impl TransformOptions {
    /// Load options from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read '{}': {}", path.display(), e))
        })?;
        let options: Self = serde_yaml::from_str(&content)?;
        Ok(options)
    }

    /// Validate the options.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.indent > MAX_INDENT {
            return Err(Error::Config(format!(
                "indent must be at most {MAX_INDENT}, got {}",
                self.indent
            )));
        }
        if let Some(empty) = self.ignored_tenants.iter().find(|t| t.trim().is_empty()) {
            return Err(Error::Config(format!(
                "ignored tenant identifiers cannot be blank, got {empty:?}"
            )));
        }
        Ok(())
    }

    /// Whether records of `tenant_id` are excluded.
    #[must_use]
    pub fn is_ignored(&self, tenant_id: &str) -> bool {
        self.ignored_tenants.iter().any(|t| t == tenant_id)
    }
}
