//! Registry collection kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Kind of registry dump being transformed.
///
/// Selects the mapping applied by [`crate::RecordTransformer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    /// Per-tenant credential bundles.
    Credentials,
    /// Per-tenant device bundles.
    Devices,
    /// Flat list of tenant records.
    Tenants,
}

impl Collection {
    /// All collection kinds, in CLI order.
    pub const ALL: [Self; 3] = [Self::Credentials, Self::Devices, Self::Tenants];

    /// Literal used on the command line and in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Credentials => "credentials",
            Self::Devices => "devices",
            Self::Tenants => "tenants",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnsupportedKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_kinds() {
        assert_eq!("credentials".parse::<Collection>().unwrap(), Collection::Credentials);
        assert_eq!("devices".parse::<Collection>().unwrap(), Collection::Devices);
        assert_eq!("tenants".parse::<Collection>().unwrap(), Collection::Tenants);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        let err = "Devices".parse::<Collection>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedKind(ref k) if k == "Devices"));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let err = "gateways".parse::<Collection>().unwrap_err();
        assert_eq!(err.code(), "MIGRATE-004");
    }

    #[test]
    fn test_display_matches_cli_literal() {
        for kind in Collection::ALL {
            assert_eq!(kind.to_string().parse::<Collection>().unwrap(), kind);
        }
    }
}
