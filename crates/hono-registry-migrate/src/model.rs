//! Input records of the file-based registry and output documents of the
//! MongoDB-based registry.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// File-based registry dump
// =============================================================================

/// Tenant bundle of a credentials or devices dump, reduced to the item list
/// of the collection being migrated.
///
/// Only built for tenants that are not ignored, so malformed items of ignored
/// tenants never fail a run.
#[derive(Debug, Clone)]
pub struct TenantBundle {
    /// Tenant the items belong to.
    pub tenant: String,
    /// Raw items, empty when the bundle has no list for the collection.
    pub items: Vec<serde_json::Value>,
}

/// Credential item of a tenant bundle.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialItem {
    /// Device the credential authenticates.
    #[serde(rename = "device-id")]
    pub device_id: serde_json::Value,
    /// Authentication identity.
    #[serde(rename = "auth-id")]
    pub auth_id: serde_json::Value,
    /// Credential type, e.g. `hashed-password`.
    #[serde(rename = "type")]
    pub kind: serde_json::Value,
    /// Secrets, copied verbatim.
    pub secrets: serde_json::Value,
}

/// Device item of a tenant bundle.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceItem {
    /// Device identifier.
    #[serde(rename = "device-id")]
    pub device_id: serde_json::Value,
    /// Device registration data, copied verbatim.
    pub data: serde_json::Value,
}

/// Entry of a tenants dump.
#[derive(Debug, Clone, Deserialize)]
pub struct TenantRecord {
    /// Tenant identifier.
    #[serde(rename = "tenant-id")]
    pub tenant_id: String,
    /// Tenant configuration, copied as is when present (even `null`).
    #[serde(default = "empty_object")]
    pub tenant: serde_json::Value,
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

// =============================================================================
// MongoDB-based registry documents
// =============================================================================

/// Credentials document: one per credential item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialDocument {
    /// Owning tenant.
    #[serde(rename = "tenant-id")]
    pub tenant_id: String,
    /// Owning device.
    #[serde(rename = "device-id")]
    pub device_id: serde_json::Value,
    /// Document version.
    pub version: Uuid,
    /// Snapshot timestamp of the run.
    #[serde(rename = "updatedOn")]
    pub updated_on: String,
    /// Always exactly one entry.
    pub credentials: Vec<CredentialEntry>,
}

/// Credential embedded in a [`CredentialDocument`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialEntry {
    /// Authentication identity.
    #[serde(rename = "auth-id")]
    pub auth_id: serde_json::Value,
    /// Credential type.
    #[serde(rename = "type")]
    pub kind: serde_json::Value,
    /// Secrets copied from the dump.
    pub secrets: serde_json::Value,
    /// The file-based registry has no disabled state, so this is always `true`.
    pub enabled: bool,
}

/// Device document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceDocument {
    /// Owning tenant.
    #[serde(rename = "tenant-id")]
    pub tenant_id: String,
    /// Device identifier.
    #[serde(rename = "device-id")]
    pub device_id: serde_json::Value,
    /// Document version.
    pub version: Uuid,
    /// Snapshot timestamp of the run.
    #[serde(rename = "updatedOn")]
    pub updated_on: String,
    /// Registration data copied from the dump.
    pub device: serde_json::Value,
}

/// Tenant document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantDocument {
    /// Tenant identifier.
    #[serde(rename = "tenant-id")]
    pub tenant_id: String,
    /// Document version.
    pub version: Uuid,
    /// Snapshot timestamp of the run.
    #[serde(rename = "updatedOn")]
    pub updated_on: String,
    /// Tenant configuration, `{}` when the record had no `tenant` key.
    pub tenant: serde_json::Value,
}

/// Any output document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Document {
    /// From a credentials dump.
    Credential(CredentialDocument),
    /// From a devices dump.
    Device(DeviceDocument),
    /// From a tenants dump.
    Tenant(TenantDocument),
}

impl Document {
    /// Owning tenant of the document.
    #[must_use]
    pub fn tenant_id(&self) -> &str {
        match self {
            Self::Credential(doc) => &doc.tenant_id,
            Self::Device(doc) => &doc.tenant_id,
            Self::Tenant(doc) => &doc.tenant_id,
        }
    }

    /// Version assigned to the document.
    #[must_use]
    pub fn version(&self) -> Uuid {
        match self {
            Self::Credential(doc) => doc.version,
            Self::Device(doc) => doc.version,
            Self::Tenant(doc) => doc.version,
        }
    }

    /// Snapshot timestamp of the document.
    #[must_use]
    pub fn updated_on(&self) -> &str {
        match self {
            Self::Credential(doc) => &doc.updated_on,
            Self::Device(doc) => &doc.updated_on,
            Self::Tenant(doc) => &doc.updated_on,
        }
    }
}
