//! Mapping of file-based registry dumps to MongoDB registry documents.

use std::io::Write;

use chrono::Utc;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, info};
use uuid::Uuid;

use crate::collection::Collection;
use crate::config::TransformOptions;
use crate::error::{Error, Result};
use crate::model::{
    CredentialDocument, CredentialEntry, CredentialItem, DeviceDocument, DeviceItem, Document,
    TenantBundle, TenantDocument, TenantRecord,
};
use crate::source::DumpSource;

/// `strftime` format of the `updatedOn` field.
pub const UPDATED_ON_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Counters of one transformation run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TransformStats {
    /// Top-level dump entries read (bundles or tenant records).
    pub entries: u64,
    /// Entries dropped because their tenant is ignored.
    pub skipped: u64,
    /// Documents produced.
    pub documents: u64,
}

/// Transforms one registry dump into MongoDB registry documents.
///
/// The `updatedOn` timestamp is captured once at construction and shared by
/// every document the transformer produces.
#[derive(Debug)]
pub struct RecordTransformer {
    source: DumpSource,
    mapper: DumpMapper,
}

/// Everything a mapping needs besides the dump itself.
#[derive(Debug)]
struct DumpMapper {
    collection: Collection,
    options: TransformOptions,
    updated_on: String,
}

impl RecordTransformer {
    /// Creates a transformer ignoring the default tenants.
    pub fn new(collection: Collection, source: impl Into<DumpSource>) -> Self {
        Self::with_options(collection, source, TransformOptions::default())
    }

    /// Creates a transformer with explicit options.
    pub fn with_options(
        collection: Collection,
        source: impl Into<DumpSource>,
        options: TransformOptions,
    ) -> Self {
        Self {
            source: source.into(),
            mapper: DumpMapper {
                collection,
                options,
                updated_on: Utc::now().format(UPDATED_ON_FORMAT).to_string(),
            },
        }
    }

    /// Collection kind this transformer maps.
    #[must_use]
    pub fn collection(&self) -> Collection {
        self.mapper.collection
    }

    /// Snapshot timestamp stamped on every document.
    #[must_use]
    pub fn updated_on(&self) -> &str {
        &self.mapper.updated_on
    }

    /// Options in effect.
    #[must_use]
    pub fn options(&self) -> &TransformOptions {
        &self.mapper.options
    }

    /// Loads the dump and writes the rendered documents to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the dump cannot be loaded or does not match the
    /// collection's shape. Nothing is written in that case.
    pub fn transform(self) -> Result<TransformStats> {
        let stdout = std::io::stdout();
        self.write_to(stdout.lock())
    }

    /// Loads the dump and writes the rendered documents, followed by a
    /// newline, to `writer`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::transform`], plus [`Error::Io`] if writing fails.
    pub fn write_to<W: Write>(self, mut writer: W) -> Result<TransformStats> {
        let (rendered, stats) = self.render()?;
        writer
            .write_all(rendered.as_bytes())
            .and_then(|()| writer.write_all(b"\n"))
            .and_then(|()| writer.flush())
            .map_err(|e| Error::io("-", e))?;
        Ok(stats)
    }

    /// Loads the dump and renders the whole batch as indented JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the dump cannot be loaded, does not match the
    /// collection's shape, or cannot be rendered.
    pub fn render(self) -> Result<(String, TransformStats)> {
        let Self { source, mapper } = self;
        let dump = source.load()?;
        let (documents, stats) = mapper.map_dump(dump)?;
        let rendered = render_json(&documents, mapper.options.indent)?;
        Ok((rendered, stats))
    }

    /// Maps an already loaded dump. Does not touch the configured source.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] if a required key is missing or the dump
    /// has the wrong shape.
    pub fn transform_value(&self, dump: serde_json::Value) -> Result<Vec<Document>> {
        self.mapper.map_dump(dump).map(|(documents, _)| documents)
    }
}

impl DumpMapper {
    fn map_dump(&self, dump: serde_json::Value) -> Result<(Vec<Document>, TransformStats)> {
        info!(
            "Transforming {} dump (updatedOn {})",
            self.collection, self.updated_on
        );

        let entries = self.dump_entries(dump)?;
        let mut stats = TransformStats::default();
        let documents = match self.collection {
            Collection::Credentials => self.map_credentials(entries, &mut stats)?,
            Collection::Devices => self.map_devices(entries, &mut stats)?,
            Collection::Tenants => self.map_tenants(entries, &mut stats)?,
        };
        stats.documents = documents.len() as u64;

        info!(
            "Produced {} {} documents ({} of {} entries skipped)",
            stats.documents, self.collection, stats.skipped, stats.entries
        );
        Ok((documents, stats))
    }

    fn dump_entries(&self, dump: serde_json::Value) -> Result<Vec<serde_json::Value>> {
        match dump {
            serde_json::Value::Array(entries) => Ok(entries),
            other => Err(Error::Schema {
                location: "dump root".to_string(),
                message: format!(
                    "expected an array of {} entries, got {}",
                    self.collection,
                    json_type(&other)
                ),
            }),
        }
    }

    /// Bundles whose tenant is not ignored, in dump order, each holding only
    /// the item list under `key`.
    ///
    /// The tenant is checked before anything else in the bundle is read.
    fn qualifying_bundles(
        &self,
        entries: Vec<serde_json::Value>,
        key: &str,
        stats: &mut TransformStats,
    ) -> Result<Vec<TenantBundle>> {
        let mut bundles = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            let location = format!("dump[{index}]");
            let mut fields = match entry {
                serde_json::Value::Object(fields) => fields,
                other => {
                    return Err(Error::Schema {
                        location,
                        message: format!(
                            "expected a tenant bundle object, got {}",
                            json_type(&other)
                        ),
                    })
                }
            };
            let tenant = fields.remove("tenant").ok_or_else(|| Error::Schema {
                location: location.clone(),
                message: "missing field `tenant`".to_string(),
            })?;
            let tenant: String =
                serde_json::from_value(tenant).map_err(|e| Error::schema(location.as_str(), &e))?;
            stats.entries += 1;
            if self.options.is_ignored(&tenant) {
                debug!("Skipping ignored tenant '{}'", tenant);
                stats.skipped += 1;
                continue;
            }

            // An absent list is the same as an empty one
            let items = match fields.remove(key) {
                Some(items) => serde_json::from_value(items).map_err(|e| {
                    Error::schema(format!("{key} of tenant '{tenant}'"), &e)
                })?,
                None => Vec::new(),
            };
            bundles.push(TenantBundle { tenant, items });
        }
        Ok(bundles)
    }

    fn map_credentials(
        &self,
        entries: Vec<serde_json::Value>,
        stats: &mut TransformStats,
    ) -> Result<Vec<Document>> {
        let mut documents = Vec::new();
        for bundle in self.qualifying_bundles(entries, "credentials", stats)? {
            for (position, raw) in bundle.items.into_iter().enumerate() {
                let item: CredentialItem = serde_json::from_value(raw).map_err(|e| {
                    Error::schema(
                        format!("credentials[{position}] of tenant '{}'", bundle.tenant),
                        &e,
                    )
                })?;
                documents.push(Document::Credential(CredentialDocument {
                    tenant_id: bundle.tenant.clone(),
                    device_id: item.device_id,
                    version: Uuid::new_v4(),
                    updated_on: self.updated_on.clone(),
                    credentials: vec![CredentialEntry {
                        auth_id: item.auth_id,
                        kind: item.kind,
                        secrets: item.secrets,
                        enabled: true,
                    }],
                }));
            }
        }
        Ok(documents)
    }

    fn map_devices(
        &self,
        entries: Vec<serde_json::Value>,
        stats: &mut TransformStats,
    ) -> Result<Vec<Document>> {
        let mut documents = Vec::new();
        for bundle in self.qualifying_bundles(entries, "devices", stats)? {
            for (position, raw) in bundle.items.into_iter().enumerate() {
                let item: DeviceItem = serde_json::from_value(raw).map_err(|e| {
                    Error::schema(
                        format!("devices[{position}] of tenant '{}'", bundle.tenant),
                        &e,
                    )
                })?;
                documents.push(Document::Device(DeviceDocument {
                    tenant_id: bundle.tenant.clone(),
                    device_id: item.device_id,
                    version: Uuid::new_v4(),
                    updated_on: self.updated_on.clone(),
                    device: item.data,
                }));
            }
        }
        Ok(documents)
    }

    fn map_tenants(
        &self,
        entries: Vec<serde_json::Value>,
        stats: &mut TransformStats,
    ) -> Result<Vec<Document>> {
        let mut documents = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            let record: TenantRecord = serde_json::from_value(entry)
                .map_err(|e| Error::schema(format!("dump[{index}]"), &e))?;
            stats.entries += 1;
            if self.options.is_ignored(&record.tenant_id) {
                debug!("Skipping ignored tenant '{}'", record.tenant_id);
                stats.skipped += 1;
                continue;
            }
            documents.push(Document::Tenant(TenantDocument {
                tenant_id: record.tenant_id,
                version: Uuid::new_v4(),
                updated_on: self.updated_on.clone(),
                tenant: record.tenant,
            }));
        }
        Ok(documents)
    }
}

/// Renders documents as a JSON array indented by `indent` spaces per level.
///
/// # Errors
///
/// Returns [`Error::Serialization`] if a document cannot be serialized.
pub fn render_json(documents: &[Document], indent: usize) -> Result<String> {
    let indent = " ".repeat(indent);
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(
        &mut out,
        PrettyFormatter::with_indent(indent.as_bytes()),
    );
    serde::Serialize::serialize(documents, &mut serializer).map_err(Error::Serialization)?;
    String::from_utf8(out).map_err(|e| Error::Serialization(serde::ser::Error::custom(e)))
}

fn json_type(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
