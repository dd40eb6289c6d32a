//! # Hono Registry Migration
//!
//! `hono-registry-migrate` is a CLI tool and library that reshapes dumps of
//! the file-based Hono device registry into the documents expected by the
//! MongoDB-based registry.
//!
//! ## Collections
//!
//! | Collection | Dump layout | Output |
//! |------------|-------------|--------|
//! | `credentials` | `[{"tenant", "credentials": [...]}]` | one document per credential |
//! | `devices` | `[{"tenant", "devices": [...]}]` | one document per device |
//! | `tenants` | `[{"tenant-id", "tenant"?}]` | one document per tenant |
//!
//! Records of `DEFAULT_TENANT` and `HTTP_TENANT` are dropped. Every document
//! gets a fresh UUIDv4 `version` and the run's shared `updatedOn` timestamp.
//!
//! ## Quick Start
//!
//! ```bash
//! hono-registry-migrate credentials credentials.json > credentials.mongo.json
//! hono-registry-migrate tenants tenants.json --ignore-tenant DEFAULT_TENANT
//! ```
//!
//! ```no_run
//! use hono_registry_migrate::{Collection, RecordTransformer};
//!
//! let transformer = RecordTransformer::new(Collection::Devices, std::path::PathBuf::from("devices.json"));
//! transformer.transform()?;
//! # Ok::<(), hono_registry_migrate::Error>(())
//! ```

#![warn(missing_docs)]

pub mod collection;
pub mod config;
pub mod error;
pub mod model;
pub mod source;
pub mod transform;

pub use collection::Collection;
pub use config::{TransformOptions, DEFAULT_IGNORED_TENANTS};
pub use error::{Error, Result};
pub use model::Document;
pub use source::DumpSource;
pub use transform::{render_json, RecordTransformer, TransformStats};
