//! Managed object storage client.
//!
//! Two logical buckets: `resumes` for candidate documents and
//! `company-logo` for logo assets, addressed by generated keys and exposed
//! through fixed-form public URLs.

pub mod client;
pub mod error;
pub mod keys;

pub use client::{Bucket, StorageClient, StorageConfig};
pub use error::{StorageError, StorageResult};
pub use keys::{format_object_key, object_key, random_suffix, KEY_SUFFIX_SPACE};
