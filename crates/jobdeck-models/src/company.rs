//! Companies and their embedded projections.

use serde::{Deserialize, Serialize};

/// A row in the `companies` table. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    /// Public URL of the uploaded logo asset.
    pub logo_url: String,
}

/// Insert payload for `companies`; `logo_url` points at the already-uploaded
/// asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCompany {
    pub name: String,
    pub logo_url: String,
}

/// Projection used by listing embeds (`companies(name,logo_url)`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub name: String,
    pub logo_url: String,
}

/// Name-only projection (`companies(name)`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyName {
    pub name: String,
}
