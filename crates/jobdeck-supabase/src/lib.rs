//! PostgREST client for the managed database.
//!
//! Every operation authenticates with the caller's access token plus the
//! project's public key header and performs exactly one query or mutation.
//! There is no retry layer and no request timeout: a failed call is
//! terminal for the action that issued it.

pub mod client;
pub mod error;
pub mod filter;
pub mod metrics;

pub use client::{PostgrestClient, SupabaseConfig};
pub use error::{DbError, DbResult};
pub use filter::Filter;
