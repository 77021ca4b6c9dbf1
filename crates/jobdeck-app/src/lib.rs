//! Headless application core.
//!
//! Composes the session layer, the database and storage clients, and the
//! screen flow of the job board without any UI: the data-fetch controller
//! (async state around token-injected backend calls), the access-control
//! gate, the client-side route table, one API wrapper per table/operation,
//! and page controllers that wire them together.

pub mod api;
pub mod error;
pub mod fetch;
pub mod gate;
pub mod pages;
pub mod routes;

pub use error::{ApiCallError, ApiCallResult};
pub use fetch::{Fetcher, LoadState};
pub use gate::{evaluate_gate, GateDecision};
pub use routes::Route;
