//! API wrapper functions, one module per backend table.
//!
//! Each wrapper performs exactly one query or mutation against the managed
//! database, optionally preceded by exactly one object-storage upload. All
//! handles arrive as explicit parameters; wrappers keep the
//! `(token, options, args)` calling shape so the fetch controller can wrap
//! any of them.

pub mod applications;
pub mod companies;
pub mod jobs;
