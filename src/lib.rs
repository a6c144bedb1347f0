//! Purpose: Immutable, shape-checked views over decoded JSON documents.
//! Exports: `api` (object/array views, value box, shapes, errors) re-exported at the root.
//! Role: Library backing the `jsonview` CLI and any caller that reads untrusted JSON.
//! Invariants: Views never mutate after construction and never alias caller containers.
//! Invariants: Every shape or range violation surfaces as a typed `Error`.
pub mod api;
mod core;
mod json;

pub use api::*;
