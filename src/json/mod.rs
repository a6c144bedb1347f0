//! Purpose: JSON codec boundary shared by both views and the CLI.
//! Exports: `parse` module with decode/encode helpers and parse-failure categories.
//! Role: Single seam for the codec so views never call serde_json ad hoc.
//! Invariants: Decoding preserves document key order (`preserve_order`).
//! Invariants: Helper APIs stay small and deterministic (no hidden global state).

pub(crate) mod parse;
