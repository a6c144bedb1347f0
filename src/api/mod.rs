//! Purpose: Define the public Rust API boundary for jsonview.
//! Exports: Views, the value box, shapes, errors, and the shared `JsonView` trait.
//! Role: Public, additive-only surface; hides the codec and core module layout.
//! Invariants: This module is the only public path to view and error types.
//! Invariants: Internal modules remain private and are not directly exposed.

mod array;
mod node;
mod object;
mod view;

pub use crate::core::error::{Error, ErrorKind, to_exit_code};
pub use crate::core::shape::Shape;
pub use crate::core::value_box::{MAX_ROUNDED_DIGITS, ValueBox};
pub use array::ArrayView;
pub use node::Node;
pub use object::ObjectView;
pub use view::JsonView;
