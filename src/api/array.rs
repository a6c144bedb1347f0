//! Purpose: Immutable, shape-checked view over a decoded JSON array.
//! Exports: `ArrayView`.
//! Role: Resolves indices to value boxes, nested object views, or nested array views.
//! Invariants: Elements are owned and never mutated after construction.
//! Invariants: Range checks run before any shape inspection.
//! Notes: Indices are `i64` so callers can probe negative positions; those are never valid.

use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::api::node::Node;
use crate::api::object::ObjectView;
use crate::api::view::{JsonView, Slot, decode_root, out_of_range, wrong_root, wrong_shape};
use crate::core::error::Error;
use crate::core::shape::Shape;
use crate::core::value_box::ValueBox;
use crate::json::parse::to_text;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ArrayView {
    elements: Vec<Value>,
}

impl ArrayView {
    /// Parse `text` into a view; `None` fails with `NullInput`, invalid JSON or a
    /// non-array root fails with `Format`.
    pub fn from_text<'a>(text: impl Into<Option<&'a str>>) -> Result<Self, Error> {
        let (text, value) = decode_root(text.into(), Shape::Array)?;
        match value {
            Value::Array(elements) => Ok(Self { elements }),
            other => Err(wrong_root(Shape::Array, &other, text)),
        }
    }

    pub fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::Array(elements) => Ok(Self { elements }),
            other => Err(wrong_root(Shape::Array, &other, &to_text(&other))),
        }
    }

    pub fn wrap(elements: &[Value]) -> Self {
        Self {
            elements: elements.to_vec(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    pub fn contains(&self, index: i64) -> bool {
        usize::try_from(index).is_ok_and(|index| index < self.elements.len())
    }

    pub fn as_snapshot(&self) -> Vec<Value> {
        self.elements.clone()
    }

    pub fn as_text(&self) -> String {
        to_text(&self.elements)
    }

    /// Read a primitive. `Ok(None)` means the element is JSON `null`;
    /// an invalid index is always an `IndexRange` error.
    pub fn get(&self, index: i64) -> Result<Option<ValueBox>, Error> {
        match self.element(index)? {
            Value::Null => Ok(None),
            value @ (Value::Object(_) | Value::Array(_)) => {
                Err(wrong_shape(Slot::Index(index), "get", None, Shape::of(value)))
            }
            value => Ok(Some(ValueBox::from_primitive(value.clone()))),
        }
    }

    /// Read a nested object; a `null` element yields an empty view.
    pub fn get_object(&self, index: i64) -> Result<ObjectView, Error> {
        match self.element(index)? {
            Value::Null => Ok(ObjectView::empty()),
            Value::Object(entries) => Ok(ObjectView::wrap(entries)),
            value => Err(wrong_shape(
                Slot::Index(index),
                "get_object",
                Some(Shape::Object),
                Shape::of(value),
            )),
        }
    }

    /// Read a nested array; a `null` element yields an empty view.
    pub fn get_list(&self, index: i64) -> Result<ArrayView, Error> {
        match self.element(index)? {
            Value::Null => Ok(ArrayView::empty()),
            Value::Array(elements) => Ok(ArrayView::wrap(elements)),
            value => Err(wrong_shape(
                Slot::Index(index),
                "get_list",
                Some(Shape::Array),
                Shape::of(value),
            )),
        }
    }

    /// Shape-dispatched read; only the range check can fail.
    pub fn node(&self, index: i64) -> Result<Node, Error> {
        self.element(index).map(Node::copy_of)
    }

    pub fn iter(&self) -> impl Iterator<Item = Node> + '_ {
        self.elements.iter().map(Node::copy_of)
    }

    fn element(&self, index: i64) -> Result<&Value, Error> {
        usize::try_from(index)
            .ok()
            .and_then(|position| self.elements.get(position))
            .ok_or_else(|| out_of_range(index, self.elements.len()))
    }
}

impl From<Vec<Value>> for ArrayView {
    fn from(elements: Vec<Value>) -> Self {
        Self { elements }
    }
}

impl JsonView for ArrayView {
    fn shape(&self) -> Shape {
        Shape::Array
    }

    fn to_value(&self) -> Value {
        Value::Array(self.as_snapshot())
    }

    fn as_text(&self) -> String {
        ArrayView::as_text(self)
    }
}

impl fmt::Display for ArrayView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}
