//! Purpose: Immutable, shape-checked view over a decoded JSON object.
//! Exports: `ObjectView`.
//! Role: Resolves keys to value boxes, nested object views, or nested array views.
//! Invariants: Entries are owned and never mutated after construction.
//! Invariants: A missing key reads exactly like a stored `null`.
//! Invariants: Every nested view and snapshot handed out is an independent copy.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

use crate::api::array::ArrayView;
use crate::api::node::Node;
use crate::api::view::{JsonView, Slot, decode_root, wrong_root, wrong_shape};
use crate::core::error::Error;
use crate::core::shape::Shape;
use crate::core::value_box::ValueBox;
use crate::json::parse::to_text;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ObjectView {
    entries: Map<String, Value>,
}

impl ObjectView {
    /// Parse `text` into a view; `None` fails with `NullInput`, invalid JSON or a
    /// non-object root fails with `Format`.
    pub fn from_text<'a>(text: impl Into<Option<&'a str>>) -> Result<Self, Error> {
        let (text, value) = decode_root(text.into(), Shape::Object)?;
        match value {
            Value::Object(entries) => Ok(Self { entries }),
            other => Err(wrong_root(Shape::Object, &other, text)),
        }
    }

    /// Take ownership of an already decoded root.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::Object(entries) => Ok(Self { entries }),
            other => Err(wrong_root(Shape::Object, &other, &to_text(&other))),
        }
    }

    pub fn wrap(entries: &Map<String, Value>) -> Self {
        Self {
            entries: entries.clone(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn as_snapshot(&self) -> Map<String, Value> {
        self.entries.clone()
    }

    pub fn as_text(&self) -> String {
        to_text(&self.entries)
    }

    /// Read a primitive. Missing keys and stored `null` both yield a null box;
    /// objects and arrays fail with `WrongShape`.
    pub fn get(&self, key: &str) -> Result<ValueBox, Error> {
        match self.entries.get(key) {
            None | Some(Value::Null) => Ok(ValueBox::null()),
            Some(value @ (Value::Object(_) | Value::Array(_))) => {
                Err(wrong_shape(Slot::Key(key), "get", None, Shape::of(value)))
            }
            Some(value) => Ok(ValueBox::from_primitive(value.clone())),
        }
    }

    /// Read a nested object; missing keys and `null` yield an empty view.
    pub fn get_object(&self, key: &str) -> Result<ObjectView, Error> {
        match self.entries.get(key) {
            None | Some(Value::Null) => Ok(ObjectView::empty()),
            Some(Value::Object(entries)) => Ok(ObjectView::wrap(entries)),
            Some(value) => Err(wrong_shape(
                Slot::Key(key),
                "get_object",
                Some(Shape::Object),
                Shape::of(value),
            )),
        }
    }

    /// Read a nested array; missing keys and `null` yield an empty view.
    pub fn get_list(&self, key: &str) -> Result<ArrayView, Error> {
        match self.entries.get(key) {
            None | Some(Value::Null) => Ok(ArrayView::empty()),
            Some(Value::Array(elements)) => Ok(ArrayView::wrap(elements)),
            Some(value) => Err(wrong_shape(
                Slot::Key(key),
                "get_list",
                Some(Shape::Array),
                Shape::of(value),
            )),
        }
    }

    /// Shape-dispatched read that never fails; a missing key is `Node::Null`.
    pub fn node(&self, key: &str) -> Node {
        self.entries.get(key).map_or(Node::Null, Node::copy_of)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Node)> + '_ {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), Node::copy_of(value)))
    }
}

impl From<Map<String, Value>> for ObjectView {
    fn from(entries: Map<String, Value>) -> Self {
        Self { entries }
    }
}

impl JsonView for ObjectView {
    fn shape(&self) -> Shape {
        Shape::Object
    }

    fn to_value(&self) -> Value {
        Value::Object(self.as_snapshot())
    }

    fn as_text(&self) -> String {
        ObjectView::as_text(self)
    }
}

impl fmt::Display for ObjectView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}
