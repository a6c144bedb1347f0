//! Purpose: Shape-tagged child value for callers that dispatch on what they find.
//! Exports: `Node`.
//! Role: Lets iteration and generic tooling walk a document without guessing accessors.
//! Invariants: Nested views inside a node are independent copies of the source.

use serde::Serialize;
use serde_json::Value;

use crate::api::array::ArrayView;
use crate::api::object::ObjectView;
use crate::api::view::JsonView;
use crate::core::shape::Shape;
use crate::core::value_box::ValueBox;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Null,
    Value(ValueBox),
    Object(ObjectView),
    List(ArrayView),
}

impl Node {
    pub(crate) fn copy_of(value: &Value) -> Self {
        match value {
            Value::Null => Node::Null,
            Value::Object(entries) => Node::Object(ObjectView::wrap(entries)),
            Value::Array(elements) => Node::List(ArrayView::wrap(elements)),
            primitive => Node::Value(ValueBox::from_primitive(primitive.clone())),
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            Node::Null => Shape::Null,
            Node::Value(value) => value.shape(),
            Node::Object(_) => Shape::Object,
            Node::List(_) => Shape::Array,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    /// Entry or element count; primitives report `None`.
    pub fn len(&self) -> Option<usize> {
        match self {
            Node::Object(view) => Some(view.len()),
            Node::List(view) => Some(view.len()),
            Node::Null | Node::Value(_) => None,
        }
    }
}

impl JsonView for Node {
    fn shape(&self) -> Shape {
        Node::shape(self)
    }

    fn to_value(&self) -> Value {
        match self {
            Node::Null => Value::Null,
            Node::Value(value) => value.as_value().clone(),
            Node::Object(view) => view.to_value(),
            Node::List(view) => view.to_value(),
        }
    }
}

impl From<ObjectView> for Node {
    fn from(view: ObjectView) -> Self {
        Node::Object(view)
    }
}

impl From<ArrayView> for Node {
    fn from(view: ArrayView) -> Self {
        Node::List(view)
    }
}
