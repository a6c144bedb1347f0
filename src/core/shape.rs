//! Purpose: Name the structural category of a decoded JSON value.
//! Exports: `Shape`.
//! Role: Single place where views classify values and pick the accessor to suggest.
//! Invariants: Exactly six shapes; only `Object` and `Array` are structured.
use serde::Serialize;
use serde_json::Value;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Null,
    #[serde(rename = "boolean")]
    Bool,
    Number,
    String,
    Object,
    Array,
}

impl Shape {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Shape::Null,
            Value::Bool(_) => Shape::Bool,
            Value::Number(_) => Shape::Number,
            Value::String(_) => Shape::String,
            Value::Object(_) => Shape::Object,
            Value::Array(_) => Shape::Array,
        }
    }

    pub fn is_structured(self) -> bool {
        matches!(self, Shape::Object | Shape::Array)
    }

    pub fn name(self) -> &'static str {
        match self {
            Shape::Null => "null",
            Shape::Bool => "boolean",
            Shape::Number => "number",
            Shape::String => "string",
            Shape::Object => "object",
            Shape::Array => "array",
        }
    }

    /// Name of the view accessor that reads a value of this shape.
    pub fn accessor(self) -> &'static str {
        match self {
            Shape::Object => "get_object",
            Shape::Array => "get_list",
            Shape::Null | Shape::Bool | Shape::Number | Shape::String => "get",
        }
    }

    /// "an object", "a string", ...
    pub(crate) fn with_article(self) -> &'static str {
        match self {
            Shape::Null => "null",
            Shape::Bool => "a boolean",
            Shape::Number => "a number",
            Shape::String => "a string",
            Shape::Object => "an object",
            Shape::Array => "an array",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
