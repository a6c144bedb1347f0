//! Purpose: Hold the pieces both views share: root decoding, error construction, `JsonView`.
//! Exports: `JsonView`; crate-internal `Slot`, `decode_root`, `wrong_root`, `wrong_shape`, `out_of_range`.
//! Role: Keeps the object and array views symmetric without a common base type.
//! Invariants: Format errors always carry the offending text.
//! Invariants: Wrong-shape errors always name the slot, both shapes and the accessor to use.

use serde_json::Value;
use std::fmt;

use crate::core::error::{Error, ErrorKind};
use crate::core::shape::Shape;
use crate::json::parse;

/// Read-only capability shared by the object view, the array view and `Node`.
pub trait JsonView {
    fn shape(&self) -> Shape;

    /// Independent copy of the wrapped JSON.
    fn to_value(&self) -> Value;

    /// Minified JSON, key order as stored.
    fn as_text(&self) -> String {
        parse::to_text(&self.to_value())
    }
}

/// Where a child value lives inside its parent view.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Slot<'a> {
    Key(&'a str),
    Index(i64),
}

impl Slot<'_> {
    fn call(self, accessor: &str) -> String {
        match self {
            Slot::Key(key) => format!("{accessor}({key:?})"),
            Slot::Index(index) => format!("{accessor}({index})"),
        }
    }

    fn tag(self, err: Error) -> Error {
        match self {
            Slot::Key(key) => err.with_key(key),
            Slot::Index(index) => err.with_index(index),
        }
    }
}

impl fmt::Display for Slot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Key(key) => write!(f, "key {key:?}"),
            Slot::Index(index) => write!(f, "index {index}"),
        }
    }
}

/// Decode `text` for a view whose root must be `expected`.
/// Absent text fails before any parse is attempted.
pub(crate) fn decode_root<'a>(text: Option<&'a str>, expected: Shape) -> Result<(&'a str, Value), Error> {
    let Some(text) = text else {
        return Err(Error::new(ErrorKind::NullInput)
            .with_message(format!(
                "cannot build a view from absent text (expected JSON {})",
                expected.name()
            ))
            .with_expected(expected));
    };

    match parse::from_str(text) {
        Ok(value) => Ok((text, value)),
        Err(err) => {
            let category = parse::categorize_error(&err);
            tracing::debug!(
                category = category.as_str(),
                expected = expected.name(),
                "rejected JSON text"
            );
            Err(Error::new(ErrorKind::Format)
                .with_message(format!("invalid JSON: {err}; text: {text}"))
                .with_hint(parse::hint_for_error(&err, expected.name()))
                .with_expected(expected)
                .with_text(text)
                .with_source(err))
        }
    }
}

pub(crate) fn wrong_root(expected: Shape, found: &Value, text: &str) -> Error {
    let actual = Shape::of(found);
    tracing::debug!(
        expected = expected.name(),
        actual = actual.name(),
        "rejected JSON root"
    );
    Error::new(ErrorKind::Format)
        .with_message(format!(
            "expected JSON {} at the root, found {}; text: {text}",
            expected.name(),
            actual.with_article()
        ))
        .with_expected(expected)
        .with_actual(actual)
        .with_text(text)
}

/// `called` is the accessor the caller used; `wanted` describes what it reads.
pub(crate) fn wrong_shape(
    slot: Slot<'_>,
    called: &str,
    wanted: Option<Shape>,
    actual: Shape,
) -> Error {
    let wanted_text = wanted.map_or("a primitive value", Shape::with_article);
    let instead = slot.call(actual.accessor());
    let err = Error::new(ErrorKind::WrongShape)
        .with_message(format!(
            "{slot} holds {}, not {wanted_text}; use {instead} instead of {called}",
            actual.with_article()
        ))
        .with_hint(format!("use {instead}"))
        .with_actual(actual);
    let err = match wanted {
        Some(shape) => err.with_expected(shape),
        None => err,
    };
    slot.tag(err)
}

pub(crate) fn out_of_range(index: i64, len: usize) -> Error {
    Error::new(ErrorKind::IndexRange)
        .with_message(format!(
            "index {index} is out of range for an array of length {len}"
        ))
        .with_index(index)
        .with_len(len)
}

#[cfg(test)]
mod tests {
    use super::{Slot, decode_root, out_of_range, wrong_shape};
    use crate::core::error::ErrorKind;
    use crate::core::shape::Shape;

    #[test]
    fn wrong_shape_message_names_slot_shapes_and_accessor() {
        let err = wrong_shape(Slot::Key("tags"), "get", None, Shape::Array);
        assert_eq!(err.kind(), ErrorKind::WrongShape);
        assert_eq!(
            err.message(),
            Some("key \"tags\" holds an array, not a primitive value; use get_list(\"tags\") instead of get")
        );
        assert_eq!(err.key(), Some("tags"));
        assert_eq!(err.expected(), None);

        let err = wrong_shape(Slot::Index(1), "get_object", Some(Shape::Object), Shape::Number);
        assert_eq!(
            err.message(),
            Some("index 1 holds a number, not an object; use get(1) instead of get_object")
        );
        assert_eq!(err.index(), Some(1));
        assert_eq!(err.expected(), Some(Shape::Object));
        assert_eq!(err.actual(), Some(Shape::Number));
    }

    #[test]
    fn range_error_reports_index_and_length() {
        let err = out_of_range(-1, 3);
        assert_eq!(err.kind(), ErrorKind::IndexRange);
        assert_eq!(err.index(), Some(-1));
        assert_eq!(err.length(), Some(3));
    }

    #[test]
    fn decode_root_rejects_absent_text_without_parsing() {
        let err = decode_root(None, Shape::Object).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NullInput);
        assert!(err.text().is_none());
    }

    #[test]
    fn decode_root_keeps_offending_text() {
        let err = decode_root(Some("{\"a\":}"), Shape::Object).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert_eq!(err.text(), Some("{\"a\":}"));
        assert!(err.message().unwrap().contains("{\"a\":}"));
        assert!(err.hint().unwrap().contains("parse category: syntax"));
    }
}
