//! Purpose: Hold top-level CLI command dispatch for `jsonview`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: The final step of every path uses the typed accessor the command needs,
//! so shape and range failures carry the views' own error context.
//! Invariants: Segments are keys on objects and integer indices on arrays.

use super::*;
use jsonview::api::{JsonView, ValueBox};
use time::format_description::well_known::Rfc3339;

pub(super) fn dispatch_command(
    command: Command,
    input: Option<&Path>,
    output: OutputConfig,
) -> Result<RunOutcome, Error> {
    let text = read_input(input)?;
    let root = load_root(&text)?;
    tracing::debug!(shape = root.shape().name(), bytes = text.len(), "loaded document");

    match command {
        Command::Show {
            segments,
            coerce,
            digits,
        } => {
            let value = match coerce {
                Some(coercion) => coerce_value(&resolve_value(root, &segments)?, coercion, digits)?,
                None => walk(root, &segments)?.to_value(),
            };
            emit_json(&value, output);
            Ok(RunOutcome::ok())
        }
        Command::Keys { segments } => {
            let view = resolve_object(root, &segments)?;
            emit_json(&json!(view.keys()), output);
            Ok(RunOutcome::ok())
        }
        Command::Len { segments } => {
            let node = walk(root, &segments)?;
            let len = match &node {
                Node::Null => 0,
                Node::Object(view) => view.len(),
                Node::List(view) => view.len(),
                Node::Value(value) => {
                    return Err(Error::new(ErrorKind::WrongShape)
                        .with_message(format!(
                            "len needs an object or an array, found a {}",
                            value.shape()
                        ))
                        .with_actual(value.shape()));
                }
            };
            emit_json(&json!(len), output);
            Ok(RunOutcome::ok())
        }
        Command::Check => {
            let summary = json!({
                "shape": root.shape(),
                "len": root.len(),
                "bytes": text.len(),
            });
            emit_json(&summary, output);
            Ok(RunOutcome::ok())
        }
    }
}

/// Follow every segment; a `null` node reads like an empty object.
fn walk(root: Node, segments: &[String]) -> Result<Node, Error> {
    segments
        .iter()
        .try_fold(root, |node, segment| descend(node, segment))
}

fn descend(node: Node, segment: &str) -> Result<Node, Error> {
    tracing::debug!(segment, shape = node.shape().name(), "descending");
    match node {
        Node::Null => Ok(Node::Null),
        Node::Object(view) => Ok(view.node(segment)),
        Node::List(view) => view.node(parse_index(segment)?),
        Node::Value(value) => Err(Error::new(ErrorKind::WrongShape)
            .with_message(format!(
                "cannot descend into {} with segment {segment:?}",
                value.shape()
            ))
            .with_actual(value.shape())),
    }
}

/// Walk to the parent of the last segment and read that segment with the typed accessor.
fn resolve_last<T>(
    root: Node,
    segments: &[String],
    on_root: impl FnOnce(Node) -> Result<T, Error>,
    from_object: impl FnOnce(&ObjectView, &str) -> Result<T, Error>,
    from_list: impl FnOnce(&ArrayView, i64) -> Result<T, Error>,
) -> Result<T, Error> {
    let Some((last, parents)) = segments.split_last() else {
        return on_root(root);
    };
    match walk(root, parents)? {
        Node::Null => from_object(&ObjectView::empty(), last),
        Node::Object(view) => from_object(&view, last),
        Node::List(view) => from_list(&view, parse_index(last)?),
        Node::Value(value) => Err(Error::new(ErrorKind::WrongShape)
            .with_message(format!(
                "cannot descend into {} with segment {last:?}",
                value.shape()
            ))
            .with_actual(value.shape())),
    }
}

fn resolve_value(root: Node, segments: &[String]) -> Result<ValueBox, Error> {
    resolve_last(
        root,
        segments,
        |node| {
            Err(Error::new(ErrorKind::Usage)
                .with_message(format!(
                    "the document root is {}; --as needs a path to a primitive",
                    node.shape()
                ))
                .with_hint("Name the key or index of a primitive, e.g. `show user id --as int`."))
        },
        |view, key| view.get(key),
        |view, index| Ok(view.get(index)?.unwrap_or_else(ValueBox::null)),
    )
}

fn resolve_object(root: Node, segments: &[String]) -> Result<ObjectView, Error> {
    resolve_last(
        root,
        segments,
        |node| match node {
            Node::Object(view) => Ok(view),
            other => Err(Error::new(ErrorKind::WrongShape)
                .with_message(format!(
                    "keys needs an object, the document root is {}",
                    other.shape()
                ))
                .with_expected(jsonview::Shape::Object)
                .with_actual(other.shape())),
        },
        |view, key| view.get_object(key),
        |view, index| view.get_object(index),
    )
}

fn parse_index(segment: &str) -> Result<i64, Error> {
    segment.parse::<i64>().map_err(|err| {
        Error::new(ErrorKind::Usage)
            .with_message(format!("segment {segment:?} is not an array index"))
            .with_hint("Array positions are integers starting at 0.")
            .with_source(err)
    })
}

fn coerce_value(value: &ValueBox, coercion: Coercion, digits: usize) -> Result<Value, Error> {
    let coerced = match coercion {
        Coercion::Int => json!(value.to_integer()?),
        Coercion::Double => json!(value.to_double()?),
        Coercion::Bool => json!(value.to_boolean()?),
        Coercion::Text => json!(value.to_text()?),
        Coercion::Date => {
            let formatted = value.to_date_time()?.format(&Rfc3339).map_err(|err| {
                Error::new(ErrorKind::Internal)
                    .with_message("failed to format date-time")
                    .with_source(err)
            })?;
            json!(formatted)
        }
        Coercion::Rounded => json!(value.to_rounded(digits)?),
    };
    Ok(coerced)
}
