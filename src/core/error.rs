//! Purpose: Define the single error type shared by views, value boxes and the CLI.
//! Exports: `Error`, `ErrorKind`, `to_exit_code`.
//! Role: Typed failure contract; callers branch on `kind()` and read structured context.
//! Invariants: Every error carries enough context (key/index, shapes, text) to explain itself.
//! Invariants: Exit-code mapping is stable once published.
use std::error::Error as StdError;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::shape::Shape;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// A factory was handed absent text.
    NullInput,
    /// Text is not valid JSON, or its root has the wrong shape.
    Format,
    /// An accessor was used against a value of a different shape.
    WrongShape,
    /// An array index fell outside `[0, len)`.
    IndexRange,
    /// A value box could not coerce its primitive.
    Coercion,
    Usage,
    Io,
    Internal,
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    hint: Option<String>,
    key: Option<String>,
    index: Option<i64>,
    len: Option<usize>,
    expected: Option<Shape>,
    actual: Option<Shape>,
    text: Option<String>,
    path: Option<PathBuf>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            hint: None,
            key: None,
            index: None,
            len: None,
            expected: None,
            actual: None,
            text: None,
            path: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Object key the failing accessor was called with.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Array index the failing accessor was called with.
    pub fn index(&self) -> Option<i64> {
        self.index
    }

    /// Array length observed by a range check.
    pub fn length(&self) -> Option<usize> {
        self.len
    }

    pub fn expected(&self) -> Option<Shape> {
        self.expected
    }

    pub fn actual(&self) -> Option<Shape> {
        self.actual
    }

    /// Offending input for `Format` errors.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_index(mut self, index: i64) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_len(mut self, len: usize) -> Self {
        self.len = Some(len);
        self
    }

    pub fn with_expected(mut self, shape: Shape) -> Self {
        self.expected = Some(shape);
        self
    }

    pub fn with_actual(mut self, shape: Shape) -> Self {
        self.actual = Some(shape);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Usage => 2,
        ErrorKind::NullInput => 3,
        ErrorKind::Format => 4,
        ErrorKind::WrongShape => 5,
        ErrorKind::IndexRange => 6,
        ErrorKind::Coercion => 7,
        ErrorKind::Io => 8,
    }
}
