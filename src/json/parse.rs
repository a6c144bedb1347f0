//! Purpose: Provide the decode/encode entrypoints and parse-failure categorization.
//! Exports: `from_str`, `to_text`, `ParseFailureCategory`, `categorize_error`,
//! `categorize_message`, `hint_for_error`.
//! Role: Codec boundary; the views attach the offending text and shape context.
//! Invariants: Encoded text is minified and follows map iteration order.
//! Invariants: Category labels are stable; hints never echo the payload.

use serde::Serialize;
use serde_json::Value;
use serde_json::error::Category;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseFailureCategory {
    Syntax,
    Eof,
    NumericRange,
    DepthLimit,
    Utf8,
    Unknown,
}

impl ParseFailureCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ParseFailureCategory::Syntax => "syntax",
            ParseFailureCategory::Eof => "eof",
            ParseFailureCategory::NumericRange => "numeric-range",
            ParseFailureCategory::DepthLimit => "depth-limit",
            ParseFailureCategory::Utf8 => "utf8",
            ParseFailureCategory::Unknown => "unknown",
        }
    }
}

pub fn from_str(input: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(input)
}

pub fn to_text<T: Serialize + ?Sized>(value: &T) -> String {
    // Value trees only carry string keys, so encoding cannot fail.
    serde_json::to_string(value).unwrap_or_default()
}

pub fn categorize_error(err: &serde_json::Error) -> ParseFailureCategory {
    match categorize_message(&err.to_string()) {
        ParseFailureCategory::Unknown => match err.classify() {
            Category::Syntax | Category::Data => ParseFailureCategory::Syntax,
            Category::Eof => ParseFailureCategory::Eof,
            Category::Io => ParseFailureCategory::Unknown,
        },
        category => category,
    }
}

pub fn categorize_message(message: &str) -> ParseFailureCategory {
    let lower = message.to_ascii_lowercase();
    if lower.contains("recursion limit") || lower.contains("depth") {
        ParseFailureCategory::DepthLimit
    } else if lower.contains("number out of range") || lower.contains("overflow") {
        ParseFailureCategory::NumericRange
    } else if lower.contains("utf-8") || lower.contains("utf8") || lower.contains("unicode") {
        ParseFailureCategory::Utf8
    } else if lower.contains("eof while parsing") {
        ParseFailureCategory::Eof
    } else {
        ParseFailureCategory::Unknown
    }
}

pub fn hint_for_error(err: &serde_json::Error, context: &str) -> String {
    format!(
        "parse category: {}; line {} column {}; context: {context}",
        categorize_error(err).as_str(),
        err.line(),
        err.column()
    )
}
