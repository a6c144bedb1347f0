//! Purpose: Hold one decoded JSON primitive and expose typed coercions.
//! Exports: `ValueBox`, `MAX_ROUNDED_DIGITS`.
//! Role: Leaf result of view lookups; views construct it and never coerce themselves.
//! Invariants: A box never holds an object or array.
//! Invariants: Coercion never panics; every rejected conversion is an `ErrorKind::Coercion`.
use serde::Serialize;
use serde_json::{Number, Value};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::core::error::{Error, ErrorKind};
use crate::core::shape::Shape;
use crate::json::parse::to_text;

/// Largest fraction-digit count `ValueBox::to_rounded` accepts; an f64 carries no more.
pub const MAX_ROUNDED_DIGITS: usize = 17;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValueBox {
    value: Value,
}

impl ValueBox {
    pub fn null() -> Self {
        Self { value: Value::Null }
    }

    pub(crate) fn from_primitive(value: Value) -> Self {
        debug_assert!(!Shape::of(&value).is_structured());
        Self { value }
    }

    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    pub fn shape(&self) -> Shape {
        Shape::of(&self.value)
    }

    /// Borrow the wrapped primitive.
    pub fn as_value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// Integers pass through, floats truncate toward zero, booleans map to 1/0
    /// and numeric text is parsed after trimming.
    pub fn to_integer(&self) -> Result<i64, Error> {
        match &self.value {
            Value::Bool(flag) => Ok(i64::from(*flag)),
            Value::Number(number) => number_to_integer(number).ok_or_else(|| self.reject("integer")),
            Value::String(text) => {
                let trimmed = text.trim();
                if let Ok(parsed) = trimmed.parse::<i64>() {
                    return Ok(parsed);
                }
                trimmed
                    .parse::<f64>()
                    .ok()
                    .and_then(truncate_float)
                    .ok_or_else(|| self.reject("integer"))
            }
            Value::Null | Value::Object(_) | Value::Array(_) => Err(self.reject("integer")),
        }
    }

    pub fn to_double(&self) -> Result<f64, Error> {
        match &self.value {
            Value::Bool(flag) => Ok(if *flag { 1.0 } else { 0.0 }),
            Value::Number(number) => number.as_f64().ok_or_else(|| self.reject("double")),
            Value::String(text) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|parsed| parsed.is_finite())
                .ok_or_else(|| self.reject("double")),
            Value::Null | Value::Object(_) | Value::Array(_) => Err(self.reject("double")),
        }
    }

    pub fn to_boolean(&self) -> Result<bool, Error> {
        match &self.value {
            Value::Bool(flag) => Ok(*flag),
            Value::Number(number) => number
                .as_f64()
                .map(|parsed| parsed != 0.0)
                .ok_or_else(|| self.reject("boolean")),
            Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(true),
                "false" | "0" | "no" => Ok(false),
                _ => Err(self.reject("boolean")),
            },
            Value::Null | Value::Object(_) | Value::Array(_) => Err(self.reject("boolean")),
        }
    }

    pub fn to_text(&self) -> Result<String, Error> {
        match &self.value {
            Value::String(text) => Ok(text.clone()),
            Value::Number(number) => Ok(number.to_string()),
            Value::Bool(flag) => Ok(flag.to_string()),
            Value::Null | Value::Object(_) | Value::Array(_) => Err(self.reject("text")),
        }
    }

    /// RFC 3339 text or integer Unix seconds.
    pub fn to_date_time(&self) -> Result<OffsetDateTime, Error> {
        match &self.value {
            Value::String(text) => OffsetDateTime::parse(text.trim(), &Rfc3339)
                .map_err(|err| self.reject("date-time").with_source(err)),
            Value::Number(number) => number
                .as_i64()
                .and_then(|seconds| OffsetDateTime::from_unix_timestamp(seconds).ok())
                .ok_or_else(|| self.reject("date-time")),
            Value::Null | Value::Bool(_) | Value::Object(_) | Value::Array(_) => {
                Err(self.reject("date-time"))
            }
        }
    }

    /// Numeric value rendered with exactly `digits` fraction digits.
    /// `digits` above [`MAX_ROUNDED_DIGITS`] is a `Coercion` error.
    pub fn to_rounded(&self, digits: usize) -> Result<String, Error> {
        if digits > MAX_ROUNDED_DIGITS {
            return Err(Error::new(ErrorKind::Coercion)
                .with_message(format!(
                    "cannot round to {digits} fraction digits; at most {MAX_ROUNDED_DIGITS} are supported"
                ))
                .with_actual(self.shape()));
        }
        let value = self.to_double()?;
        Ok(format!("{value:.digits$}"))
    }

    fn reject(&self, target: &str) -> Error {
        let shape = self.shape();
        Error::new(ErrorKind::Coercion)
            .with_message(format!(
                "cannot coerce {} {} to {target}",
                shape.name(),
                to_text(&self.value)
            ))
            .with_actual(shape)
    }
}

impl TryFrom<Value> for ValueBox {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let shape = Shape::of(&value);
        if shape.is_structured() {
            return Err(Error::new(ErrorKind::WrongShape)
                .with_message(format!(
                    "a value box holds primitives only, found {}",
                    shape.with_article()
                ))
                .with_actual(shape));
        }
        Ok(Self { value })
    }
}

impl From<bool> for ValueBox {
    fn from(value: bool) -> Self {
        Self::from_primitive(Value::Bool(value))
    }
}

impl From<i64> for ValueBox {
    fn from(value: i64) -> Self {
        Self::from_primitive(Value::from(value))
    }
}

impl From<u64> for ValueBox {
    fn from(value: u64) -> Self {
        Self::from_primitive(Value::from(value))
    }
}

impl From<f64> for ValueBox {
    /// Non-finite floats have no JSON form and become null.
    fn from(value: f64) -> Self {
        Self::from_primitive(Value::from(value))
    }
}

impl From<&str> for ValueBox {
    fn from(value: &str) -> Self {
        Self::from_primitive(Value::from(value))
    }
}

impl From<String> for ValueBox {
    fn from(value: String) -> Self {
        Self::from_primitive(Value::String(value))
    }
}

fn number_to_integer(number: &Number) -> Option<i64> {
    if let Some(value) = number.as_i64() {
        return Some(value);
    }
    if number.is_u64() {
        return None;
    }
    number.as_f64().and_then(truncate_float)
}

fn truncate_float(value: f64) -> Option<i64> {
    // i64::MAX is not representable as f64; the bound rounds up to 2^63.
    if !value.is_finite() || value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return None;
    }
    Some(value.trunc() as i64)
}

#[cfg(test)]
mod tests {
    use super::{MAX_ROUNDED_DIGITS, ValueBox};
    use crate::core::error::ErrorKind;
    use crate::core::shape::Shape;
    use serde_json::json;

    fn boxed(value: serde_json::Value) -> ValueBox {
        ValueBox::try_from(value).expect("primitive")
    }

    #[test]
    fn integer_coercion_covers_numbers_text_and_flags() {
        assert_eq!(boxed(json!(42)).to_integer().unwrap(), 42);
        assert_eq!(boxed(json!(-7.9)).to_integer().unwrap(), -7);
        assert_eq!(boxed(json!(" 12 ")).to_integer().unwrap(), 12);
        assert_eq!(boxed(json!("3.75")).to_integer().unwrap(), 3);
        assert_eq!(boxed(json!(true)).to_integer().unwrap(), 1);

        let err = boxed(json!(u64::MAX)).to_integer().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Coercion);
        let err = boxed(json!("twelve")).to_integer().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Coercion);
        assert!(err.message().unwrap().contains("\"twelve\""));
    }

    #[test]
    fn null_rejects_every_coercion() {
        let value = ValueBox::null();
        assert!(value.is_null());
        assert_eq!(value.shape(), Shape::Null);
        assert_eq!(value.to_integer().unwrap_err().kind(), ErrorKind::Coercion);
        assert_eq!(value.to_double().unwrap_err().kind(), ErrorKind::Coercion);
        assert_eq!(value.to_boolean().unwrap_err().kind(), ErrorKind::Coercion);
        assert_eq!(value.to_text().unwrap_err().kind(), ErrorKind::Coercion);
        assert_eq!(value.to_date_time().unwrap_err().kind(), ErrorKind::Coercion);
        assert_eq!(
            value.to_text().unwrap_err().actual(),
            Some(Shape::Null)
        );
    }

    #[test]
    fn double_boolean_and_text() {
        assert_eq!(boxed(json!(2.5)).to_double().unwrap(), 2.5);
        assert_eq!(boxed(json!("1e3")).to_double().unwrap(), 1000.0);
        assert!(boxed(json!("NaN")).to_double().is_err());

        assert!(boxed(json!("YES")).to_boolean().unwrap());
        assert!(!boxed(json!(0)).to_boolean().unwrap());
        assert!(boxed(json!("maybe")).to_boolean().is_err());

        assert_eq!(boxed(json!("dart")).to_text().unwrap(), "dart");
        assert_eq!(boxed(json!(101)).to_text().unwrap(), "101");
        assert_eq!(boxed(json!(false)).to_text().unwrap(), "false");
    }

    #[test]
    fn date_time_from_rfc3339_or_unix_seconds() {
        let parsed = boxed(json!("2026-02-01T00:00:00Z")).to_date_time().unwrap();
        assert_eq!(parsed.unix_timestamp(), 1_769_904_000);

        let parsed = boxed(json!(0)).to_date_time().unwrap();
        assert_eq!(parsed.year(), 1970);

        assert!(boxed(json!("yesterday")).to_date_time().is_err());
    }

    #[test]
    fn rounded_uses_fixed_fraction_digits() {
        assert_eq!(boxed(json!(3.14159)).to_rounded(2).unwrap(), "3.14");
        assert_eq!(boxed(json!(2)).to_rounded(3).unwrap(), "2.000");
        assert_eq!(boxed(json!("0.75")).to_rounded(0).unwrap(), "1");
        assert_eq!(
            boxed(json!(1.5)).to_rounded(MAX_ROUNDED_DIGITS).unwrap(),
            "1.50000000000000000"
        );
    }

    #[test]
    fn rounded_rejects_excess_fraction_digits() {
        for digits in [MAX_ROUNDED_DIGITS + 1, 70_000, usize::MAX] {
            let err = ValueBox::from(1.5).to_rounded(digits).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Coercion);
            assert_eq!(err.actual(), Some(Shape::Number));
        }
    }

    #[test]
    fn structured_values_are_refused() {
        let err = ValueBox::try_from(json!({"a": 1})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WrongShape);
        assert_eq!(err.actual(), Some(Shape::Object));
        assert!(ValueBox::try_from(json!([1])).is_err());
    }

    #[test]
    fn serializes_transparently() {
        let value = ValueBox::from("hello");
        assert_eq!(serde_json::to_string(&value).unwrap(), "\"hello\"");
        assert_eq!(serde_json::to_string(&ValueBox::null()).unwrap(), "null");
    }
}
