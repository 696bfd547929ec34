//! Field declarations and the per-kind conversion table.
//!
//! A schema is a static slice of [`FieldDeclaration`]s. Each declaration pairs
//! a field name with a [`FieldKind`], and each kind owns exactly one converter
//! that turns the raw resolved-option text into a [`FieldValue`]. The set of
//! supported kinds is closed, so adding a kind forces every dispatch site to
//! be revisited by the compiler.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::OptionsError;
use crate::value::FieldValue;

/// Semantic type declared for a field.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Raw text, used verbatim.
    String,
    /// Base-10 integer literal, stored as `i64`.
    Integer,
    /// Floating-point literal, stored as `f64`.
    Float,
    /// JSON document interpreted by JSON truthiness.
    Boolean,
    /// JSON document that must be an object.
    JsonObject,
    /// JSON document that must be an array.
    JsonArray,
}

type Converter = fn(&FieldDeclaration, &str) -> Result<FieldValue, OptionsError>;

impl FieldKind {
    /// Every supported kind, in declaration order of the enum.
    pub const ALL: [FieldKind; 6] = [
        FieldKind::String,
        FieldKind::Integer,
        FieldKind::Float,
        FieldKind::Boolean,
        FieldKind::JsonObject,
        FieldKind::JsonArray,
    ];

    fn converter(self) -> Converter {
        match self {
            FieldKind::String => convert_string,
            FieldKind::Integer => convert_integer,
            FieldKind::Float => convert_float,
            FieldKind::Boolean => convert_boolean,
            FieldKind::JsonObject => convert_json_object,
            FieldKind::JsonArray => convert_json_array,
        }
    }

    /// Human-readable name used in error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Float => "float",
            FieldKind::Boolean => "boolean",
            FieldKind::JsonObject => "JSON object",
            FieldKind::JsonArray => "JSON array",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime shape of a parsed JSON value.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonShape {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl JsonShape {
    /// Shape of an already parsed value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => JsonShape::Null,
            Value::Bool(_) => JsonShape::Boolean,
            Value::Number(_) => JsonShape::Number,
            Value::String(_) => JsonShape::String,
            Value::Array(_) => JsonShape::Array,
            Value::Object(_) => JsonShape::Object,
        }
    }
}

impl fmt::Display for JsonShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            JsonShape::Null => "null",
            JsonShape::Boolean => "boolean",
            JsonShape::Number => "number",
            JsonShape::String => "string",
            JsonShape::Array => "array",
            JsonShape::Object => "object",
        };
        f.write_str(label)
    }
}

/// Static metadata pairing a field name with its declared kind.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize)]
pub struct FieldDeclaration {
    /// Field name as written on the record (snake_case).
    pub name: &'static str,
    /// Declared semantic type.
    pub kind: FieldKind,
}

impl FieldDeclaration {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }

    /// Key under which the job runner publishes this field: the upper-cased name.
    pub fn argument_name(&self) -> String {
        self.name.to_ascii_uppercase()
    }

    /// Convert the raw resolved-option text into a value of the declared kind.
    pub fn convert(&self, raw: &str) -> Result<FieldValue, OptionsError> {
        (self.kind.converter())(self, raw)
    }
}

/// JSON truthiness: `false`, `null`, zero, `""`, `{}` and `[]` are false.
///
/// Numbers are judged from their literal text, so values beyond `f64` range
/// (`1e400`, `1e-400`) saturate to infinity or zero instead of being dropped.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.to_string().parse::<f64>().map_or(true, |n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn conversion_error(declaration: &FieldDeclaration, raw: &str) -> OptionsError {
    OptionsError::TypeConversion {
        field: declaration.name.to_string(),
        target: declaration.kind,
        value: raw.to_string(),
    }
}

fn convert_string(_: &FieldDeclaration, raw: &str) -> Result<FieldValue, OptionsError> {
    Ok(FieldValue::String(raw.to_string()))
}

/// Drops `_` digit separators (`1_000`), which are only valid between two digits.
fn strip_digit_separators(text: &str) -> Option<Cow<'_, str>> {
    if !text.contains('_') {
        return Some(Cow::Borrowed(text));
    }
    let bytes = text.as_bytes();
    let separated_by_digits = bytes.iter().enumerate().filter(|(_, byte)| **byte == b'_').all(|(index, _)| {
        let before = index.checked_sub(1).map(|previous| bytes[previous]);
        let after = bytes.get(index + 1).copied();
        before.is_some_and(|byte| byte.is_ascii_digit()) && after.is_some_and(|byte| byte.is_ascii_digit())
    });
    separated_by_digits.then(|| Cow::Owned(text.replace('_', "")))
}

fn convert_integer(declaration: &FieldDeclaration, raw: &str) -> Result<FieldValue, OptionsError> {
    strip_digit_separators(raw.trim())
        .and_then(|text| text.parse::<i64>().ok())
        .map(FieldValue::Integer)
        .ok_or_else(|| conversion_error(declaration, raw))
}

fn convert_float(declaration: &FieldDeclaration, raw: &str) -> Result<FieldValue, OptionsError> {
    strip_digit_separators(raw.trim())
        .and_then(|text| text.parse::<f64>().ok())
        .map(FieldValue::Float)
        .ok_or_else(|| conversion_error(declaration, raw))
}

fn convert_boolean(declaration: &FieldDeclaration, raw: &str) -> Result<FieldValue, OptionsError> {
    let value: Value = serde_json::from_str(raw).map_err(|_| conversion_error(declaration, raw))?;
    Ok(FieldValue::Boolean(is_truthy(&value)))
}

fn parse_json(declaration: &FieldDeclaration, raw: &str) -> Result<Value, OptionsError> {
    serde_json::from_str(raw).map_err(|source| OptionsError::Parse {
        field: declaration.name.to_string(),
        source,
    })
}

fn shape_mismatch(declaration: &FieldDeclaration, expected: JsonShape, actual: &Value) -> OptionsError {
    OptionsError::TypeMismatch {
        field: declaration.name.to_string(),
        expected,
        actual: JsonShape::of(actual),
    }
}

fn convert_json_object(declaration: &FieldDeclaration, raw: &str) -> Result<FieldValue, OptionsError> {
    match parse_json(declaration, raw)? {
        Value::Object(map) => Ok(FieldValue::Object(map)),
        other => Err(shape_mismatch(declaration, JsonShape::Object, &other)),
    }
}

fn convert_json_array(declaration: &FieldDeclaration, raw: &str) -> Result<FieldValue, OptionsError> {
    match parse_json(declaration, raw)? {
        Value::Array(items) => Ok(FieldValue::Array(items)),
        other => Err(shape_mismatch(declaration, JsonShape::Array, &other)),
    }
}
