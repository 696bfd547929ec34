use thiserror::Error;

use crate::field::{FieldKind, JsonShape};

/// Error surfaced when resolved options cannot be turned into a record.
///
/// Every variant names the offending field so that operators can trace a
/// failed job launch back to the argument that caused it.
#[derive(Debug, Error)]
pub enum OptionsError {
    /// The declared field has no entry in the resolved options mapping.
    #[error("missing resolved option '{key}' for field '{field}'")]
    MissingField { field: String, key: String },

    /// A JSON-typed field carried text that is not valid JSON.
    #[error("invalid JSON for field '{field}': {source}")]
    Parse {
        field: String,
        #[source]
        source: serde_json::Error,
    },

    /// The parsed JSON value is not the declared container kind.
    #[error("invalid type for field '{field}': expected JSON {expected}, found {actual}")]
    TypeMismatch {
        field: String,
        expected: JsonShape,
        actual: JsonShape,
    },

    /// The raw value cannot be converted to the declared scalar type.
    #[error("cannot convert value {value:?} for field '{field}' to {target}")]
    TypeConversion {
        field: String,
        target: FieldKind,
        value: String,
    },

    /// A record requested a field with a Rust type that disagrees with its declaration.
    #[error("field '{field}' is declared as {declared} but was requested as {requested}")]
    KindMismatch {
        field: String,
        declared: FieldKind,
        requested: FieldKind,
    },
}

impl OptionsError {
    /// Name of the field that failed to resolve.
    pub fn field(&self) -> &str {
        match self {
            Self::MissingField { field, .. }
            | Self::Parse { field, .. }
            | Self::TypeMismatch { field, .. }
            | Self::TypeConversion { field, .. }
            | Self::KindMismatch { field, .. } => field,
        }
    }

    /// Stable label for the variant, safe to log because it never carries the raw value.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::Parse { .. } => "parse",
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::TypeConversion { .. } => "type_conversion",
            Self::KindMismatch { .. } => "kind_mismatch",
        }
    }
}
