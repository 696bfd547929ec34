use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::OptionsError;
use crate::field::FieldKind;

/// A converted option value, tagged by the kind that produced it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Object(Map<String, Value>),
    Array(Vec<Value>),
}

impl FieldValue {
    /// Kind of the converter that produced this value.
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::String(_) => FieldKind::String,
            FieldValue::Integer(_) => FieldKind::Integer,
            FieldValue::Float(_) => FieldKind::Float,
            FieldValue::Boolean(_) => FieldKind::Boolean,
            FieldValue::Object(_) => FieldKind::JsonObject,
            FieldValue::Array(_) => FieldKind::JsonArray,
        }
    }
}

/// Rust types a record field may hold, one per [`FieldKind`].
pub trait FromFieldValue: Sized {
    const KIND: FieldKind;

    /// Unwraps the value when it carries this type, handing it back otherwise.
    fn from_field_value(value: FieldValue) -> Result<Self, FieldValue>;
}

macro_rules! impl_from_field_value {
    ($($ty:ty => $variant:ident, $kind:ident;)*) => {
        $(
            impl FromFieldValue for $ty {
                const KIND: FieldKind = FieldKind::$kind;

                fn from_field_value(value: FieldValue) -> Result<Self, FieldValue> {
                    match value {
                        FieldValue::$variant(inner) => Ok(inner),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

impl_from_field_value! {
    String => String, String;
    i64 => Integer, Integer;
    f64 => Float, Float;
    bool => Boolean, Boolean;
    Map<String, Value> => Object, JsonObject;
    Vec<Value> => Array, JsonArray;
}

/// Converted values keyed by field name, in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedValues {
    entries: IndexMap<&'static str, FieldValue>,
}

impl ResolvedValues {
    /// Creates an empty set of values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the converted value for `name`, replacing any earlier one.
    pub fn insert(&mut self, name: &'static str, value: FieldValue) {
        self.entries.insert(name, value);
    }

    /// Returns the converted value for `name`, if resolved.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries.get(name)
    }

    /// Number of values not yet taken.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether every value has been taken.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates values in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.entries.iter().map(|(name, value)| (*name, value))
    }

    /// Removes the value for `name` as the record field type `T`.
    pub fn take<T: FromFieldValue>(&mut self, name: &str) -> Result<T, OptionsError> {
        let value = self.entries.shift_remove(name).ok_or_else(|| OptionsError::MissingField {
            field: name.to_string(),
            key: name.to_ascii_uppercase(),
        })?;
        T::from_field_value(value).map_err(|value| OptionsError::KindMismatch {
            field: name.to_string(),
            declared: value.kind(),
            requested: T::KIND,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn take_extracts_typed_values() {
        let mut values = ResolvedValues::new();
        values.insert("limit", FieldValue::Integer(5));
        values.insert("tags", FieldValue::Array(vec![json!("a")]));

        let limit: i64 = values.take("limit").expect("limit present");
        assert_eq!(limit, 5);
        let tags: Vec<Value> = values.take("tags").expect("tags present");
        assert_eq!(tags, vec![json!("a")]);
        assert!(values.is_empty());
    }

    #[test]
    fn take_reports_missing_and_mismatched_fields() {
        let mut values = ResolvedValues::new();
        values.insert("ratio", FieldValue::Float(0.5));

        let error = values.take::<String>("source_table").expect_err("absent");
        assert!(matches!(error, OptionsError::MissingField { ref key, .. } if key == "SOURCE_TABLE"));

        match values.take::<bool>("ratio") {
            Err(OptionsError::KindMismatch { field, declared, requested }) => {
                assert_eq!(field, "ratio");
                assert_eq!(declared, FieldKind::Float);
                assert_eq!(requested, FieldKind::Boolean);
            }
            other => panic!("expected a kind mismatch, got {other:?}"),
        }
    }

    #[test]
    fn serializes_in_declaration_order() {
        let mut values = ResolvedValues::new();
        values.insert("job_name", FieldValue::String("j".to_string()));
        values.insert("enabled", FieldValue::Boolean(false));
        values.insert("filters", FieldValue::Object(Map::new()));

        let rendered = serde_json::to_string(&values).expect("serializes");
        assert_eq!(rendered, r#"{"job_name":"j","enabled":false,"filters":{}}"#);
    }
}
