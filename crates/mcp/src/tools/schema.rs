// Declarative argument schemas: one description drives both the advertised
// JSON Schema and the runtime validation of untyped tool arguments.

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

/// Accepted JSON shape of a single argument.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    String,
    Integer,
    Boolean,
    /// A string restricted to the listed values.
    Enum(Vec<&'static str>),
}

impl FieldKind {
    fn expected(&self) -> &'static str {
        match self {
            Self::String | Self::Enum(_) => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::String | Self::Enum(_) => value.is_string(),
            Self::Integer => value.as_i64().is_some(),
            Self::Boolean => value.is_boolean(),
        }
    }
}

/// One named argument of a tool.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<Value>,
    pub description: &'static str,
}

impl FieldSpec {
    pub fn required(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
            description,
        }
    }

    /// Optional argument with no default: stays absent when not supplied.
    pub fn optional(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: None,
            description,
        }
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    fn json_schema(&self) -> Value {
        let mut schema = json!({
            "type": self.kind.expected(),
            "description": self.description,
        });
        if let FieldKind::Enum(allowed) = &self.kind {
            schema["enum"] = json!(allowed);
        }
        if let Some(default) = &self.default {
            schema["default"] = default.clone();
        }
        schema
    }

    fn check(&self, value: &Value) -> Result<(), ValidationError> {
        if !self.kind.accepts(value) {
            return Err(ValidationError::WrongType {
                field: self.name,
                expected: self.kind.expected(),
                actual: json_type(value),
            });
        }
        if let (FieldKind::Enum(allowed), Some(s)) = (&self.kind, value.as_str()) {
            if !allowed.iter().any(|a| *a == s) {
                return Err(ValidationError::NotInEnum {
                    field: self.name,
                    value: s.to_string(),
                    allowed: allowed.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Why a set of tool arguments was rejected.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("expected an object of arguments, got {actual}")]
    NotAnObject { actual: &'static str },

    #[error("missing required field `{field}`")]
    Missing { field: &'static str },

    #[error("field `{field}`: expected {expected}, got {actual}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("field `{field}`: \"{value}\" is not one of: {}", .allowed.join(", "))]
    NotInEnum {
        field: &'static str,
        value: String,
        allowed: Vec<&'static str>,
    },

    #[error("arguments do not match the tool's record: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ValidationError {
    /// Name of the offending field, when the failure is about one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Missing { field }
            | Self::WrongType { field, .. }
            | Self::NotInEnum { field, .. } => Some(field),
            Self::NotAnObject { .. } | Self::Decode(_) => None,
        }
    }
}

/// Argument schema of one tool.
#[derive(Debug, Clone)]
pub struct ArgSchema {
    fields: Vec<FieldSpec>,
}

impl ArgSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// JSON Schema advertised in `tools/list`.
    pub fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|f| (f.name.to_string(), f.json_schema()))
            .collect();
        let required: Vec<&str> = self
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Check `arguments` and fill in defaults.
    ///
    /// The result holds every schema field that is either supplied or has a
    /// default, in schema order. Unknown keys are dropped. `null` is
    /// `null` (a type error), not absence.
    pub fn validate(&self, arguments: &Value) -> Result<Map<String, Value>, ValidationError> {
        let empty = Map::new();
        let supplied = match arguments {
            Value::Object(map) => map,
            Value::Null => &empty,
            other => {
                return Err(ValidationError::NotAnObject {
                    actual: json_type(other),
                })
            }
        };

        let mut resolved = Map::new();
        for field in &self.fields {
            match supplied.get(field.name) {
                Some(value) => {
                    field.check(value)?;
                    resolved.insert(field.name.to_string(), value.clone());
                }
                None if field.required => {
                    return Err(ValidationError::Missing { field: field.name });
                }
                None => {
                    if let Some(default) = &field.default {
                        resolved.insert(field.name.to_string(), default.clone());
                    }
                }
            }
        }
        Ok(resolved)
    }

    /// Validate, then decode into the typed record.
    pub fn parse<T: DeserializeOwned>(&self, arguments: &Value) -> Result<T, ValidationError> {
        let resolved = self.validate(arguments)?;
        Ok(serde_json::from_value(Value::Object(resolved))?)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> ArgSchema {
        ArgSchema::new(vec![
            FieldSpec::required("name", FieldKind::String, "Name"),
            FieldSpec::optional("count", FieldKind::Integer, "Count").with_default(1),
            FieldSpec::optional("mode", FieldKind::Enum(vec!["fast", "slow"]), "Mode")
                .with_default("fast"),
            FieldSpec::optional("tag", FieldKind::String, "Tag"),
            FieldSpec::optional("verbose", FieldKind::Boolean, "Verbose").with_default(false),
        ])
    }

    #[test]
    fn test_defaults_are_filled() {
        let resolved = schema().validate(&json!({"name": "a"})).unwrap();

        assert_eq!(
            Value::Object(resolved),
            json!({"name": "a", "count": 1, "mode": "fast", "verbose": false})
        );
    }

    #[test]
    fn test_optional_without_default_stays_absent() {
        let resolved = schema().validate(&json!({"name": "a"})).unwrap();
        assert!(!resolved.contains_key("tag"));

        let resolved = schema().validate(&json!({"name": "a", "tag": "x"})).unwrap();
        assert_eq!(resolved["tag"], "x");
    }

    #[test]
    fn test_supplied_values_win_over_defaults() {
        let resolved = schema()
            .validate(&json!({"name": "a", "count": 5, "mode": "slow", "verbose": true}))
            .unwrap();

        assert_eq!(resolved["count"], 5);
        assert_eq!(resolved["mode"], "slow");
        assert_eq!(resolved["verbose"], true);
    }

    #[test]
    fn test_missing_required_field() {
        let err = schema().validate(&json!({"count": 2})).unwrap_err();

        assert!(matches!(err, ValidationError::Missing { field: "name" }));
        assert_eq!(err.to_string(), "missing required field `name`");
    }

    #[test]
    fn test_null_arguments_behave_like_empty_object() {
        let err = schema().validate(&Value::Null).unwrap_err();
        assert_eq!(err.field(), Some("name"));
    }

    #[test]
    fn test_wrong_type() {
        let err = schema().validate(&json!({"name": 7})).unwrap_err();
        assert_eq!(err.to_string(), "field `name`: expected string, got integer");

        let err = schema()
            .validate(&json!({"name": "a", "verbose": "yes"}))
            .unwrap_err();
        assert_eq!(err.field(), Some("verbose"));
    }

    #[test]
    fn test_fractional_integer_rejected() {
        let err = schema()
            .validate(&json!({"name": "a", "count": 1.5}))
            .unwrap_err();
        assert_eq!(err.to_string(), "field `count`: expected integer, got number");

        let err = schema()
            .validate(&json!({"name": "a", "count": 2.0}))
            .unwrap_err();
        assert_eq!(err.field(), Some("count"));
    }

    #[test]
    fn test_explicit_null_is_a_type_error() {
        let err = schema()
            .validate(&json!({"name": "a", "tag": null}))
            .unwrap_err();
        assert!(matches!(err, ValidationError::WrongType { field: "tag", actual: "null", .. }));
    }

    #[test]
    fn test_value_outside_enum() {
        let err = schema()
            .validate(&json!({"name": "a", "mode": "warp"}))
            .unwrap_err();

        assert_eq!(err.to_string(), "field `mode`: \"warp\" is not one of: fast, slow");
    }

    #[test]
    fn test_non_object_arguments() {
        let err = schema().validate(&json!(["a"])).unwrap_err();
        assert!(matches!(err, ValidationError::NotAnObject { actual: "array" }));
    }

    #[test]
    fn test_unknown_keys_are_dropped() {
        let resolved = schema()
            .validate(&json!({"name": "a", "extra": 1}))
            .unwrap();
        assert!(!resolved.contains_key("extra"));
    }

    #[test]
    fn test_json_schema() {
        let schema = schema().to_json_schema();

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["name"]));
        assert_eq!(schema["properties"]["count"]["type"], "integer");
        assert_eq!(schema["properties"]["count"]["default"], 1);
        assert_eq!(schema["properties"]["mode"]["enum"], json!(["fast", "slow"]));
        assert!(schema["properties"]["tag"].get("default").is_none());
    }
}
