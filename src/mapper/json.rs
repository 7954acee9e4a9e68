//! Path-aware reads over `serde_json::Value`.
//!
//! `JsonObject` wraps one JSON object together with its location in the document. Required
//! reads fail with a `StructuralError` naming that location; optional reads go through
//! `is_truthy`.

use serde_json::{Map, Value};

use super::{MapResult, StructuralError};

/// Upstream signals "no event" either by omitting a key or by sending a falsy value
/// (`null`, `false`, `0`, `""`, `[]`, `{}`). Every optional read goes through this check.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Read-only view of a JSON object that remembers where it sits in the document,
/// so every failure names the full path of the offending field.
#[derive(Debug, Clone)]
pub struct JsonObject<'a> {
    path: String,
    fields: &'a Map<String, Value>,
}

impl<'a> JsonObject<'a> {
    pub fn root(value: &'a Value) -> MapResult<Self> {
        Self::at("$".to_string(), value)
    }

    fn at(path: String, value: &'a Value) -> MapResult<Self> {
        match value.as_object() {
            Some(fields) => Ok(Self { path, fields }),
            None => Err(StructuralError::mismatch(path, "object", value)),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn child_path(&self, key: &str) -> String {
        format!("{}.{}", self.path, key)
    }

    fn required(&self, key: &str) -> MapResult<&'a Value> {
        self.fields
            .get(key)
            .ok_or_else(|| StructuralError::MissingKey {
                path: self.child_path(key),
            })
    }

    fn optional(&self, key: &str) -> Option<&'a Value> {
        self.fields.get(key).filter(|v| is_truthy(v))
    }

    /// True when the key exists and its value is truthy
    pub fn has(&self, key: &str) -> bool {
        self.optional(key).is_some()
    }

    pub fn string(&self, key: &str) -> MapResult<String> {
        let value = self.required(key)?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| StructuralError::mismatch(self.child_path(key), "string", value))
    }

    pub fn int(&self, key: &str) -> MapResult<i64> {
        let value = self.required(key)?;
        value
            .as_i64()
            .ok_or_else(|| StructuralError::mismatch(self.child_path(key), "integer", value))
    }

    /// Integers are accepted and widened; upstream coordinates are usually whole numbers
    pub fn float(&self, key: &str) -> MapResult<f64> {
        let value = self.required(key)?;
        value
            .as_f64()
            .ok_or_else(|| StructuralError::mismatch(self.child_path(key), "number", value))
    }

    pub fn boolean(&self, key: &str) -> MapResult<bool> {
        let value = self.required(key)?;
        value
            .as_bool()
            .ok_or_else(|| StructuralError::mismatch(self.child_path(key), "boolean", value))
    }

    /// Textual form of a scalar: strings verbatim, booleans as `True`/`False`, numbers as
    /// JSON text
    pub fn scalar_text(&self, key: &str) -> MapResult<String> {
        let value = self.required(key)?;
        match value {
            Value::String(s) => Ok(s.clone()),
            Value::Bool(true) => Ok("True".to_string()),
            Value::Bool(false) => Ok("False".to_string()),
            Value::Number(_) => Ok(value.to_string()),
            other => Err(StructuralError::mismatch(self.child_path(key), "scalar", other)),
        }
    }

    pub fn object(&self, key: &str) -> MapResult<JsonObject<'a>> {
        let value = self.required(key)?;
        Self::at(self.child_path(key), value)
    }

    pub fn objects(&self, key: &str) -> MapResult<Vec<JsonObject<'a>>> {
        let value = self.required(key)?;
        Self::array_of_objects(self.child_path(key), value)
    }

    pub fn strings(&self, key: &str) -> MapResult<Vec<String>> {
        let path = self.child_path(key);
        let value = self.required(key)?;
        let items = value
            .as_array()
            .ok_or_else(|| StructuralError::mismatch(path.clone(), "array", value))?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| StructuralError::mismatch(format!("{}[{}]", path, i), "string", item))
            })
            .collect()
    }

    pub fn optional_string(&self, key: &str) -> MapResult<Option<String>> {
        match self.optional(key) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(|s| Some(s.to_string()))
                .ok_or_else(|| StructuralError::mismatch(self.child_path(key), "string", value)),
        }
    }

    pub fn optional_objects(&self, key: &str) -> MapResult<Option<Vec<JsonObject<'a>>>> {
        match self.optional(key) {
            None => Ok(None),
            Some(value) => Self::array_of_objects(self.child_path(key), value).map(Some),
        }
    }

    pub(crate) fn array_of_objects(path: String, value: &'a Value) -> MapResult<Vec<JsonObject<'a>>> {
        let items = value
            .as_array()
            .ok_or_else(|| StructuralError::mismatch(path.clone(), "array", value))?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| Self::at(format!("{}[{}]", path, i), item))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!(""), json!([]), json!({})] {
            assert!(!is_truthy(&falsy), "{} should be falsy", falsy);
        }
        for truthy in [json!(true), json!(-1), json!("x"), json!([0]), json!({"a": null})] {
            assert!(is_truthy(&truthy), "{} should be truthy", truthy);
        }
    }

    #[test]
    fn test_missing_key_reports_full_path() {
        let doc = json!({ "matchInfo": { "rounds": [ {}, { "inner": {} } ] } });
        let root = JsonObject::root(&doc).unwrap();
        let rounds = root.object("matchInfo").unwrap().objects("rounds").unwrap();
        let err = rounds[1].object("inner").unwrap().string("x").unwrap_err();
        assert_eq!(
            err,
            StructuralError::MissingKey {
                path: "$.matchInfo.rounds[1].inner.x".to_string()
            }
        );
    }

    #[test]
    fn test_type_mismatch_names_expected_and_found() {
        let doc = json!({ "score": "high" });
        let root = JsonObject::root(&doc).unwrap();
        match root.int("score").unwrap_err() {
            StructuralError::TypeMismatch { path, expected, found } => {
                assert_eq!(path, "$.score");
                assert_eq!(expected, "integer");
                assert_eq!(found, "string");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_float_accepts_integers_without_loss() {
        let doc = json!({ "x": -2381, "big": 9007199254740992_i64 });
        let root = JsonObject::root(&doc).unwrap();
        assert_eq!(root.float("x").unwrap(), -2381.0);
        assert_eq!(root.float("big").unwrap(), 9007199254740992.0);
    }

    #[test]
    fn test_optional_reads_skip_falsy_values() {
        let doc = json!({ "empty": "", "nulled": null, "name": "Obli", "list": [] });
        let root = JsonObject::root(&doc).unwrap();
        assert_eq!(root.optional_string("empty").unwrap(), None);
        assert_eq!(root.optional_string("nulled").unwrap(), None);
        assert_eq!(root.optional_string("absent").unwrap(), None);
        assert_eq!(root.optional_string("name").unwrap(), Some("Obli".to_string()));
        assert!(root.optional_objects("list").unwrap().is_none());
        assert!(!root.has("list"));
    }

    #[test]
    fn test_scalar_text() {
        let doc = json!({ "a": true, "b": "false", "c": 3, "d": [], "e": false, "f": 1.5 });
        let root = JsonObject::root(&doc).unwrap();
        assert_eq!(root.scalar_text("a").unwrap(), "True");
        assert_eq!(root.scalar_text("e").unwrap(), "False");
        assert_eq!(root.scalar_text("b").unwrap(), "false");
        assert_eq!(root.scalar_text("c").unwrap(), "3");
        assert_eq!(root.scalar_text("f").unwrap(), "1.5");
        assert!(root.scalar_text("d").is_err());
    }
}
