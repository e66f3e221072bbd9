//! Shared validation helpers for the todo HTTP handlers.
//!
//! Request bodies are read as loosely typed JSON where clients are known to
//! send the wrong types (`"completed": "yes"`), so the handlers can answer
//! with a field-specific 400 instead of a generic deserialisation failure.

use serde_json::{Value, json};

use crate::domain::{Error, TodoId};

/// Validation error codes reported in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    InvalidType,
    InvalidId,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidType => "invalid_type",
            Self::InvalidId => "invalid_id",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, message: String, code: ValidationCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

/// Require a JSON string.
pub(crate) fn expect_string(value: Value, field: FieldName) -> Result<String, Error> {
    match value {
        Value::String(text) => Ok(text),
        _ => {
            let name = field.as_str();
            Err(field_error(
                field,
                format!("{name} must be a string"),
                ValidationCode::InvalidType,
            ))
        }
    }
}

/// Require a JSON boolean.
pub(crate) fn expect_bool(value: &Value, field: FieldName) -> Result<bool, Error> {
    value.as_bool().ok_or_else(|| {
        let name = field.as_str();
        field_error(
            field,
            format!("{name} must be a boolean"),
            ValidationCode::InvalidType,
        )
    })
}

fn invalid_id_error(field: FieldName, value: impl Into<Value>) -> Error {
    let name = field.as_str();
    Error::invalid_request(format!("{name} must be a positive integer")).with_details(json!({
        "field": name,
        "value": value.into(),
        "code": ValidationCode::InvalidId.as_str(),
    }))
}

/// Parse a todo id from a path segment.
pub(crate) fn parse_todo_id(raw: &str, field: FieldName) -> Result<TodoId, Error> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|value| TodoId::new(value).ok())
        .ok_or_else(|| invalid_id_error(field, raw))
}

/// Validate the todo id at `index` of a list field.
pub(crate) fn parse_todo_id_at(raw: i64, field: FieldName, index: usize) -> Result<TodoId, Error> {
    TodoId::new(raw).map_err(|_| {
        let name = field.as_str();
        Error::invalid_request(format!("{name} must contain positive integer ids")).with_details(
            json!({
                "field": name,
                "index": index,
                "value": raw,
                "code": ValidationCode::InvalidId.as_str(),
            }),
        )
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const ID: FieldName = FieldName::new("id");

    #[rstest]
    #[case("1", 1)]
    #[case(" 42 ", 42)]
    fn path_ids_parse(#[case] raw: &str, #[case] expected: i64) {
        assert_eq!(parse_todo_id(raw, ID).expect("valid id").get(), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-3")]
    #[case("abc")]
    #[case("1.5")]
    #[case("")]
    fn invalid_path_ids_are_rejected(#[case] raw: &str) {
        let error = parse_todo_id(raw, ID).expect_err("invalid id");
        assert_eq!(
            error.details().and_then(|d| d.get("code")),
            Some(&json!("invalid_id"))
        );
    }

    #[rstest]
    #[case(json!("yes"))]
    #[case(json!(1))]
    #[case(json!({"value": true}))]
    fn non_boolean_completed_is_rejected(#[case] value: Value) {
        let error = expect_bool(&value, FieldName::new("completed")).expect_err("not a bool");
        assert_eq!(error.message(), "completed must be a boolean");
    }

    #[rstest]
    fn non_string_title_is_rejected() {
        let error = expect_string(json!(12), FieldName::new("title")).expect_err("not a string");
        assert_eq!(error.message(), "title must be a string");
    }

    #[rstest]
    #[case(0)]
    #[case(-9)]
    fn list_ids_must_be_positive(#[case] raw: i64) {
        let error = parse_todo_id_at(raw, FieldName::new("ids"), 1).expect_err("invalid id");
        assert_eq!(error.details().and_then(|d| d.get("index")), Some(&json!(1)));
        assert_eq!(error.details().and_then(|d| d.get("value")), Some(&json!(raw)));
    }
}
