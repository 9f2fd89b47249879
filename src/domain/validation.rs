//! Field-level validation of inbound message payloads.
//!
//! Both shapes check every field and report all failures together.

use crate::domain::message::{MessagePatch, NewMessage, OWNER_NAME_MAX_CHARS};
use serde::Serialize;
use serde_json::{Map, Value};

const ROOT: &str = "__root__";

/// One failed field, rendered verbatim in the error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    fn new(field: &str, msg: impl Into<String>, kind: &str) -> Self {
        Self { loc: vec![field.to_string()], msg: msg.into(), kind: kind.to_string() }
    }

    #[must_use]
    pub fn missing(field: &str) -> Self {
        Self::new(field, "field required", "value_error.missing")
    }

    #[must_use]
    pub fn not_a_string(field: &str) -> Self {
        Self::new(field, "str type expected", "type_error.str")
    }

    #[must_use]
    pub fn null(field: &str) -> Self {
        Self::new(field, "none is not an allowed value", "type_error.none.not_allowed")
    }

    #[must_use]
    pub fn nul_character(field: &str) -> Self {
        Self::new(field, "string must not contain NUL characters", "value_error.str.nul")
    }

    #[must_use]
    pub fn too_long(field: &str, max_chars: usize) -> Self {
        Self::new(field, format!("{field} must be less then {max_chars} chars"), "value_error.any_str.max_length")
    }

    fn not_an_object() -> Self {
        Self::new(ROOT, "value is not a valid dict", "type_error.dict")
    }
}

type FieldResult<T> = Result<T, FieldError>;

fn as_object(payload: &Value) -> Result<&Map<String, Value>, Vec<FieldError>> {
    payload.as_object().ok_or_else(|| vec![FieldError::not_an_object()])
}

fn string_field(field: &str, value: &Value) -> FieldResult<String> {
    match value {
        Value::String(s) if s.contains('\0') => Err(FieldError::nul_character(field)),
        Value::String(s) => Ok(s.clone()),
        Value::Null => Err(FieldError::null(field)),
        _ => Err(FieldError::not_a_string(field)),
    }
}

fn owner_name_field(field: &str, value: &Value) -> FieldResult<String> {
    let owner_name = string_field(field, value)?;
    if owner_name.chars().count() > OWNER_NAME_MAX_CHARS {
        return Err(FieldError::too_long(field, OWNER_NAME_MAX_CHARS));
    }
    Ok(owner_name)
}

fn required(
    object: &Map<String, Value>,
    field: &str,
    check: fn(&str, &Value) -> FieldResult<String>,
) -> FieldResult<String> {
    object.get(field).map_or_else(|| Err(FieldError::missing(field)), |value| check(field, value))
}

fn optional(
    object: &Map<String, Value>,
    field: &str,
    check: fn(&str, &Value) -> FieldResult<String>,
) -> FieldResult<Option<String>> {
    object.get(field).map(|value| check(field, value)).transpose()
}

fn keep_ok<T>(result: FieldResult<T>, errors: &mut Vec<FieldError>) -> Option<T> {
    result.map_err(|e| errors.push(e)).ok()
}

/// Validates a create payload: `title`, `text` and `owner_name` are all required strings.
///
/// # Errors
/// Returns every field that is missing, not a string, or breaks a field rule.
pub fn validate_create(payload: &Value) -> Result<NewMessage, Vec<FieldError>> {
    let object = as_object(payload)?;
    let mut errors = Vec::new();

    let title = keep_ok(required(object, "title", string_field), &mut errors);
    let text = keep_ok(required(object, "text", string_field), &mut errors);
    let owner_name = keep_ok(required(object, "owner_name", owner_name_field), &mut errors);

    match (title, text, owner_name) {
        (Some(title), Some(text), Some(owner_name)) => Ok(NewMessage { title, text, owner_name }),
        _ => Err(errors),
    }
}

/// Validates a partial update payload. Absent fields stay absent in the result.
///
/// # Errors
/// Returns every present field that is not a string or breaks a field rule.
pub fn validate_patch(payload: &Value) -> Result<MessagePatch, Vec<FieldError>> {
    let object = as_object(payload)?;
    let mut errors = Vec::new();

    let title = keep_ok(optional(object, "title", string_field), &mut errors).flatten();
    let text = keep_ok(optional(object, "text", string_field), &mut errors).flatten();
    let owner_name = keep_ok(optional(object, "owner_name", owner_name_field), &mut errors).flatten();

    if errors.is_empty() { Ok(MessagePatch { title, text, owner_name }) } else { Err(errors) }
}
