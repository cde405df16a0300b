//! Field validation policy for untrusted model output
//!
//! Every string read from an LLM response goes through one of these helpers:
//! the value is trimmed, required values must be non-empty, and the trimmed
//! value must not exceed the field's maximum length (counted in characters).

use crate::SchemaError;

/// Maximum length of node ids, relationship ids and node references
pub const MAX_ID_LENGTH: usize = 200;

/// Maximum length of a relationship type
pub const MAX_RELATIONSHIP_TYPE_LENGTH: usize = 200;

/// Maximum length of a node type
pub const MAX_NODE_TYPE_LENGTH: usize = 500;

/// Maximum length of a node label
pub const MAX_LABEL_LENGTH: usize = 500;

/// Maximum length of a single summary key point
pub const MAX_KEY_POINT_LENGTH: usize = 500;

/// Maximum length of the summary prose
pub const MAX_SUMMARY_LENGTH: usize = 50_000;

/// Trim a required field and check its length.
pub fn required_field(
    field: &'static str,
    value: &str,
    max_length: usize,
) -> Result<String, SchemaError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SchemaError::new(field, "must not be empty"));
    }
    bounded(field, trimmed, max_length)
}

/// Trim an optional field and check its length.
///
/// Absent and blank values both yield `Ok(None)`.
pub fn optional_field(
    field: &'static str,
    value: Option<&str>,
    max_length: usize,
) -> Result<Option<String>, SchemaError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(trimmed) => bounded(field, trimmed, max_length).map(Some),
    }
}

/// Whether `value` is a bare (optionally signed) integer such as `34` or `-7`.
pub fn is_bare_integer(value: &str) -> bool {
    let digits = value
        .strip_prefix('-')
        .or_else(|| value.strip_prefix('+'))
        .unwrap_or(value);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// Derive a display label from a node id.
///
/// `dr_alex_johnson` becomes `Dr Alex Johnson`: the id is split on `_` and
/// each segment is capitalized (first character upper case, rest lower case).
pub fn label_from_id(id: &str) -> String {
    id.split('_').map(capitalize).collect::<Vec<_>>().join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

fn bounded(field: &'static str, trimmed: &str, max_length: usize) -> Result<String, SchemaError> {
    let length = trimmed.chars().count();
    if length > max_length {
        return Err(SchemaError::new(
            field,
            format!("length {} exceeds maximum of {}", length, max_length),
        ));
    }
    Ok(trimmed.to_string())
}
