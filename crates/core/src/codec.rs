//! Record <-> document conversion
//!
//! Records carry raw bytes; documents carry JSON strings. Encoding requires
//! every value to be valid UTF-8. Decoding accepts string, number and boolean
//! fields (the latter two read back as their JSON text), so documents written
//! by other tools can still be projected.

use std::collections::HashSet;

use serde_json::Value as JsonValue;

use crate::error::{Error, Result};
use crate::types::{DocumentContent, Record};

/// Encode a record into document content
///
/// Every field of the record is present in the result, its value coerced to
/// a JSON string.
///
/// # Errors
///
/// Returns [`Error::Encoding`] if a value is not valid UTF-8.
pub fn encode(record: &Record) -> Result<DocumentContent> {
    let mut content = DocumentContent::new();
    for (field, value) in record {
        let text = std::str::from_utf8(value).map_err(|e| Error::Encoding {
            field: field.clone(),
            reason: e.to_string(),
        })?;
        content.insert(field.clone(), JsonValue::String(text.to_owned()));
    }
    Ok(content)
}

/// Decode document content into a record
///
/// With `fields`, the result holds exactly those fields. Without, it holds
/// every field present on the document.
///
/// # Errors
///
/// - [`Error::FieldNotFound`] if a requested field is absent
/// - [`Error::Encoding`] if a returned field is null, an array or an object
pub fn decode(content: &DocumentContent, fields: Option<&HashSet<String>>) -> Result<Record> {
    match fields {
        None => content
            .iter()
            .map(|(field, value)| scalar_bytes(field, value).map(|bytes| (field.clone(), bytes)))
            .collect(),
        Some(fields) => fields
            .iter()
            .map(|field| -> Result<(String, Vec<u8>)> {
                let value = content
                    .get(field)
                    .ok_or_else(|| Error::FieldNotFound(field.clone()))?;
                Ok((field.clone(), scalar_bytes(field, value)?))
            })
            .collect(),
    }
}

fn scalar_bytes(field: &str, value: &JsonValue) -> Result<Vec<u8>> {
    match value {
        JsonValue::String(s) => Ok(s.as_bytes().to_vec()),
        JsonValue::Number(n) => Ok(n.to_string().into_bytes()),
        JsonValue::Bool(b) => Ok(b.to_string().into_bytes()),
        JsonValue::Null => Err(non_scalar(field, "null")),
        JsonValue::Array(_) => Err(non_scalar(field, "array")),
        JsonValue::Object(_) => Err(non_scalar(field, "object")),
    }
}

fn non_scalar(field: &str, found: &str) -> Error {
    Error::Encoding {
        field: field.to_string(),
        reason: format!("expected a scalar value, found {}", found),
    }
}
