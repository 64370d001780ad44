//! Document command handlers.
//!
//! Each handler makes exactly one store call. Writes carry the executor's
//! durability requirement; the store either confirms it or fails the call.

use std::collections::HashSet;

use docbench_core::{compose_id, decode, encode, Document, Record};
use docbench_durability::DurabilityRequirement;
use docbench_engine::Bucket;

use crate::convert::convert_result;
use crate::{Error, Result};

// =============================================================================
// Individual Handlers
// =============================================================================

/// Handle Read command.
pub fn read(
    bucket: &dyn Bucket,
    table: &str,
    key: &str,
    fields: Option<&HashSet<String>>,
) -> Result<Record> {
    let id = compose_id(table, key)?;
    let document = convert_result(bucket.get(&id))?.ok_or_else(|| Error::KeyNotFound {
        key: id.to_string(),
    })?;
    convert_result(decode(document.content(), fields))
}

/// Handle Insert command.
pub fn insert(
    bucket: &dyn Bucket,
    durability: DurabilityRequirement,
    table: &str,
    key: &str,
    values: &Record,
) -> Result<()> {
    let document = to_document(table, key, values)?;
    convert_result(bucket.insert(document, durability))
}

/// Handle Update command.
pub fn update(
    bucket: &dyn Bucket,
    durability: DurabilityRequirement,
    table: &str,
    key: &str,
    values: &Record,
) -> Result<()> {
    let document = to_document(table, key, values)?;
    convert_result(bucket.replace(document, durability))
}

/// Handle UpdateField command.
pub fn update_field(
    bucket: &dyn Bucket,
    durability: DurabilityRequirement,
    table: &str,
    key: &str,
    field: &str,
    value: &[u8],
) -> Result<()> {
    let mut values = Record::with_capacity(1);
    values.insert(field.to_string(), value.to_vec());
    update(bucket, durability, table, key, &values)
}

/// Handle Delete command.
pub fn delete(
    bucket: &dyn Bucket,
    durability: DurabilityRequirement,
    table: &str,
    key: &str,
) -> Result<()> {
    let id = compose_id(table, key)?;
    convert_result(bucket.remove(&id, durability))
}

// =============================================================================
// Helpers
// =============================================================================

fn to_document(table: &str, key: &str, values: &Record) -> Result<Document> {
    let id = compose_id(table, key)?;
    let content = convert_result(encode(values))?;
    Ok(Document::new(id, content))
}
