//! Document identity
//!
//! A document id is the table name, the separator `-`, and the record key.
//!
//! ## Contract
//!
//! - Tables must not be empty
//! - Tables must not contain the separator
//! - Keys must not be empty (they may contain the separator)
//!
//! Because the table never contains the separator, the first separator in an
//! id always ends the table name, and two distinct (table, key) pairs never
//! produce the same id. Ids are never decomposed after creation.

use crate::types::DocumentId;
use thiserror::Error;

/// Separator between table and key in a document id
pub const ID_SEPARATOR: char = '-';

/// Compose the document id for a record
///
/// # Examples
///
/// ```
/// use docbench_core::key::compose_id;
///
/// let id = compose_id("usertable", "user1").unwrap();
/// assert_eq!(id.as_str(), "usertable-user1");
///
/// // Keys may contain the separator, tables may not
/// assert!(compose_id("usertable", "user-1").is_ok());
/// assert!(compose_id("user-table", "1").is_err());
/// ```
pub fn compose_id(table: &str, key: &str) -> Result<DocumentId, IdError> {
    validate_table(table)?;
    validate_key(key)?;

    let mut id = String::with_capacity(table.len() + 1 + key.len());
    id.push_str(table);
    id.push(ID_SEPARATOR);
    id.push_str(key);
    Ok(DocumentId::new(id))
}

/// Validate a table name
pub fn validate_table(table: &str) -> Result<(), IdError> {
    if table.is_empty() {
        return Err(IdError::EmptyTable);
    }
    if table.contains(ID_SEPARATOR) {
        return Err(IdError::TableContainsSeparator {
            table: table.to_string(),
        });
    }
    Ok(())
}

/// Validate a record key
pub fn validate_key(key: &str) -> Result<(), IdError> {
    if key.is_empty() {
        return Err(IdError::EmptyKey);
    }
    Ok(())
}

/// Id composition errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdError {
    /// Table name is empty
    #[error("Table name cannot be empty")]
    EmptyTable,

    /// Record key is empty
    #[error("Key cannot be empty")]
    EmptyKey,

    /// Table name contains the id separator
    #[error("Table name '{table}' cannot contain '{}'", ID_SEPARATOR)]
    TableContainsSeparator {
        /// Rejected table name
        table: String,
    },
}

impl IdError {
    /// Short reason code for logs
    pub fn reason_code(&self) -> &'static str {
        match self {
            IdError::EmptyTable => "empty_table",
            IdError::EmptyKey => "empty_key",
            IdError::TableContainsSeparator { .. } => "table_contains_separator",
        }
    }
}
