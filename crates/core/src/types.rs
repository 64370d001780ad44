//! Record and document types
//!
//! The harness speaks in [`Record`]s: field names mapped to raw bytes. The
//! store speaks in [`Document`]s: a [`DocumentId`] plus a JSON object whose
//! values are strings, since the document format has no byte-string type.

use std::collections::HashMap;
use std::fmt;

/// Field name to opaque byte value, as produced and consumed by the harness
pub type Record = HashMap<String, Vec<u8>>;

/// JSON object content of a stored document
pub type DocumentContent = serde_json::Map<String, serde_json::Value>;

/// Identifier of a document inside a bucket
///
/// Only [`compose_id`](crate::key::compose_id) creates ids, so every id in
/// the system follows the `table-key` scheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(String);

impl DocumentId {
    pub(crate) fn new(id: String) -> Self {
        DocumentId(id)
    }

    /// Borrow the id text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the id, returning its text
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A stored document: id plus JSON object content
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    id: DocumentId,
    content: DocumentContent,
}

impl Document {
    /// Create a document
    pub fn new(id: DocumentId, content: DocumentContent) -> Self {
        Self { id, content }
    }

    /// Document id
    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    /// Document content
    pub fn content(&self) -> &DocumentContent {
        &self.content
    }

    /// Split into id and content
    pub fn into_parts(self) -> (DocumentId, DocumentContent) {
        (self.id, self.content)
    }
}
