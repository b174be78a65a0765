//! Documents and document references
//!
//! A document is a schemaless JSON object addressed by `collection/id`.

use serde_json::Value;
use std::fmt;

/// Field map of a single document
pub type Fields = serde_json::Map<String, Value>;

/// Address of a document inside a collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentRef {
    collection: String,
    id: String,
}

impl DocumentRef {
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
        }
    }

    #[inline]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// `collection/id`
    pub fn path(&self) -> String {
        format!("{}/{}", self.collection, self.id)
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

/// A document read from the store
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub reference: DocumentRef,
    pub fields: Fields,
}

impl Document {
    pub fn new(reference: DocumentRef, fields: Fields) -> Self {
        Self { reference, fields }
    }

    /// Store key of this document
    #[inline]
    pub fn id(&self) -> &str {
        self.reference.id()
    }

    #[inline]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// String field, `None` when absent or not a string
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Integer field, `None` when absent or not an integer
    pub fn get_i64(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(Value::as_i64)
    }

    /// Array of strings; non-string elements are skipped
    pub fn get_str_list(&self, field: &str) -> Option<Vec<String>> {
        self.get(field).and_then(Value::as_array).map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str().map(String::from))
                .collect()
        })
    }
}
