//! Client-side document id generation

use uuid::Uuid;

/// Generate a new document id (32 lowercase hex characters)
pub fn generate_document_id() -> String {
    Uuid::new_v4().simple().to_string()
}
