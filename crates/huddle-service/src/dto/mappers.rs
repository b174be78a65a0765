//! Document mappers
//!
//! Conversions between schemaless store documents and domain entities.
//! Timestamps travel as epoch milliseconds.

use chrono::{DateTime, Utc};
use huddle_core::{Document, Fields, Message, PresenceStatus, Reactions, User};
use serde_json::{json, Value};

// ============================================================================
// User Mappers
// ============================================================================

/// Map a `user` document; absent fields take their defaults
pub fn user_from_document(doc: &Document) -> User {
    let text = |field: &str| doc.get_str(field).unwrap_or_default().to_string();

    User {
        id: doc.id().to_string(),
        name: text("name"),
        email: text("email"),
        password_hash: text("passwordHash"),
        user_image: text("userImage"),
        status: doc.get_str("status").and_then(|s| s.parse().ok()),
        last_seen: doc
            .get_i64("lastSeen")
            .and_then(DateTime::from_timestamp_millis)
            .unwrap_or_else(Utc::now),
        recent_emojis: doc.get_str_list("recentEmojis").unwrap_or_default(),
    }
}

pub fn user_to_fields(user: &User) -> Fields {
    let mut fields = Fields::new();
    fields.insert("id".into(), json!(user.id));
    fields.insert("name".into(), json!(user.name));
    fields.insert("email".into(), json!(user.email));
    fields.insert("passwordHash".into(), json!(user.password_hash));
    fields.insert("userImage".into(), json!(user.user_image));
    if let Some(status) = user.status {
        fields.insert("status".into(), json!(status.as_str()));
    }
    fields.insert("lastSeen".into(), json!(user.last_seen.timestamp_millis()));
    fields.insert("recentEmojis".into(), json!(user.recent_emojis));
    fields
}

/// Partial update for a presence transition
pub fn status_fields(id: &str, status: PresenceStatus) -> Fields {
    let mut fields = Fields::new();
    fields.insert("status".into(), json!(status.as_str()));
    fields.insert("id".into(), json!(id));
    fields
}

// ============================================================================
// Message Mappers
// ============================================================================

/// Map a `messages` document field by field
pub fn message_from_document(doc: &Document) -> Message {
    let optional = |field: &str| {
        doc.get_str(field)
            .filter(|s| !s.is_empty())
            .map(String::from)
    };

    Message {
        id: doc.id().to_string(),
        sender_id: doc.get_str("senderId").unwrap_or_default().to_string(),
        text: doc.get_str("text").unwrap_or_default().to_string(),
        time: doc
            .get_i64("time")
            .and_then(DateTime::from_timestamp_millis)
            .unwrap_or_default(),
        reactions: doc.get("reactions").map(reactions_from_value).unwrap_or_default(),
        channel_id: doc.get_str("channelId").unwrap_or_default().to_string(),
        user_id: optional("userId"),
        thread_id: optional("threadId"),
    }
}

fn reactions_from_value(value: &Value) -> Reactions {
    value
        .as_object()
        .map(|map| {
            map.iter()
                .map(|(emoji, users)| {
                    let users = users
                        .as_array()
                        .map(|items| {
                            items
                                .iter()
                                .filter_map(|u| u.as_str().map(String::from))
                                .collect()
                        })
                        .unwrap_or_default();
                    (emoji.clone(), users)
                })
                .collect()
        })
        .unwrap_or_default()
}

/// The eight persisted message fields and nothing else
pub fn message_clean_fields(message: &Message) -> Fields {
    let mut fields = Fields::new();
    fields.insert("id".into(), json!(message.id));
    fields.insert("senderId".into(), json!(message.sender_id));
    fields.insert("text".into(), json!(message.text));
    fields.insert("time".into(), json!(message.time.timestamp_millis()));
    fields.insert("reactions".into(), json!(message.reactions));
    fields.insert("channelId".into(), json!(message.channel_id));
    fields.insert("userId".into(), json!(message.user_id));
    fields.insert("threadId".into(), json!(message.thread_id));
    fields
}
