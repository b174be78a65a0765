//! User entity - a roster entry in the user directory

use chrono::{DateTime, Utc};

use crate::value_objects::PresenceStatus;

/// User entity as stored in the `user` collection
///
/// `id` is empty until the store assigns one, or carries the external
/// identity for federated sign-ins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Argon2 PHC string; empty for federated accounts
    pub password_hash: String,
    pub user_image: String,
    pub status: Option<PresenceStatus>,
    pub last_seen: DateTime<Utc>,
    pub recent_emojis: Vec<String>,
}

impl User {
    /// Create a new, not yet persisted, offline user
    pub fn new(name: String, email: String) -> Self {
        Self {
            id: String::new(),
            name,
            email,
            password_hash: String::new(),
            user_image: String::new(),
            status: Some(PresenceStatus::Offline),
            last_seen: Utc::now(),
            recent_emojis: Vec::new(),
        }
    }

    /// Create a user with an externally supplied identity
    pub fn with_id(id: String, name: String, email: String) -> Self {
        Self {
            id,
            ..Self::new(name, email)
        }
    }

    /// Whether the store has (or the caller has) assigned an identifier
    #[inline]
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }

    #[inline]
    pub fn is_online(&self) -> bool {
        self.status == Some(PresenceStatus::Online)
    }

    /// Lowercased, trimmed name used for fuzzy lookups
    pub fn normalized_name(&self) -> String {
        self.name.trim().to_lowercase()
    }

    /// True if every token appears somewhere in the normalized name
    pub fn name_contains_all<S: AsRef<str>>(&self, tokens: &[S]) -> bool {
        let name = self.normalized_name();
        tokens.iter().all(|token| name.contains(token.as_ref()))
    }
}
