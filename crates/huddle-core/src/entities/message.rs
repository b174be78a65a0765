//! Message entity - represents a chat message

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

/// Emoji to the ids of the users who reacted with it
pub type Reactions = BTreeMap<String, Vec<String>>;

/// Message entity as stored in the `messages` collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub text: String,
    pub time: DateTime<Utc>,
    pub reactions: Reactions,
    pub channel_id: String,
    /// Addressed user for direct messages
    pub user_id: Option<String>,
    /// Parent message id when this message belongs to a thread
    pub thread_id: Option<String>,
}

impl Message {
    /// Create a new channel message stamped with the current time
    pub fn new(sender_id: String, channel_id: String, text: String) -> Self {
        Self {
            id: String::new(),
            sender_id,
            text,
            time: Utc::now(),
            reactions: Reactions::new(),
            channel_id,
            user_id: None,
            thread_id: None,
        }
    }

    /// Create a direct message addressed to `user_id`
    pub fn new_direct(sender_id: String, user_id: String, text: String) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::new(sender_id, String::new(), text)
        }
    }

    /// Create a reply inside the thread rooted at `thread_id`
    pub fn new_thread_reply(
        sender_id: String,
        channel_id: String,
        thread_id: String,
        text: String,
    ) -> Self {
        Self {
            thread_id: Some(thread_id),
            ..Self::new(sender_id, channel_id, text)
        }
    }

    #[inline]
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }

    #[inline]
    pub fn is_direct(&self) -> bool {
        self.user_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    #[inline]
    pub fn is_thread_reply(&self) -> bool {
        self.thread_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    /// Whether this message belongs to the direct conversation between two users
    pub fn is_between(&self, a: &str, b: &str) -> bool {
        let Some(to) = self.user_id.as_deref() else {
            return false;
        };
        (self.sender_id == a && to == b) || (self.sender_id == b && to == a)
    }

    /// Add or remove `user_id` from the reaction list for `emoji`.
    ///
    /// Returns true if the reaction is present afterwards.
    pub fn toggle_reaction(&mut self, emoji: &str, user_id: &str) -> bool {
        let users = self.reactions.entry(emoji.to_string()).or_default();
        if let Some(pos) = users.iter().position(|u| u == user_id) {
            users.remove(pos);
            if users.is_empty() {
                self.reactions.remove(emoji);
            }
            false
        } else {
            users.push(user_id.to_string());
            true
        }
    }

    pub fn reaction_count(&self, emoji: &str) -> usize {
        self.reactions.get(emoji).map_or(0, Vec::len)
    }
}
