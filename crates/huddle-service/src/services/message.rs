//! Message service
//!
//! Handles message creation, editing, deletion, the live message list,
//! and input-focus coordination with the UI.

use std::sync::Arc;

use huddle_core::traits::FocusTarget;
use huddle_core::{Direction, DocumentRef, DomainError, Message, Query};
use parking_lot::RwLock;
use serde_json::json;
use tracing::{debug, info, instrument};

use crate::dto::{message_clean_fields, message_from_document};
use crate::state::Mirror;

use super::context::ServiceContext;
use super::error::{LogFailure, ServiceError, ServiceResult};

type FocusSlot = RwLock<Option<Arc<dyn FocusTarget>>>;

/// Message service
///
/// Mirrors the message collection newest first. The subscription is released
/// by [`MessageService::dispose`] or when the service is dropped.
pub struct MessageService {
    ctx: ServiceContext,
    messages: Mirror<Message>,
    message_input: FocusSlot,
    thread_message_input: FocusSlot,
}

impl MessageService {
    /// Create the service and subscribe to messages ordered by time, newest first
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(ctx: ServiceContext) -> ServiceResult<Self> {
        let query =
            Query::collection(ctx.message_collection()).order_by("time", Direction::Descending);
        let listener = ctx
            .store()
            .listen(query)
            .log_failure("Message subscription")?;
        let messages = Mirror::spawn("messages", listener, message_from_document);
        info!(collection = ctx.message_collection(), "Messages subscribed");

        Ok(Self {
            ctx,
            messages,
            message_input: RwLock::new(None),
            thread_message_input: RwLock::new(None),
        })
    }

    pub fn context(&self) -> &ServiceContext {
        &self.ctx
    }

    fn message_ref(&self, id: &str) -> DocumentRef {
        DocumentRef::new(self.ctx.message_collection(), id)
    }

    // === Writes ===

    /// Persist a new message and return its id.
    ///
    /// The id is allocated up front and written with the document.
    #[instrument(skip(self, message), fields(channel_id = %message.channel_id))]
    pub async fn create_message(&self, message: &Message) -> ServiceResult<String> {
        let reference = self
            .ctx
            .store()
            .new_document_ref(self.ctx.message_collection());

        let mut fields = message_clean_fields(message);
        fields.insert("id".into(), json!(reference.id()));

        self.ctx
            .store()
            .set(&reference, fields)
            .await
            .log_failure("Create message")?;

        info!(message_id = %reference.id(), "Message created");
        Ok(reference.id().to_string())
    }

    /// Overwrite the persisted fields of an existing message
    #[instrument(skip(self, message), fields(message_id = %message.id))]
    pub async fn update_message(&self, message: &Message) -> ServiceResult<()> {
        if !message.has_id() {
            return Err(DomainError::MissingIdentifier("message")).log_failure("Update message");
        }

        self.ctx
            .store()
            .update(&self.message_ref(&message.id), message_clean_fields(message))
            .await
            .log_failure("Update message")?;

        info!("Message updated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_message(&self, message_id: &str) -> ServiceResult<()> {
        if message_id.is_empty() {
            return Err(DomainError::MissingIdentifier("message")).log_failure("Delete message");
        }

        self.ctx
            .store()
            .delete(&self.message_ref(message_id))
            .await
            .log_failure("Delete message")?;

        info!("Message deleted");
        Ok(())
    }

    /// Toggle `user_id`'s `emoji` reaction on a mirrored message.
    ///
    /// Returns true if the reaction is present afterwards.
    #[instrument(skip(self))]
    pub async fn toggle_reaction(
        &self,
        message_id: &str,
        emoji: &str,
        user_id: &str,
    ) -> ServiceResult<bool> {
        let mut message = self
            .messages
            .current()
            .get(message_id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("Message", message_id))
            .log_failure("Toggle reaction")?;

        let present = message.toggle_reaction(emoji, user_id);
        self.update_message(&message).await?;
        Ok(present)
    }

    // === Input focus ===

    /// Register or clear the main message input
    pub fn register_message_input(&self, target: Option<Arc<dyn FocusTarget>>) {
        *self.message_input.write() = target;
    }

    /// Register or clear the thread message input
    pub fn register_thread_message_input(&self, target: Option<Arc<dyn FocusTarget>>) {
        *self.thread_message_input.write() = target;
    }

    /// Focus the main message input; no-op if none is registered
    pub fn focus_message_input(&self) {
        focus(&self.message_input, "message");
    }

    /// Focus the thread message input; no-op if none is registered
    pub fn focus_thread_message_input(&self) {
        focus(&self.thread_message_input, "thread message");
    }

    // === Mirror queries ===

    /// Live message mirror, newest first
    pub fn mirror(&self) -> &Mirror<Message> {
        &self.messages
    }

    pub fn messages(&self) -> Vec<Message> {
        self.messages.current().to_vec()
    }

    /// Top-level messages of a channel, newest first
    pub fn channel_messages(&self, channel_id: &str) -> Vec<Message> {
        self.filtered(|m| m.channel_id == channel_id && !m.is_thread_reply() && !m.is_direct())
    }

    /// Replies in the thread rooted at `thread_id`, newest first
    pub fn thread_messages(&self, thread_id: &str) -> Vec<Message> {
        self.filtered(|m| m.thread_id.as_deref() == Some(thread_id))
    }

    /// Direct conversation between two users, newest first
    pub fn direct_messages(&self, a: &str, b: &str) -> Vec<Message> {
        self.filtered(|m| m.is_between(a, b))
    }

    fn filtered<F>(&self, keep: F) -> Vec<Message>
    where
        F: Fn(&Message) -> bool,
    {
        self.messages
            .current()
            .iter()
            .filter(|m| keep(m))
            .cloned()
            .collect()
    }

    /// Release the message subscription
    pub fn dispose(&self) {
        self.messages.dispose();
        info!("Message subscription released");
    }
}

fn focus(slot: &FocusSlot, input: &'static str) {
    let target = slot.read().clone();
    match target {
        Some(target) => target.focus(),
        None => debug!(input, "No input registered, focus skipped"),
    }
}

impl std::fmt::Debug for MessageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageService")
            .field("messages", &self.messages)
            .field("message_input", &self.message_input.read().is_some())
            .field("thread_message_input", &self.thread_message_input.read().is_some())
            .finish_non_exhaustive()
    }
}
