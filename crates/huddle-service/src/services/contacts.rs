//! Contacts - profile cards and direct-message entry points

use tracing::{info, instrument};

use crate::dto::ContactCard;

use super::message::MessageService;
use super::user::UserDirectory;

/// Contact window operations
pub struct Contacts<'a> {
    users: &'a UserDirectory,
    messages: &'a MessageService,
}

impl<'a> Contacts<'a> {
    pub fn new(users: &'a UserDirectory, messages: &'a MessageService) -> Self {
        Self { users, messages }
    }

    /// Show `user_id` in the contact window
    pub fn open_profile(&self, user_id: &str) {
        self.users
            .context()
            .session()
            .update(|s| s.profile_user_id = Some(user_id.to_string()));
    }

    /// Card for the user shown in the contact window, if they are in the roster
    pub fn profile_card(&self) -> Option<ContactCard> {
        let profile_id = self.users.context().session().snapshot().profile_user_id?;
        self.users
            .get_user_by_id(&profile_id)
            .ok()
            .map(|user| ContactCard::from_user(&user))
    }

    /// Switch the chat pane to a direct conversation with `user_id`
    #[instrument(skip(self))]
    pub fn open_direct_message(&self, user_id: &str) {
        self.users.context().session().update(|s| {
            s.current_channel_id = None;
            s.private_message_user_id = Some(user_id.to_string());
        });
        self.messages.focus_message_input();
        info!("Direct conversation opened");
    }
}
