//! Scripted walkthrough: register, log in, chat, react, log out

use std::sync::Arc;

use anyhow::{bail, Context};
use huddle_common::AppConfig;
use huddle_core::Message;
use huddle_service::{
    Contacts, MessageService, RegistrationForm, ServiceContextBuilder, SessionStore,
    UserDirectory,
};
use huddle_store::MemoryDocumentStore;
use tracing::info;

use crate::collaborators::{ConsoleInput, ConsoleNavigator, MemoryChannels};

/// Run the walkthrough against a fresh in-memory store
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let store = Arc::new(MemoryDocumentStore::new());
    let channels = Arc::new(MemoryChannels::new("general"));
    let navigator = Arc::new(ConsoleNavigator::default());
    let session = SessionStore::new();

    let ctx = ServiceContextBuilder::new()
        .store(store.clone())
        .channels(channels.clone())
        .navigator(navigator.clone())
        .session(session.clone())
        .config(config)
        .build()?;

    let users = UserDirectory::new(ctx.clone())?;
    let messages = MessageService::new(ctx)?;
    messages.register_message_input(Some(Arc::new(ConsoleInput::new("message"))));
    messages.register_thread_message_input(Some(Arc::new(ConsoleInput::new("thread"))));

    let ada = users
        .upload_user_data(&RegistrationForm::new("Ada Lovelace", "ada@example.com", "analytical"))
        .await?;
    let bob = users
        .upload_user_data(&RegistrationForm::new("", "bob@example.com", "difference"))
        .await?;
    let bob_name = users.wait_for_user(bob.id()).await?.name;
    info!(ada = %ada.id(), bob = %bob.id(), %bob_name, "Registered users");

    if !users.login_user("ada@example.com", "analytical").await? {
        bail!("login rejected for a freshly registered user");
    }
    info!(
        route = ?navigator.current(),
        members = ?channels.members(channels.standard_channel()),
        "Logged in"
    );

    let general = channels.standard_channel().to_string();
    session.update(|s| s.current_channel_id = Some(general.clone()));

    let root_id = messages
        .create_message(&Message::new(
            ada.id().to_string(),
            general.clone(),
            "Hello, everyone".to_string(),
        ))
        .await?;
    messages
        .mirror()
        .wait_for(|v| v.contains(&root_id))
        .await?;
    messages.toggle_reaction(&root_id, "👋", bob.id()).await?;

    session.open_thread(root_id.as_str(), general.as_str());
    messages.focus_thread_message_input();
    messages
        .create_message(&Message::new_thread_reply(
            bob.id().to_string(),
            general.clone(),
            root_id.clone(),
            "Hi Ada".to_string(),
        ))
        .await?;

    let contacts = Contacts::new(&users, &messages);
    contacts.open_profile(bob.id());
    contacts.open_direct_message(bob.id());
    messages
        .create_message(&Message::new_direct(
            ada.id().to_string(),
            bob.id().to_string(),
            "Welcome aboard".to_string(),
        ))
        .await?;

    messages.mirror().wait_for(|v| v.len() == 3).await?;
    let card = contacts
        .profile_card()
        .context("profile card for a roster user")?;
    info!(card = %serde_json::to_string(&card)?, "Contact card");
    info!(
        channel = messages.channel_messages(&general).len(),
        thread = messages.thread_messages(&root_id).len(),
        direct = messages.direct_messages(ada.id(), bob.id()).len(),
        valid = users.is_valid_user("ada love"),
        "Message mirror"
    );

    users.logout_user(ada.id()).await?;
    users.dispose();
    messages.dispose();
    info!(listeners = store.listener_count(), "Walkthrough finished");

    Ok(())
}
