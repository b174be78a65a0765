//! Message service integration tests
//!
//! Run with: cargo test -p integration-tests --test message_tests

use std::sync::Arc;

use anyhow::Result;
use chrono::{Duration, Utc};
use huddle_core::traits::DocumentStore;
use huddle_core::{DocumentRef, Message};
use huddle_service::Contacts;
use integration_tests::{channel_message, registration, within_timeout, CountingInput, TestApp};

#[tokio::test]
async fn test_created_message_id_round_trips_through_mirror() -> Result<()> {
    let app = TestApp::start()?;
    let id = app
        .messages
        .create_message(&channel_message("u1", "general"))
        .await?;

    let view = within_timeout(app.messages.mirror().wait_for(|v| v.contains(&id))).await??;
    assert_eq!(view.get(&id).map(|m| m.id.as_str()), Some(id.as_str()));

    let doc = app
        .store
        .get(&DocumentRef::new("messages", id.as_str()))
        .await?
        .expect("document written");
    assert_eq!(doc.get_str("id"), Some(id.as_str()));
    Ok(())
}

#[tokio::test]
async fn test_mirror_orders_newest_first() -> Result<()> {
    let app = TestApp::start()?;
    let base = Utc::now();

    let mut ids = Vec::new();
    for minutes in [5, 1, 10, 3] {
        let mut message = channel_message("u1", "general");
        message.time = base - Duration::minutes(minutes);
        ids.push((minutes, app.messages.create_message(&message).await?));
    }

    let view = within_timeout(app.messages.mirror().wait_for(|v| v.len() == 4)).await??;
    ids.sort_by_key(|(minutes, _)| *minutes);
    let expected: Vec<&str> = ids.iter().map(|(_, id)| id.as_str()).collect();
    assert_eq!(view.ids().collect::<Vec<_>>(), expected);

    let times: Vec<_> = app.messages.messages().iter().map(|m| m.time).collect();
    assert!(times.windows(2).all(|w| w[0] >= w[1]));
    Ok(())
}

#[tokio::test]
async fn test_update_writes_clean_projection() -> Result<()> {
    let app = TestApp::start()?;
    let mut message = channel_message("u1", "general");
    message.id = app.messages.create_message(&message).await?;

    message.text = "edited".to_string();
    message.toggle_reaction("👍", "u2");
    app.messages.update_message(&message).await?;

    let doc = app
        .store
        .get(&DocumentRef::new("messages", message.id.as_str()))
        .await?
        .expect("document written");
    assert_eq!(doc.fields.len(), 8);
    assert_eq!(doc.get_str("text"), Some("edited"));
    let reacted = doc.get("reactions").and_then(|r| r.get("👍"));
    assert_eq!(reacted, Some(&serde_json::json!(["u2"])));
    Ok(())
}

#[tokio::test]
async fn test_update_of_deleted_message_fails() -> Result<()> {
    let app = TestApp::start()?;
    let mut message = channel_message("u1", "general");
    message.id = app.messages.create_message(&message).await?;
    app.messages.delete_message(&message.id).await?;

    let err = app.messages.update_message(&message).await.unwrap_err();
    assert!(err.is_not_found());

    // Deleting again is harmless
    app.messages.delete_message(&message.id).await?;
    Ok(())
}

#[tokio::test]
async fn test_deleted_message_leaves_mirror() -> Result<()> {
    let app = TestApp::start()?;
    let keep = app.messages.create_message(&channel_message("u1", "general")).await?;
    let gone = app.messages.create_message(&channel_message("u1", "general")).await?;
    within_timeout(app.messages.mirror().wait_for(|v| v.len() == 2)).await??;

    app.messages.delete_message(&gone).await?;
    let view = within_timeout(app.messages.mirror().wait_for(|v| !v.contains(&gone))).await??;
    assert_eq!(view.ids().collect::<Vec<_>>(), vec![keep.as_str()]);
    Ok(())
}

#[tokio::test]
async fn test_thread_and_direct_views() -> Result<()> {
    let app = TestApp::start()?;
    let root = app.messages.create_message(&channel_message("u1", "general")).await?;
    app.messages
        .create_message(&Message::new_thread_reply(
            "u2".into(),
            "general".into(),
            root.clone(),
            "reply".into(),
        ))
        .await?;
    app.messages
        .create_message(&Message::new_direct("u1".into(), "u2".into(), "hi".into()))
        .await?;
    app.messages
        .create_message(&Message::new_direct("u3".into(), "u1".into(), "other".into()))
        .await?;
    within_timeout(app.messages.mirror().wait_for(|v| v.len() == 4)).await??;

    assert_eq!(app.messages.channel_messages("general").len(), 1);
    assert_eq!(app.messages.thread_messages(&root).len(), 1);
    assert_eq!(app.messages.direct_messages("u2", "u1").len(), 1);
    assert_eq!(app.messages.direct_messages("u1", "u3").len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_focus_coordination() -> Result<()> {
    let app = TestApp::start()?;
    app.messages.focus_message_input();
    app.messages.focus_thread_message_input();

    let main = Arc::new(CountingInput::default());
    let thread = Arc::new(CountingInput::default());
    app.messages.register_message_input(Some(main.clone()));
    app.messages.register_thread_message_input(Some(thread.clone()));

    app.messages.focus_message_input();
    app.messages.focus_thread_message_input();
    app.messages.focus_thread_message_input();
    assert_eq!(main.count(), 1);
    assert_eq!(thread.count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_open_direct_message_from_contacts() -> Result<()> {
    let app = TestApp::start()?;
    let reference = app.users.upload_user_data(&registration("Bob")).await?;
    within_timeout(app.users.wait_for_user(reference.id())).await??;

    let input = Arc::new(CountingInput::default());
    app.messages.register_message_input(Some(input.clone()));
    app.session
        .update(|s| s.current_channel_id = Some("general".to_string()));

    let contacts = Contacts::new(&app.users, &app.messages);
    contacts.open_profile(reference.id());
    contacts.open_direct_message(reference.id());

    let session = app.session.snapshot();
    assert_eq!(session.current_channel_id, None);
    assert_eq!(session.private_message_user_id.as_deref(), Some(reference.id()));
    assert_eq!(input.count(), 1);

    let card = contacts.profile_card().expect("card for roster user");
    assert_eq!(card.name, "Bob");
    assert!(!card.is_active);
    Ok(())
}
