//! Subscription lifecycle and error policy tests
//!
//! Run with: cargo test -p integration-tests --test lifecycle_tests

use anyhow::Result;
use huddle_core::{PresenceStatus, User};
use integration_tests::{channel_message, registration, within_timeout, TestApp, TEST_PASSWORD};

// ============================================================================
// Subscriptions
// ============================================================================

#[tokio::test]
async fn test_each_service_holds_one_listener() -> Result<()> {
    let app = TestApp::start()?;
    assert_eq!(app.store.listener_count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_dispose_releases_listeners() -> Result<()> {
    let app = TestApp::start()?;
    app.users.dispose();
    assert_eq!(app.store.listener_count(), 1);
    app.messages.dispose();
    assert_eq!(app.store.listener_count(), 0);

    // A disposed mirror no longer follows the store
    app.messages
        .create_message(&channel_message("u1", "general"))
        .await?;
    assert!(app.messages.mirror().wait_for(|v| !v.is_empty()).await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_drop_releases_listeners() -> Result<()> {
    let app = TestApp::start()?;
    let store = app.store.clone();
    drop(app);
    assert_eq!(store.listener_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_roster_picks_up_existing_users() -> Result<()> {
    let first = TestApp::start()?;
    let reference = first.users.upload_user_data(&registration("Ada")).await?;

    // A second directory over the same store sees the user in its first snapshot
    let ctx = first.users.context().clone();
    let second = huddle_service::UserDirectory::new(ctx)?;
    let view = within_timeout(second.roster().synced()).await??;
    assert!(view.contains(reference.id()));
    Ok(())
}

// ============================================================================
// Error Policy
// ============================================================================

#[tokio::test]
async fn test_store_failures_surface_as_errors() -> Result<()> {
    let app = TestApp::start()?;
    let reference = app.users.upload_user_data(&registration("Ada")).await?;
    app.store.set_available(false);

    let err = app
        .users
        .update_user_status(reference.id(), PresenceStatus::Online)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "STORE_ERROR");

    assert!(app.users.update_recent_emojis(reference.id(), &[]).await.is_err());
    assert!(app.users.update_user_info(reference.id(), "x", "y").await.is_err());
    assert!(app
        .users
        .create_user(&User::new("B".into(), "b@example.com".into()))
        .await
        .is_err());
    assert!(app.users.login_user("a@example.com", TEST_PASSWORD).await.is_err());
    assert!(app
        .messages
        .create_message(&channel_message("u1", "general"))
        .await
        .is_err());
    assert!(app.messages.delete_message("m1").await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_channel_failure_aborts_login_before_navigation() -> Result<()> {
    let app = TestApp::start()?;
    let form = registration("Ada");
    app.users.upload_user_data(&form).await?;
    app.channels.set_failing(true);

    let err = app
        .users
        .login_user(&form.email, TEST_PASSWORD)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "COLLABORATOR_ERROR");
    assert!(app.navigator.routes().is_empty());
    assert!(!app.session.snapshot().is_logged_in());
    Ok(())
}
