//! User directory integration tests
//!
//! Run with: cargo test -p integration-tests --test user_directory_tests

use anyhow::Result;
use huddle_core::traits::DocumentStore;
use huddle_core::{DocumentRef, PresenceStatus, Route, User};
use integration_tests::{federated_user, registration, within_timeout, TestApp, TEST_PASSWORD};

// ============================================================================
// Account Creation
// ============================================================================

#[tokio::test]
async fn test_created_user_carries_allocated_id() -> Result<()> {
    let app = TestApp::start()?;
    let reference = app
        .users
        .create_user(&User::new("Grace Hopper".into(), "grace@example.com".into()))
        .await?;

    let doc = app.store.get(&reference).await?.expect("document written");
    assert_eq!(doc.get_str("id"), Some(reference.id()));

    let user = within_timeout(app.users.wait_for_user(reference.id())).await??;
    assert_eq!(user.id, reference.id());
    assert_eq!(user.status, Some(PresenceStatus::Offline));
    Ok(())
}

#[tokio::test]
async fn test_create_user_with_explicit_id_overwrites() -> Result<()> {
    let app = TestApp::start()?;
    let first = app
        .users
        .create_user(&User::with_id("ext-1".into(), "One".into(), "one@example.com".into()))
        .await?;
    let second = app
        .users
        .create_user(&User::with_id("ext-1".into(), "Two".into(), "two@example.com".into()))
        .await?;

    assert_eq!(first, second);
    assert_eq!(app.store.document_count("user"), 1);
    let doc = app.store.get(&second).await?.expect("document written");
    assert_eq!(doc.get_str("name"), Some("Two"));
    Ok(())
}

#[tokio::test]
async fn test_registration_stores_hash_not_password() -> Result<()> {
    let app = TestApp::start()?;
    let reference = app.users.upload_user_data(&registration("Ada")).await?;

    let doc = app.store.get(&reference).await?.expect("document written");
    let hash = doc.get_str("passwordHash").unwrap_or_default();
    assert!(hash.starts_with("$argon2"));
    assert!(!doc.fields.values().any(|v| v == TEST_PASSWORD));
    assert!(doc.get("password").is_none());
    Ok(())
}

// ============================================================================
// Federated Sign-in
// ============================================================================

#[tokio::test]
async fn test_federated_sign_in_preserves_stored_name() -> Result<()> {
    let app = TestApp::start()?;
    let first = app
        .users
        .save_federated_user(&federated_user("g-42", "Original Name", "old@example.com"))
        .await?;
    let second = app
        .users
        .save_federated_user(&federated_user("g-42", "Provider Name", "new@example.com"))
        .await?;

    assert_eq!(first, second);
    assert_eq!(app.store.document_count("user"), 1);

    let doc = app.store.get(&second).await?.expect("document written");
    assert_eq!(doc.get_str("name"), Some("Original Name"));
    assert_eq!(doc.get_str("email"), Some("new@example.com"));
    Ok(())
}

#[tokio::test]
async fn test_federated_sign_in_fills_empty_stored_name() -> Result<()> {
    let app = TestApp::start()?;
    app.users
        .save_federated_user(&federated_user("g-7", "", "g7@example.com"))
        .await?;
    let reference = app
        .users
        .save_federated_user(&federated_user("g-7", "Filled In", "g7@example.com"))
        .await?;

    let doc = app.store.get(&reference).await?.expect("document written");
    assert_eq!(doc.get_str("name"), Some("Filled In"));
    Ok(())
}

#[tokio::test]
async fn test_federated_user_requires_id() -> Result<()> {
    let app = TestApp::start()?;
    let err = app
        .users
        .save_federated_user(&User::new("No Id".into(), "x@example.com".into()))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "MISSING_IDENTIFIER");
    Ok(())
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_outcomes() -> Result<()> {
    let app = TestApp::start()?;
    assert!(!app.users.login_user("a@example.com", "secret").await?);

    let form = registration("Ada");
    let reference = app.users.upload_user_data(&form).await?;

    assert!(!app.users.login_user(&form.email, "wrong").await?);
    assert!(!app.users.login_user("other@example.com", TEST_PASSWORD).await?);
    assert!(app.navigator.routes().is_empty());

    assert!(app.users.login_user(&form.email, TEST_PASSWORD).await?);
    assert_eq!(
        app.navigator.last(),
        Some(Route::Home {
            user_id: reference.id().to_string()
        })
    );
    assert_eq!(app.channels.calls(), vec![reference.id().to_string()]);
    assert_eq!(
        app.session.snapshot().logged_user_id.as_deref(),
        Some(reference.id())
    );
    Ok(())
}

#[tokio::test]
async fn test_login_is_case_sensitive_on_password() -> Result<()> {
    let app = TestApp::start()?;
    let form = registration("Ada");
    app.users.upload_user_data(&form).await?;

    assert!(!app.users.login_user(&form.email, &TEST_PASSWORD.to_lowercase()).await?);
    Ok(())
}

#[tokio::test]
async fn test_login_skips_malformed_hashes() -> Result<()> {
    let app = TestApp::start()?;
    let mut legacy = User::with_id("legacy".into(), "Legacy".into(), "legacy@example.com".into());
    legacy.password_hash = "plaintext".into();
    app.users.create_user(&legacy).await?;

    assert!(!app.users.login_user("legacy@example.com", "plaintext").await?);
    Ok(())
}

#[tokio::test]
async fn test_login_redirect_waits_for_configured_delay() -> Result<()> {
    let mut config = integration_tests::test_config();
    config.ui.login_redirect_delay_ms = 50;
    let app = TestApp::start_with_config(config)?;
    let form = registration("Ada");
    app.users.upload_user_data(&form).await?;

    let started = std::time::Instant::now();
    assert!(app.users.login_user(&form.email, TEST_PASSWORD).await?);
    assert!(started.elapsed() >= std::time::Duration::from_millis(50));
    Ok(())
}

// ============================================================================
// Presence and Profile Updates
// ============================================================================

#[tokio::test]
async fn test_status_update_changes_only_status() -> Result<()> {
    let app = TestApp::start()?;
    let reference = app.users.upload_user_data(&registration("Ada")).await?;
    let before = within_timeout(app.users.wait_for_user(reference.id())).await??;

    app.users
        .update_user_status(reference.id(), PresenceStatus::Online)
        .await?;

    let id = reference.id();
    let view = within_timeout(
        app.users
            .roster()
            .wait_for(|v| v.get(id).is_some_and(User::is_online)),
    )
    .await??;
    let after = view.get(id).cloned().expect("user in roster");

    assert_eq!(after.name, before.name);
    assert_eq!(after.email, before.email);
    assert_eq!(after.password_hash, before.password_hash);
    assert_eq!(after.last_seen.timestamp_millis(), before.last_seen.timestamp_millis());
    assert_eq!(after.recent_emojis, before.recent_emojis);
    Ok(())
}

#[tokio::test]
async fn test_profile_updates() -> Result<()> {
    let app = TestApp::start()?;
    let reference = app.users.upload_user_data(&registration("Ada")).await?;
    let id = reference.id();

    app.users
        .update_recent_emojis(id, &["🎉".to_string(), "👍".to_string()])
        .await?;
    app.users.update_user_info(id, "Ada L.", "ada.png").await?;

    let view = within_timeout(
        app.users
            .roster()
            .wait_for(|v| v.get(id).is_some_and(|u| u.name == "Ada L.")),
    )
    .await??;
    let user = view.get(id).expect("user in roster");
    assert_eq!(user.user_image, "ada.png");
    assert_eq!(user.recent_emojis, vec!["🎉", "👍"]);
    Ok(())
}

#[tokio::test]
async fn test_logout_goes_offline_and_to_login() -> Result<()> {
    let app = TestApp::start()?;
    let form = registration("Ada");
    let reference = app.users.upload_user_data(&form).await?;
    assert!(app.users.login_user(&form.email, TEST_PASSWORD).await?);

    app.users.logout_user(reference.id()).await?;

    assert_eq!(app.navigator.last(), Some(Route::Login));
    assert!(!app.session.snapshot().is_logged_in());
    let doc = app
        .store
        .get(&DocumentRef::new("user", reference.id()))
        .await?
        .expect("document written");
    assert_eq!(doc.get_str("status"), Some("offline"));
    Ok(())
}

// ============================================================================
// Lookups
// ============================================================================

#[tokio::test]
async fn test_is_valid_user_token_match() -> Result<()> {
    let app = TestApp::start()?;
    let reference = app
        .users
        .create_user(&User::new("John Doe".into(), "john@example.com".into()))
        .await?;
    within_timeout(app.users.wait_for_user(reference.id())).await??;

    assert!(app.users.is_valid_user("jo do"));
    assert!(app.users.is_valid_user("  JOHN   doe "));
    assert!(!app.users.is_valid_user("jo x"));
    assert!(!app.users.is_valid_user("Jon"));
    Ok(())
}

#[tokio::test]
async fn test_get_user_by_id() -> Result<()> {
    let app = TestApp::start()?;
    let reference = app.users.upload_user_data(&registration("Ada")).await?;
    within_timeout(app.users.wait_for_user(reference.id())).await??;

    assert_eq!(app.users.get_user_by_id(reference.id())?.name, "Ada");
    assert!(app.users.get_user_by_id("missing").unwrap_err().is_not_found());
    Ok(())
}
