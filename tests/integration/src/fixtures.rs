//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use std::sync::atomic::{AtomicU64, Ordering};

use huddle_core::{Message, PresenceStatus, User};
use huddle_service::RegistrationForm;

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

pub const TEST_PASSWORD: &str = "TestPass123!";

/// Registration form with a unique email
pub fn registration(name: &str) -> RegistrationForm {
    let suffix = unique_suffix();
    RegistrationForm::new(name, format!("test{suffix}@example.com"), TEST_PASSWORD)
}

/// Profile as delivered by a federated identity provider
pub fn federated_user(id: &str, name: &str, email: &str) -> User {
    let mut user = User::with_id(id.to_string(), name.to_string(), email.to_string());
    user.user_image = format!("https://img.example.com/{id}.png");
    user.status = Some(PresenceStatus::Online);
    user
}

/// Channel message with unique text
pub fn channel_message(sender_id: &str, channel_id: &str) -> Message {
    Message::new(
        sender_id.to_string(),
        channel_id.to_string(),
        format!("message {}", unique_suffix()),
    )
}
