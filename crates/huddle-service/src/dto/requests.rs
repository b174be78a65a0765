//! Request DTOs
//!
//! Form inputs implement `Deserialize` and `Validate`.

use serde::Deserialize;
use validator::Validate;

/// Sign-up form as filled in by the user
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    /// May be blank; a placeholder name is generated then
    #[serde(default)]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 128, message = "Password must be 1-128 characters"))]
    pub password: String,

    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,

    /// Avatar image reference
    #[serde(default)]
    pub image: String,
}

impl RegistrationForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let password = password.into();
        Self {
            name: name.into(),
            email: email.into(),
            confirm_password: password.clone(),
            password,
            image: String::new(),
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }
}
