//! Response DTOs rendered by the presentation layer

use huddle_core::User;
use serde::Serialize;

/// Contact window contents for one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactCard {
    pub id: String,
    pub name: String,
    pub email: String,
    pub picture: String,
    pub is_active: bool,
}

impl From<&User> for ContactCard {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            picture: user.user_image.clone(),
            is_active: user.is_online(),
        }
    }
}

impl ContactCard {
    pub fn from_user(user: &User) -> Self {
        Self::from(user)
    }
}
