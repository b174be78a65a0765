//! Navigation targets handed to the UI router

use std::fmt;

/// View the router should display
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// The sign-in view
    Login,
    /// The authenticated home view for a user
    Home { user_id: String },
}

impl Route {
    /// Router path for this view
    pub fn path(&self) -> String {
        match self {
            Self::Login => String::new(),
            Self::Home { user_id } => format!("/home/{user_id}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => f.write_str("/"),
            Self::Home { .. } => f.write_str(&self.path()),
        }
    }
}
