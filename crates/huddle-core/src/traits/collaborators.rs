//! Presentation-side collaborators the services call into

use async_trait::async_trait;

use crate::error::DomainError;
use crate::value_objects::Route;

/// Channel service owned by the channel feature
#[async_trait]
pub trait ChannelDirectory: Send + Sync {
    /// Make sure the user is a member of the default channel
    async fn update_standard_channel(&self, user_id: &str) -> Result<(), DomainError>;
}

/// UI router
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// A focusable UI element registered by a component
pub trait FocusTarget: Send + Sync {
    fn focus(&self);
}
