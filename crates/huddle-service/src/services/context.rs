//! Service context - dependency container for services
//!
//! Holds the document store, UI collaborators, session state, and
//! configuration needed by services.

use std::sync::Arc;

use huddle_common::{AppConfig, PasswordService};
use huddle_core::traits::{ChannelDirectory, DocumentStore, Navigator};

use super::error::{ServiceError, ServiceResult};
use crate::state::SessionStore;

/// Service context containing all dependencies
///
/// Cheap to clone; every service keeps its own copy.
#[derive(Clone)]
pub struct ServiceContext {
    store: Arc<dyn DocumentStore>,
    channels: Arc<dyn ChannelDirectory>,
    navigator: Arc<dyn Navigator>,
    session: SessionStore,
    password_service: PasswordService,
    config: Arc<AppConfig>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        store: Arc<dyn DocumentStore>,
        channels: Arc<dyn ChannelDirectory>,
        navigator: Arc<dyn Navigator>,
        session: SessionStore,
        config: AppConfig,
    ) -> Self {
        Self {
            store,
            channels,
            navigator,
            session,
            password_service: PasswordService::new(),
            config: Arc::new(config),
        }
    }

    /// Get the document store
    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    /// Get the channel directory
    pub fn channels(&self) -> &dyn ChannelDirectory {
        self.channels.as_ref()
    }

    /// Get the UI router
    pub fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }

    /// Get the shared session state
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Get the password service
    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Name of the user collection
    pub fn user_collection(&self) -> &str {
        &self.config.store.user_collection
    }

    /// Name of the message collection
    pub fn message_collection(&self) -> &str {
        &self.config.store.message_collection
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("store", &"DocumentStore")
            .field("collaborators", &"...")
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    store: Option<Arc<dyn DocumentStore>>,
    channels: Option<Arc<dyn ChannelDirectory>>,
    navigator: Option<Arc<dyn Navigator>>,
    session: Option<SessionStore>,
    config: Option<AppConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn channels(mut self, channels: Arc<dyn ChannelDirectory>) -> Self {
        self.channels = Some(channels);
        self
    }

    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Share an existing session; a fresh one is created otherwise
    pub fn session(mut self, session: SessionStore) -> Self {
        self.session = Some(session);
        self
    }

    /// Override the configuration; defaults apply otherwise
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.store
                .ok_or_else(|| ServiceError::validation("store is required"))?,
            self.channels
                .ok_or_else(|| ServiceError::validation("channels is required"))?,
            self.navigator
                .ok_or_else(|| ServiceError::validation("navigator is required"))?,
            self.session.unwrap_or_default(),
            self.config.unwrap_or_default(),
        ))
    }
}
