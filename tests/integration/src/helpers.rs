//! Test helpers for integration tests
//!
//! Provides recording collaborators and a fully wired service stack.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use huddle_common::AppConfig;
use huddle_core::traits::{ChannelDirectory, FocusTarget, Navigator};
use huddle_core::{DomainError, Route};
use huddle_service::{MessageService, ServiceContextBuilder, SessionStore, UserDirectory};
use huddle_store::MemoryDocumentStore;
use parking_lot::Mutex;

/// How long a scenario waits for a mirror to catch up
pub const SYNC_TIMEOUT: Duration = Duration::from_secs(2);

/// Navigator that records every route
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().clone()
    }

    pub fn last(&self) -> Option<Route> {
        self.routes.lock().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().push(route);
    }
}

/// Channel directory that records calls and can be told to fail
#[derive(Debug, Default)]
pub struct RecordingChannels {
    calls: Mutex<Vec<String>>,
    failing: AtomicBool,
}

impl RecordingChannels {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl ChannelDirectory for RecordingChannels {
    async fn update_standard_channel(&self, user_id: &str) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::CollaboratorError(
                "channel directory unavailable".to_string(),
            ));
        }
        self.calls.lock().push(user_id.to_string());
        Ok(())
    }
}

/// Focus target counting how often it was focused
#[derive(Debug, Default)]
pub struct CountingInput {
    count: AtomicUsize,
}

impl CountingInput {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl FocusTarget for CountingInput {
    fn focus(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

/// Services wired to a fresh in-memory store
pub struct TestApp {
    pub store: MemoryDocumentStore,
    pub navigator: Arc<RecordingNavigator>,
    pub channels: Arc<RecordingChannels>,
    pub session: SessionStore,
    pub users: UserDirectory,
    pub messages: MessageService,
}

impl TestApp {
    /// Start a stack with no login redirect delay
    pub fn start() -> Result<Self> {
        Self::start_with_config(test_config())
    }

    pub fn start_with_config(config: AppConfig) -> Result<Self> {
        let store = MemoryDocumentStore::new();
        let navigator = Arc::new(RecordingNavigator::default());
        let channels = Arc::new(RecordingChannels::default());
        let session = SessionStore::new();

        let ctx = ServiceContextBuilder::new()
            .store(Arc::new(store.clone()))
            .channels(channels.clone())
            .navigator(navigator.clone())
            .session(session.clone())
            .config(config)
            .build()?;

        Ok(Self {
            users: UserDirectory::new(ctx.clone())?,
            messages: MessageService::new(ctx)?,
            store,
            navigator,
            channels,
            session,
        })
    }
}

/// Default configuration with the login redirect delay disabled
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.ui.login_redirect_delay_ms = 0;
    config
}

/// Await `future`, failing the test if it takes longer than [`SYNC_TIMEOUT`]
pub async fn within_timeout<F, T>(future: F) -> Result<T>
where
    F: Future<Output = T>,
{
    tokio::time::timeout(SYNC_TIMEOUT, future)
        .await
        .context("timed out waiting for the mirror")
}
