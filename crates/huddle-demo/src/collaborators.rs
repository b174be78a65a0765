//! Console implementations of the presentation-side collaborators

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use huddle_core::traits::{ChannelDirectory, FocusTarget, Navigator};
use huddle_core::{DomainError, Route};
use parking_lot::{Mutex, RwLock};
use tracing::info;

/// Router that logs every navigation and remembers the last route
#[derive(Debug, Default)]
pub struct ConsoleNavigator {
    current: RwLock<Option<Route>>,
}

impl ConsoleNavigator {
    pub fn current(&self) -> Option<Route> {
        self.current.read().clone()
    }
}

impl Navigator for ConsoleNavigator {
    fn navigate(&self, route: Route) {
        info!(path = %route, "Navigate");
        *self.current.write() = Some(route);
    }
}

/// Channel memberships kept in memory
#[derive(Debug)]
pub struct MemoryChannels {
    standard_channel: String,
    members: Mutex<HashMap<String, BTreeSet<String>>>,
}

impl MemoryChannels {
    pub fn new(standard_channel: impl Into<String>) -> Self {
        Self {
            standard_channel: standard_channel.into(),
            members: Mutex::new(HashMap::new()),
        }
    }

    pub fn standard_channel(&self) -> &str {
        &self.standard_channel
    }

    pub fn members(&self, channel_id: &str) -> Vec<String> {
        self.members
            .lock()
            .get(channel_id)
            .map(|m| m.iter().cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChannelDirectory for MemoryChannels {
    async fn update_standard_channel(&self, user_id: &str) -> Result<(), DomainError> {
        let added = self
            .members
            .lock()
            .entry(self.standard_channel.clone())
            .or_default()
            .insert(user_id.to_string());
        if added {
            info!(user_id, channel = %self.standard_channel, "Joined standard channel");
        }
        Ok(())
    }
}

/// Focusable input that logs when it receives focus
#[derive(Debug)]
pub struct ConsoleInput {
    name: &'static str,
}

impl ConsoleInput {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl FocusTarget for ConsoleInput {
    fn focus(&self) {
        info!(input = self.name, "Input focused");
    }
}
