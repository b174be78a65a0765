//! Traits (ports) implemented by infrastructure and the presentation layer

mod collaborators;
mod store;

pub use collaborators::{ChannelDirectory, FocusTarget, Navigator};
pub use store::{DocumentStore, Listener, ListenerRegistration, StoreResult};
