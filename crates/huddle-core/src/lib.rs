//! # huddle-core
//!
//! Domain layer containing entities, document value objects, query snapshots,
//! and the traits implemented by the document store and UI collaborators.
//! This crate has no dependency on a concrete store or presentation layer.

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Message, Reactions, User};
pub use error::DomainError;
pub use events::{ChangeKind, DocumentChange, QuerySnapshot};
pub use traits::{
    ChannelDirectory, DocumentStore, FocusTarget, Listener, ListenerRegistration, Navigator,
    StoreResult,
};
pub use value_objects::{
    Direction, Document, DocumentRef, FieldFilter, Fields, OrderBy, PresenceStatus,
    PresenceStatusParseError, Query, Route,
};
