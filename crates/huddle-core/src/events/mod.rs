//! Realtime change events delivered by store listeners

mod snapshot;

pub use snapshot::{ChangeKind, DocumentChange, QuerySnapshot};
