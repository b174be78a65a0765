//! Value objects - immutable types that represent domain concepts

mod document;
mod presence;
mod query;
mod route;

pub use document::{Document, DocumentRef, Fields};
pub use presence::{PresenceStatus, PresenceStatusParseError};
pub use query::{compare_values, Direction, FieldFilter, OrderBy, Query};
pub use route::Route;
