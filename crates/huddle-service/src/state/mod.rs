//! Reactive state shared with the presentation layer

pub mod mirror;
pub mod session;

pub use mirror::{Mirror, MirrorView};
pub use session::{Session, SessionStore, ThreadContext};
