//! # huddle-demo
//!
//! Console stand-ins for the UI collaborators and a scripted session that
//! exercises the services against the in-memory store.

pub mod collaborators;
pub mod scenario;

pub use collaborators::{ConsoleInput, ConsoleNavigator, MemoryChannels};
pub use scenario::run;
