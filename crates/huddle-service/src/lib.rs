//! # huddle-service
//!
//! Application layer: the user directory and message services, the realtime
//! mirrors they maintain, session state shared with the UI, and the mapping
//! between store documents and domain entities.

pub mod dto;
pub mod services;
pub mod state;

pub use dto::{ContactCard, RegistrationForm};
pub use services::{
    Contacts, MessageService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    UserDirectory,
};
pub use state::{Mirror, MirrorView, Session, SessionStore, ThreadContext};
