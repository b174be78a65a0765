//! Data-access services
//!
//! Each service owns one realtime listener, mirrors its collection locally,
//! and mediates every write to the document store.

pub mod contacts;
pub mod context;
pub mod error;
pub mod message;
pub mod user;

pub use contacts::Contacts;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use message::MessageService;
pub use user::UserDirectory;
