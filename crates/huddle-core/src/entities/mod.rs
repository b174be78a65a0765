//! Domain entities - core business objects

mod message;
mod user;

pub use message::{Message, Reactions};
pub use user::User;
