//! Data transfer objects
//!
//! This module provides:
//! - Request DTOs with validation for form inputs
//! - Response DTOs rendered by the presentation layer
//! - Mappers between store documents and domain entities

pub mod mappers;
pub mod requests;
pub mod responses;

pub use mappers::{
    message_clean_fields, message_from_document, status_fields, user_from_document,
    user_to_fields,
};
pub use requests::RegistrationForm;
pub use responses::ContactCard;
