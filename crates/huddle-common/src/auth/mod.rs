//! Credential utilities

mod password;

pub use password::{generate_user_code, hash_password, verify_password, PasswordService};
