//! Credential primitives: password hashing and signed session tokens.

pub mod password;
pub mod token;

pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenError, TokenIssuer};
