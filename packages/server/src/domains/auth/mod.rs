//! Auth domain - session tokens and credential primitives.
//!
//! Responsibilities:
//! - JWT session token management (1-hour expiry)
//! - Keyed email hashing (the only stored form of an email address)
//! - Reversible opaque codes for email verification and password reset
//! - Password hashing

pub mod codes;
pub mod jwt;
pub mod password;

pub use codes::{hash_email, CodeCipher};
pub use jwt::{Claims, JwtService};
pub use password::{hash_password, verify_password};
