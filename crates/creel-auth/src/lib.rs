//! Creel Authentication and Authorization
//!
//! This crate provides JWT-based authentication and ownership-based
//! access control for Creel. Access tokens are RS256-signed so any
//! resource server holding the public key can verify them; refresh
//! tokens are HS256-signed and backed by a revocable database record.

pub mod error;
pub mod identity;
pub mod jwt;
pub mod password;

pub use error::AuthError;
pub use identity::{Identity, authorize_owner, extract_bearer_token};
pub use jwt::{AccessClaims, RefreshClaims, TokenManager};
pub use password::{hash_password, verify_password};
