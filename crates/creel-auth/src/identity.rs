//! Caller identity and the ownership gate
//!
//! The verified identity is an immutable value extracted from access-token
//! claims and threaded through the request explicitly; nothing here
//! mutates shared request state.

use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::jwt::{AccessClaims, TokenManager};

/// Verified caller identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl Identity {
    /// Create from verified access-token claims
    pub fn from_claims(claims: &AccessClaims) -> Self {
        Self {
            id: claims.sub.clone(),
            username: claims.preferred_username.clone(),
            first_name: claims.given_name.clone(),
            last_name: claims.family_name.clone(),
        }
    }

    /// Verify an `Authorization` header value and extract the identity
    ///
    /// The optional-authentication mode at the route boundary is this
    /// result with `.ok()` applied; the error carries the reason for the
    /// mandatory mode.
    pub fn from_authorization_header(
        tokens: &TokenManager,
        header: Option<&str>,
    ) -> Result<Self, AuthError> {
        let header = header.ok_or(AuthError::MissingAuthHeader)?;
        let token = extract_bearer_token(header)?;
        let claims = tokens.verify_access_token(token)?;
        Ok(Self::from_claims(&claims))
    }
}

/// Extract the token from a bearer authorization header
///
/// The scheme comparison is case-sensitive: exactly `Bearer`.
pub fn extract_bearer_token(header: &str) -> Result<&str, AuthError> {
    match header.split_once(' ') {
        Some(("Bearer", token)) => Ok(token),
        _ => Err(AuthError::InvalidScheme),
    }
}

/// Ownership gate: the caller must be the resource owner
///
/// Runs only after mandatory authentication has produced an `Identity`;
/// authentication always precedes authorization.
pub fn authorize_owner(identity: &Identity, owner_id: &str) -> Result<(), AuthError> {
    if identity.id != owner_id {
        return Err(AuthError::Forbidden);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(id: &str) -> Identity {
        Identity {
            id: id.to_string(),
            username: "alice".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Anglersson".to_string(),
        }
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(extract_bearer_token("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_wrong_scheme_rejected() {
        assert!(matches!(
            extract_bearer_token("Basic abc"),
            Err(AuthError::InvalidScheme)
        ));
        // Scheme match is case-sensitive
        assert!(matches!(
            extract_bearer_token("bearer abc"),
            Err(AuthError::InvalidScheme)
        ));
        assert!(matches!(
            extract_bearer_token("Bearerabc"),
            Err(AuthError::InvalidScheme)
        ));
    }

    #[test]
    fn test_owner_gate() {
        assert!(authorize_owner(&identity("user-1"), "user-1").is_ok());
        assert!(matches!(
            authorize_owner(&identity("user-1"), "user-2"),
            Err(AuthError::Forbidden)
        ));
    }
}
