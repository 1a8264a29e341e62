//! Authentication extractors and routes

use axum::{
    Json, Router,
    extract::{FromRef, FromRequestParts, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION, request::Parts},
    routing::{get, post},
};
use creel_auth::{AuthError, Identity, extract_bearer_token, hash_password, verify_password};
use creel_db::NewUser;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::links::auth_links;
use crate::state::AppState;

use super::types::{
    AuthIndexResponse, LoginRequest, RegisterRequest, RegisterResponse, TokenPairResponse,
};

// ==================== Auth Extractors ====================

/// Extractor for mandatory authentication
///
/// Any verification failure short-circuits the request with an
/// unauthorized response before the handler body runs.
pub struct RequireAuth(pub Identity);

impl<S> FromRequestParts<S> for RequireAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let identity = Identity::from_authorization_header(&app_state.tokens, auth_header)?;

        debug!("Authenticated user: {}", identity.username);
        Ok(RequireAuth(identity))
    }
}

/// Extractor for optional authentication
///
/// Verification failures of any kind yield `None` instead of rejecting,
/// for read endpoints that vary their response shape by caller.
pub struct MaybeAuth(pub Option<Identity>);

impl<S> FromRequestParts<S> for MaybeAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let identity = Identity::from_authorization_header(&app_state.tokens, auth_header).ok();
        Ok(MaybeAuth(identity))
    }
}

// ==================== Input Validation ====================

/// Minimum allowed username length
const MIN_USERNAME_LENGTH: usize = 3;
/// Maximum allowed username length
const MAX_USERNAME_LENGTH: usize = 256;
/// Maximum allowed name length
const MAX_NAME_LENGTH: usize = 256;
/// Minimum allowed password length
const MIN_PASSWORD_LENGTH: usize = 6;
/// Maximum allowed password length (prevent DoS with very large passwords)
const MAX_PASSWORD_LENGTH: usize = 256;

/// Validate username format and length
///
/// Usernames start with a letter followed by letters, digits,
/// underscores or hyphens, 3-256 characters in total.
fn validate_username(username: &str) -> Result<(), ApiError> {
    if username.len() < MIN_USERNAME_LENGTH || username.len() > MAX_USERNAME_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "Username must be between {} and {} characters",
            MIN_USERNAME_LENGTH, MAX_USERNAME_LENGTH
        )));
    }
    let mut chars = username.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    if !starts_with_letter
        || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ApiError::BadRequest(
            "Username must start with a letter and contain only letters, digits, underscores, and hyphens".to_string(),
        ));
    }
    Ok(())
}

/// Validate a first or last name
fn validate_name(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() || value.len() > MAX_NAME_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "{} must be between 1 and {} characters",
            field, MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

/// Validate password length
fn validate_password(password: &str) -> Result<(), ApiError> {
    if password.len() < MIN_PASSWORD_LENGTH || password.len() > MAX_PASSWORD_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "Password must be between {} and {} characters",
            MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

// ==================== Auth Routes ====================

/// GET /api/v1/auth
async fn index(State(state): State<AppState>) -> Json<AuthIndexResponse> {
    Json(AuthIndexResponse {
        message: "Endpoint for authentication".to_string(),
        links: auth_links(&state.base_url),
    })
}

/// POST /api/v1/auth/register
async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    validate_username(&request.username)?;
    validate_name("First name", &request.first_name)?;
    validate_name("Last name", &request.last_name)?;
    validate_password(&request.password)?;

    debug!("Registering user: {}", request.username);

    let password_hash = hash_password(&request.password)?;

    let user = state
        .db
        .insert_user(NewUser {
            username: request.username,
            first_name: request.first_name.trim().to_string(),
            last_name: request.last_name.trim().to_string(),
            email: request.email,
            password_hash,
        })
        .await?;

    info!("Registered user: {}", user.username);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            links: auth_links(&state.base_url),
        }),
    ))
}

/// POST /api/v1/auth/login
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenPairResponse>, ApiError> {
    // Bound input lengths before any hashing work
    if request.username.len() > MAX_USERNAME_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "Username exceeds maximum length of {} characters",
            MAX_USERNAME_LENGTH
        )));
    }
    if request.password.len() > MAX_PASSWORD_LENGTH {
        return Err(ApiError::BadRequest(format!(
            "Password exceeds maximum length of {} characters",
            MAX_PASSWORD_LENGTH
        )));
    }

    debug!("Login attempt for user: {}", request.username);

    let user_result = state.db.get_user_by_username(&request.username).await?;

    // Verify a password even when the user does not exist, so an unknown
    // username and a wrong password are indistinguishable in both the
    // response and its timing. The dummy hash is a valid Argon2 hash
    // that always fails verification.
    const DUMMY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$dGltaW5nX2F0dGFja19wcmV2ZW50aW9u$K8rI5T7VdQ8xkO0GqK5K2w";

    let (hash_to_verify, user) = match user_result {
        Some(u) => (u.password_hash.clone(), Some(u)),
        None => (DUMMY_HASH.to_string(), None),
    };

    let password_valid = verify_password(&request.password, &hash_to_verify)?;

    let user = match (user, password_valid) {
        (Some(u), true) => u,
        _ => return Err(ApiError::Auth(AuthError::InvalidCredentials)),
    };

    // Access token is stateless; the refresh token references a stored
    // record so it can be revoked before its natural expiry.
    let access_token = state.tokens.issue_access_token(&user)?;
    let record = state.db.insert_refresh_token(&user.id).await?;
    let refresh_token = state.tokens.issue_refresh_token(&record.id, &user.id)?;

    info!("User {} logged in", user.username);

    Ok(Json(TokenPairResponse {
        access_token,
        refresh_token,
        links: auth_links(&state.base_url),
    }))
}

/// POST /api/v1/auth/refresh
async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<TokenPairResponse>, ApiError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::MissingAuthHeader)?;
    let token = extract_bearer_token(header)?;

    let claims = state.tokens.verify_refresh_token(token)?;

    // The signed envelope proved authenticity and freshness; the stored
    // record decides whether the token is still allowed to mint.
    let record = state
        .db
        .get_refresh_token(&claims.sub)
        .await?
        .filter(|r| r.valid)
        .ok_or(AuthError::TokenDisabled)?;

    let user = state
        .db
        .get_user_by_id(&record.user_id)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    let access_token = state.tokens.issue_access_token(&user)?;

    debug!("Refreshed access token for user: {}", user.username);

    Ok(Json(TokenPairResponse {
        access_token,
        // The presented refresh token stays usable until revoked or
        // expired, so it is echoed back unchanged.
        refresh_token: token.to_string(),
        links: auth_links(&state.base_url),
    }))
}

/// POST /api/v1/auth/logout
async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<StatusCode, ApiError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AuthError::MissingAuthHeader)?;
    let token = extract_bearer_token(header)?;

    let claims = state.tokens.verify_refresh_token(token)?;

    state.db.revoke_refresh_token(&claims.sub).await?;

    info!("Revoked refresh token record: {}", claims.sub);

    Ok(StatusCode::NO_CONTENT)
}

/// Create auth routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/auth", get(index))
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/refresh", post(refresh))
        .route("/api/v1/auth/logout", post(logout))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("a2_b-c").is_ok());

        // Too short, too long
        assert!(validate_username("ab").is_err());
        assert!(validate_username(&"a".repeat(257)).is_err());
        // Must start with a letter
        assert!(validate_username("1alice").is_err());
        assert!(validate_username("_alice").is_err());
        // No other characters
        assert!(validate_username("ali ce").is_err());
        assert!(validate_username("ali.ce").is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("First name", "Alice").is_ok());
        assert!(validate_name("First name", "").is_err());
        assert!(validate_name("First name", "   ").is_err());
        assert!(validate_name("First name", &"x".repeat(257)).is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("hunter2!").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password(&"p".repeat(257)).is_err());
    }
}
