//! Caller identity from `Authorization: Bearer <jwt>`.
//!
//! Tokens are HS256-signed with the configured secret. The `sub` claim is
//! the user's public id; only `access` tokens are accepted on API routes.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use notes_core::UserPublicId;

use crate::error::ApiError;
use crate::state::AppState;

/// Kind of token, carried in the `type` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User public id (subject).
    pub sub: String,
    /// Token kind.
    #[serde(rename = "type")]
    pub kind: TokenKind,
    /// Whether the token was issued straight from a login.
    #[serde(default)]
    pub fresh: bool,
    /// Expiration time (unix timestamp).
    pub exp: usize,
    /// Issued at (unix timestamp).
    pub iat: usize,
}

/// The authenticated caller, resolved before any store access.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Public id every note operation is scoped to.
    pub public_id: UserPublicId,
}

/// Create a signed token for a user.
pub fn create_token(
    public_id: &UserPublicId,
    kind: TokenKind,
    fresh: bool,
    secret: &str,
    ttl: chrono::Duration,
) -> Result<String, ApiError> {
    let now = chrono::Utc::now();

    let claims = Claims {
        sub: public_id.as_str().to_string(),
        kind,
        fresh,
        exp: (now + ttl).timestamp().max(0) as usize,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("Failed to create token: {}", e)))
}

/// Validate a token and return its claims.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, ApiError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!(error = %e, "JWT validation failed");
        ApiError::Unauthorized(format!("Invalid token: {}", e))
    })?;

    Ok(token_data.claims)
}

/// Resolve the caller from an access token.
fn current_user_from_token(token: &str, secret: &str) -> Result<CurrentUser, ApiError> {
    let claims = validate_token(token, secret)?;

    if claims.kind != TokenKind::Access {
        return Err(ApiError::Unauthorized(
            "Only access tokens are allowed".to_string(),
        ));
    }

    let public_id = UserPublicId::new(claims.sub)
        .ok_or_else(|| ApiError::Unauthorized("Token has an empty subject".to_string()))?;

    Ok(CurrentUser { public_id })
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError::Unauthorized("Authorization header must be Bearer <token>".to_string())
        })?;

        current_user_from_token(token.trim(), &state.config().jwt_secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_secret_key_12345";

    fn user() -> UserPublicId {
        UserPublicId::new("3f1c2a").unwrap()
    }

    fn hour() -> chrono::Duration {
        chrono::Duration::hours(1)
    }

    #[test]
    fn test_create_and_validate_token() {
        let token = create_token(&user(), TokenKind::Access, true, SECRET, hour()).unwrap();
        let claims = validate_token(&token, SECRET).unwrap();

        assert_eq!(claims.sub, "3f1c2a");
        assert_eq!(claims.kind, TokenKind::Access);
        assert!(claims.fresh);
    }

    #[test]
    fn test_validate_token_wrong_secret() {
        let token = create_token(&user(), TokenKind::Access, false, "secret1", hour()).unwrap();
        assert!(validate_token(&token, "secret2").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = create_token(
            &user(),
            TokenKind::Access,
            false,
            SECRET,
            chrono::Duration::hours(-2),
        )
        .unwrap();
        assert!(matches!(
            validate_token(&token, SECRET),
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_current_user_from_access_token() {
        let token = create_token(&user(), TokenKind::Access, false, SECRET, hour()).unwrap();
        let current = current_user_from_token(&token, SECRET).unwrap();
        assert_eq!(current.public_id, user());
    }

    #[test]
    fn test_refresh_token_rejected() {
        let token = create_token(&user(), TokenKind::Refresh, false, SECRET, hour()).unwrap();
        assert!(matches!(
            current_user_from_token(&token, SECRET),
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_empty_subject_rejected() {
        let now = chrono::Utc::now().timestamp() as usize;
        let claims = serde_json::json!({
            "sub": "",
            "type": "access",
            "exp": now + 3600,
            "iat": now,
        });
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(current_user_from_token(&token, SECRET).is_err());
    }
}
