//! JWT issuing and validation.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::{JwtSettings, MAX_JWT_EXPIRE_MINUTES};
use crate::error::AppError;

/// Claims carried by every issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// Issues HS256 tokens for the configured login and validates bearer tokens.
///
/// Issuer, audience, lifetime and signature are all checked with zero clock
/// leeway. The single username/password pair is a placeholder credential
/// check, not a user store.
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    expires_in: Duration,
    username: String,
    password: String,
}

impl AuthService {
    /// Builds the service. The token lifetime is clamped to
    /// `1..=MAX_JWT_EXPIRE_MINUTES` minutes.
    pub fn new(settings: &JwtSettings, username: String, password: String) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&settings.issuer]);
        validation.set_audience(&[&settings.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(settings.key.as_bytes()),
            decoding_key: DecodingKey::from_secret(settings.key.as_bytes()),
            validation,
            issuer: settings.issuer.clone(),
            audience: settings.audience.clone(),
            expires_in: Duration::minutes(
                settings.expire_minutes.clamp(1, MAX_JWT_EXPIRE_MINUTES),
            ),
            username,
            password,
        }
    }

    /// Checks the credentials and returns a fresh token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the credentials do not match.
    pub fn login(&self, username: &str, password: &str) -> Result<String, AppError> {
        if username != self.username || password != self.password {
            warn!(username, "Rejected login attempt");
            return Err(AppError::unauthorized(
                "Invalid username or password",
                json!({}),
            ));
        }

        self.issue_token(username)
    }

    /// Signs a token for `subject` without checking any credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if encoding fails.
    pub fn issue_token(&self, subject: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: (now + self.expires_in).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| {
                AppError::internal("Failed to issue token", json!({ "reason": e.to_string() }))
            })?;

        debug!(subject, "Issued token");
        Ok(token)
    }

    /// Validates a bearer token and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for a bad signature, wrong issuer or
    /// audience, an expired token or malformed input.
    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            warn!(error = %e, "Token validation failed");
            let reason = match e.kind() {
                ErrorKind::ExpiredSignature => "Token has expired",
                ErrorKind::InvalidSignature => "Invalid token signature",
                ErrorKind::InvalidIssuer => "Invalid token issuer",
                ErrorKind::InvalidAudience => "Invalid token audience",
                _ => "Invalid token",
            };
            AppError::unauthorized("Unauthorized", json!({ "reason": reason }))
        })?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> JwtSettings {
        JwtSettings {
            key: "0123456789abcdef0123456789abcdef".to_string(),
            issuer: "layered-api".to_string(),
            audience: "layered-api-clients".to_string(),
            expire_minutes: 60,
        }
    }

    fn service() -> AuthService {
        AuthService::new(&settings(), "test".to_string(), "password".to_string())
    }

    fn reason(err: AppError) -> String {
        err.to_error_info().details["reason"]
            .as_str()
            .unwrap_or_default()
            .to_string()
    }

    #[test]
    fn test_login_issues_valid_token() {
        let service = service();

        let token = service.login("test", "password").unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.sub, "test");
        assert_eq!(claims.iss, "layered-api");
        assert_eq!(claims.aud, "layered-api-clients");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_login_rejects_bad_credentials() {
        let service = service();

        assert!(matches!(
            service.login("test", "wrong"),
            Err(AppError::Unauthorized { .. })
        ));
        assert!(matches!(
            service.login("admin", "password"),
            Err(AppError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_out_of_range_lifetime_is_clamped() {
        let mut huge = settings();
        huge.expire_minutes = i64::MAX;
        let service = AuthService::new(&huge, "test".to_string(), "password".to_string());

        let claims = service
            .validate_token(&service.issue_token("test").unwrap())
            .unwrap();

        assert_eq!(claims.exp - claims.iat, MAX_JWT_EXPIRE_MINUTES * 60);
    }

    #[test]
    fn test_tokens_are_unique() {
        let service = service();
        let a = service.validate_token(&service.issue_token("x").unwrap()).unwrap();
        let b = service.validate_token(&service.issue_token("x").unwrap()).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = service();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "test".to_string(),
            iss: "layered-api".to_string(),
            aud: "layered-api-clients".to_string(),
            iat: now - 120,
            exp: now - 60,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(settings().key.as_bytes()),
        )
        .unwrap();

        let err = service.validate_token(&token).unwrap_err();
        assert_eq!(reason(err), "Token has expired");
    }

    #[test]
    fn test_wrong_audience_rejected() {
        let mut other = settings();
        other.audience = "someone-else".to_string();
        let foreign = AuthService::new(&other, "test".to_string(), "password".to_string());

        let token = foreign.issue_token("test").unwrap();
        let err = service().validate_token(&token).unwrap_err();

        assert_eq!(reason(err), "Invalid token audience");
    }

    #[test]
    fn test_wrong_issuer_rejected() {
        let mut other = settings();
        other.issuer = "impostor".to_string();
        let foreign = AuthService::new(&other, "test".to_string(), "password".to_string());

        let token = foreign.issue_token("test").unwrap();
        let err = service().validate_token(&token).unwrap_err();

        assert_eq!(reason(err), "Invalid token issuer");
    }

    #[test]
    fn test_wrong_key_rejected() {
        let mut other = settings();
        other.key = "ffffffffffffffffffffffffffffffff".to_string();
        let foreign = AuthService::new(&other, "test".to_string(), "password".to_string());

        let token = foreign.issue_token("test").unwrap();
        let err = service().validate_token(&token).unwrap_err();

        assert_eq!(reason(err), "Invalid token signature");
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            service().validate_token("not.a.token"),
            Err(AppError::Unauthorized { .. })
        ));
    }
}
