use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT token time-to-live constants
pub const ACCESS_TOKEN_TTL: i64 = 900; // 15 minutes
pub const REFRESH_TOKEN_TTL: i64 = 604800; // 7 days

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,   // Subject (user ID)
    pub username: String,
    pub exp: i64,      // Expiration time
    pub iat: i64,      // Issued at
    pub jti: String,   // JWT ID
}

/// Stateless JWT authentication (HS256).
///
/// Tokens carry all state in their claims; verification is signature
/// and expiry only, with no server-side session store.
#[derive(Clone)]
pub struct JwtAuth {
    secret: String,
}

impl JwtAuth {
    /// Create a new JWT auth instance.
    ///
    /// # Example
    /// ```ignore
    /// use axum_helpers::{JwtAuth, JwtConfig};
    /// use core_config::FromEnv;
    ///
    /// let config = JwtConfig::from_env()?;
    /// let jwt_auth = JwtAuth::new(&config);
    /// ```
    pub fn new(config: &JwtConfig) -> Self {
        tracing::info!("JWT auth initialized");
        Self {
            secret: config.secret.clone(),
        }
    }

    /// Create access token (15 min)
    pub fn create_access_token(&self, user_id: &str, username: &str) -> eyre::Result<String> {
        self.create_token(user_id, username, ACCESS_TOKEN_TTL)
    }

    /// Create refresh token (7 days)
    pub fn create_refresh_token(&self, user_id: &str, username: &str) -> eyre::Result<String> {
        self.create_token(user_id, username, REFRESH_TOKEN_TTL)
    }

    /// Create JWT token with specified TTL
    fn create_token(&self, user_id: &str, username: &str, ttl_seconds: i64) -> eyre::Result<String> {
        let now = Utc::now();
        let exp = (now + Duration::seconds(ttl_seconds)).timestamp();
        let iat = now.timestamp();
        let jti = Uuid::new_v4().to_string();

        let claims = JwtClaims {
            sub: user_id.to_string(),
            username: username.to_string(),
            exp,
            iat,
            jti,
        };

        let header = Header {
            alg: jsonwebtoken::Algorithm::HS256,
            ..Default::default()
        };

        let token = encode(
            &header,
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Verify JWT token signature and decode claims
    pub fn verify_token(&self, token: &str) -> eyre::Result<JwtClaims> {
        let token_data = decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("test-secret-that-is-32-characters!!"))
    }

    #[test]
    fn test_create_and_verify_access_token() {
        let auth = test_auth();

        let token = auth.create_access_token("42", "barista").unwrap();
        let claims = auth.verify_token(&token).unwrap();

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.username, "barista");
        assert!(claims.exp > claims.iat);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn test_verify_rejects_garbage_token() {
        let auth = test_auth();
        assert!(auth.verify_token("not.a.token").is_err());
    }

    #[test]
    fn test_verify_rejects_token_from_different_secret() {
        let auth = test_auth();
        let other = JwtAuth::new(&JwtConfig::new("another-secret-that-is-32-chars!!!!"));

        let token = other.create_access_token("1", "admin").unwrap();
        assert!(auth.verify_token(&token).is_err());
    }

    #[test]
    fn test_refresh_token_has_longer_ttl() {
        let auth = test_auth();

        let access = auth.create_access_token("1", "admin").unwrap();
        let refresh = auth.create_refresh_token("1", "admin").unwrap();

        let access_claims = auth.verify_token(&access).unwrap();
        let refresh_claims = auth.verify_token(&refresh).unwrap();

        assert!(refresh_claims.exp > access_claims.exp);
    }
}
