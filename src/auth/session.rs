/// Session tokens
///
/// HS256-signed tokens carrying the user id and username, set as an HttpOnly
/// cookie at login. This service signs and verifies its own cookies, so a
/// single shared secret (from `SESSION_SECRET`) replaces a key pair.
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::{AppError, Result};

/// Session claims: standard sub/iat/exp plus the username so public pages can
/// greet the viewer without a user lookup.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionClaims {
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Username at login time
    pub username: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Signing/verification keys plus session lifetime; shared app state.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl SessionKeys {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.session_secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.session_secret.as_bytes()),
            ttl: Duration::hours(config.session_ttl_hours),
        }
    }

    /// Issue a session token for a freshly authenticated user.
    pub fn issue(&self, user_id: Uuid, username: &str) -> Result<String> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user_id.to_string(),
            username: username.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to sign session token: {}", e)))
    }

    /// Verify a session token. Any failure (bad signature, expired, garbage)
    /// means "not signed in"; callers decide whether that redirects.
    pub fn verify(&self, token: &str) -> std::result::Result<SessionClaims, jsonwebtoken::errors::Error> {
        let data = decode::<SessionClaims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}
