use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared_types::{AppError, AuthUser};
use uuid::Uuid;

/// Lifetime of a session, matching the cookie `Max-Age`.
pub const SESSION_TTL_DAYS: i64 = 7;

/// Claims carried by the signed session token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Profile id of the signed-in user.
    pub sub: Uuid,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
    /// Unique token identifier, so two sessions issued in the same second differ.
    pub jti: String,
}

impl SessionClaims {
    pub fn user_id(&self) -> Uuid {
        self.sub
    }
}

/// HMAC keys derived from `SESSION_SECRET`.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SessionKeys {
    pub fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a session token for a freshly authenticated user.
    pub fn issue(&self, user: &AuthUser) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user.id,
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::days(SESSION_TTL_DAYS)).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };
        self.encode(&claims)
    }

    fn encode(&self, claims: &SessionClaims) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.encoding).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign session token");
            AppError::internal("Failed to create session")
        })
    }

    /// Verify signature and expiry.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        decode::<SessionClaims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
    }
}
