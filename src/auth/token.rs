use crate::error::AppError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the claims encoded within an access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's unique identifier.
    pub sub: Uuid,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Issues and verifies signed, time-limited access tokens.
///
/// Constructed once at startup from the application config and shared as
/// app data. Tokens are stateless: there is no revocation list, so a
/// compromised token stays valid for its remaining TTL.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    header: Header,
    validation: Validation,
    ttl_minutes: i64,
}

impl TokenService {
    /// Builds a token service from the configured secret, algorithm
    /// identifier, and TTL. Fails if the algorithm identifier is unknown.
    pub fn new(secret: &str, algorithm: &str, ttl_minutes: i64) -> Result<Self, AppError> {
        let algorithm: Algorithm = algorithm.parse().map_err(|_| {
            AppError::Internal(format!("Unsupported signing algorithm: {}", algorithm))
        })?;

        // Pinning the algorithm here means a token signed with a
        // different one never verifies, regardless of its own header.
        let mut validation = Validation::new(algorithm);
        // A token is invalid the instant its TTL elapses; no clock-skew grace.
        validation.leeway = 0;

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            header: Header::new(algorithm),
            validation,
            ttl_minutes,
        })
    }

    /// Token lifetime in seconds; used for the cookie max-age.
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_minutes * 60
    }

    /// Issues a signed token for the given user with `exp = now + ttl`.
    pub fn issue(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = chrono::Utc::now();
        let expiration = now
            .checked_add_signed(chrono::Duration::minutes(self.ttl_minutes))
            .ok_or_else(|| AppError::Internal("Token expiry out of range".into()))?;

        let claims = Claims {
            sub: user_id,
            iat: now.timestamp() as usize,
            exp: expiration.timestamp() as usize,
        };

        encode(&self.header, &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Failed to issue token: {}", e)))
    }

    /// Verifies signature and expiry and returns the token's subject.
    ///
    /// Any failure (malformed token, bad signature, wrong algorithm,
    /// expired) surfaces as `AppError::InvalidToken`.
    pub fn verify(&self, token: &str) -> Result<Uuid, AppError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims.sub)
            .map_err(|_| AppError::InvalidToken("Invalid token".into()))
    }
}
