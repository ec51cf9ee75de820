//! Sign-in token issuance.
//!
//! HS256 JWTs asserting only the user's identity, valid for seven days.

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::{AppError, AppResult, JwtConfig};
use domain::{User, MIN_JWT_SECRET_LENGTH, TOKEN_VALIDITY_DAYS};

/// JWT claims payload.
///
/// The only identity asserted is `sub`. `jti` carries no meaning of its own;
/// it is a random nonce so that two tokens issued for the same user within
/// one second are still distinct strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User id
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
    /// Random per issuance
    pub jti: Uuid,
}

/// An issued token and its expiry
#[derive(Debug, Clone, Serialize)]
pub struct SignedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies sign-in tokens with a symmetric key.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validity: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("key", &"[REDACTED]")
            .field("validity", &self.validity)
            .finish()
    }
}

impl TokenIssuer {
    /// Build an issuer from the signing secret.
    ///
    /// # Errors
    /// Returns [`AppError::Configuration`] if the secret is empty.
    pub fn new(secret: &str) -> AppResult<Self> {
        if secret.is_empty() {
            return Err(AppError::configuration("JWT_SECRET must be set"));
        }
        if secret.len() < MIN_JWT_SECRET_LENGTH {
            tracing::warn!(
                "JWT secret is shorter than {} bytes; use a longer secret in production",
                MIN_JWT_SECRET_LENGTH
            );
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validity: Duration::days(TOKEN_VALIDITY_DAYS),
        })
    }

    /// Build an issuer from shared JWT configuration.
    pub fn from_config(config: &JwtConfig) -> AppResult<Self> {
        Self::new(&config.secret)
    }

    /// Issue a token for `user`.
    pub fn issue(&self, user: &User) -> AppResult<SignedToken> {
        let now = Utc::now();
        let expires_at = now + self.validity;

        let claims = TokenClaims {
            sub: user.id(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;

        Ok(SignedToken {
            token,
            // Expiry as encoded, without sub-second precision
            expires_at: Utc
                .timestamp_opt(claims.exp, 0)
                .single()
                .unwrap_or(expires_at),
        })
    }

    /// Check signature and expiry, returning the claims.
    pub fn verify(&self, token: &str) -> AppResult<TokenClaims> {
        let token_data = decode::<TokenClaims>(
            token,
            &self.decoding_key,
            &Validation::new(Algorithm::HS256),
        )?;

        Ok(token_data.claims)
    }
}
