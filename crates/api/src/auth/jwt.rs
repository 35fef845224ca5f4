//! JWT access-token validation.
//!
//! Access tokens are HS256-signed JWTs issued by the external auth service.
//! They carry a [`Claims`] payload whose `sub` is the user's database id.

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use taleweave_core::types::DbId;

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier.
    pub jti: String,
}

/// Configuration for JWT validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret shared with the token issuer.
    pub secret: String,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var       | Required |
    /// |---------------|----------|
    /// | `JWT_SECRET`  | **yes**  |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        Self { secret }
    }
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

    fn config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
        }
    }

    fn mint(sub: DbId, exp_offset_secs: i64, secret: &str) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub,
            exp: now + exp_offset_secs,
            iat: now,
            jti: uuid::Uuid::new_v4().to_string(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("encoding should succeed")
    }

    #[test]
    fn valid_token_yields_subject() {
        let token = mint(42, 900, SECRET);

        let claims = validate_token(&token, &config(SECRET)).expect("token should validate");
        assert_eq!(claims.sub, 42);
        assert!(claims.exp > claims.iat);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn expired_token_fails() {
        // Well beyond the default 60-second leeway.
        let token = mint(1, -300, SECRET);
        assert!(validate_token(&token, &config(SECRET)).is_err());
    }

    #[test]
    fn foreign_secret_fails() {
        let token = mint(1, 900, "secret-alpha");
        assert!(validate_token(&token, &config("secret-bravo")).is_err());
    }
}
