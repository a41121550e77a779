//! JWT token validation — the "verify credential → identity" function.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use codehub_core::config::auth::AuthConfig;
use codehub_core::error::AppError;
use codehub_core::types::UserId;

use super::claims::Claims;

/// Validates bearer credentials and extracts the caller's identity.
#[derive(Clone)]
pub struct IdentityVerifier {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for IdentityVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl IdentityVerifier {
    /// Creates a new verifier from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.jwt_leeway_seconds;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Verifies a credential and returns the stable user identity.
    pub fn verify(&self, token: &str) -> Result<UserId, AppError> {
        Ok(self.decode(token)?.user_id())
    }

    /// Decodes and validates a token, returning the full claims.
    pub fn decode(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::authentication("Token has expired")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken => {
                        AppError::authentication("Invalid token format")
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AppError::authentication("Invalid token signature")
                    }
                    _ => AppError::authentication(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}
