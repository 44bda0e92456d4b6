use async_trait::async_trait;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::config::VerificationKey;
use crate::services::auth::token::{ClaimsExtractor, TokenServiceError, TokenValidator};

/// Access token claims this service reads. Everything else in the payload is ignored.
#[derive(Debug, Clone, Deserialize)]
struct AccessTokenClaims {
    sub: String,
}

/// JWT verifier backing the bearer gate.
///
/// `jsonwebtoken::Validation` checks:
/// - signature (EdDSA or HS256, depending on the configured key)
/// - `exp` and `sub` presence, `exp` with leeway
/// - `iss` / `aud` when configured
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct JwtUtil {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtUtil {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("JwtUtil")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtUtil {
    pub fn new(
        key: &VerificationKey,
        issuer: Option<&str>,
        audience: Option<&str>,
        leeway_seconds: u64,
    ) -> Result<Self, TokenServiceError> {
        let (decoding_key, algorithm) = match key {
            VerificationKey::Ed25519Pem(pem) => {
                let key = DecodingKey::from_ed_pem(pem.as_bytes()).map_err(|e| {
                    TokenServiceError::KeyUnavailable(format!(
                        "invalid ed25519 public key pem: {}",
                        e
                    ))
                })?;
                (key, Algorithm::EdDSA)
            }
            VerificationKey::HmacSecret(secret) => {
                (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256)
            }
        };

        let mut validation = Validation::new(algorithm);
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation.leeway = leeway_seconds;

        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
        }
        match audience {
            Some(audience) => validation.set_audience(&[audience]),
            // Without a configured audience an `aud` claim would fail every token.
            None => validation.validate_aud = false,
        }

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    fn decode(&self, token: &str) -> Result<AccessTokenClaims, jsonwebtoken::errors::Error> {
        let data =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)?;

        Ok(data.claims)
    }
}

// Key-level failures are faults of this collaborator, not of the presented token.
fn is_key_fault(err: &jsonwebtoken::errors::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::InvalidKeyFormat | ErrorKind::InvalidEcdsaKey
    )
}

#[async_trait]
impl TokenValidator for JwtUtil {
    async fn validate(&self, token: &str) -> Result<bool, TokenServiceError> {
        match self.decode(token) {
            // `true` must guarantee `get_username` succeeds.
            Ok(claims) if claims.sub.trim().is_empty() => {
                tracing::debug!("access token rejected: empty 'sub' claim");
                Ok(false)
            }
            Ok(_) => Ok(true),
            Err(err) if is_key_fault(&err) => {
                Err(TokenServiceError::KeyUnavailable(err.to_string()))
            }
            Err(err) => {
                tracing::debug!(error = %err, "access token rejected");
                Ok(false)
            }
        }
    }
}

#[async_trait]
impl ClaimsExtractor for JwtUtil {
    async fn get_username(&self, token: &str) -> Result<String, TokenServiceError> {
        let claims = self.decode(token).map_err(|err| {
            if is_key_fault(&err) {
                TokenServiceError::KeyUnavailable(err.to_string())
            } else {
                TokenServiceError::Rejected(err)
            }
        })?;

        if claims.sub.trim().is_empty() {
            return Err(TokenServiceError::MissingClaim("sub"));
        }

        Ok(claims.sub)
    }
}
