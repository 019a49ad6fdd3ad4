//! Local credential expiry check (no network, fail-closed).

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use thiserror::Error;

use crate::TokenClaims;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token decode failed: {0}")]
    Decode(#[from] jsonwebtoken::errors::Error),
}

/// Decode the claims segment of a credential token.
///
/// Signature validation is deliberately disabled: the server is the
/// verifier, the client only needs the expiry claim. Expiry is *not*
/// checked here either; callers compare against their own clock so the
/// check stays deterministic.
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenError> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    // Any common server-side algorithm is fine; we never check the signature.
    validation.algorithms = vec![
        Algorithm::HS256,
        Algorithm::HS384,
        Algorithm::HS512,
        Algorithm::RS256,
    ];

    let data = jsonwebtoken::decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    Ok(data.claims)
}

/// Whether a credential token is expired as of `now`.
///
/// Fail-closed: anything that cannot be decoded (malformed, truncated,
/// missing `exp`) counts as expired rather than raising.
pub fn is_expired(token: &str, now: DateTime<Utc>) -> bool {
    match decode_claims(token) {
        Ok(claims) => claims.exp <= now.timestamp(),
        Err(_) => true,
    }
}
