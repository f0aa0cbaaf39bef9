//! Token signer for issuing domain assertions.

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Header, encode};
use tracing::{error, trace};

use crate::claims::{DomainClaims, validate_ttl};
use crate::constants::SIGNATURE_ALGORITHM;
use crate::error::MailsigError;
use crate::keys::SigningKey;

/// Issues signed tokens asserting that a domain is valid until a deadline.
///
/// Tokens are compact JWTs signed with PS256 (RSASSA-PSS, SHA-256). PSS is
/// randomized, so signing the same claims twice yields different tokens.
/// The signer holds no mutable state and can be shared across threads.
///
/// # Example
///
/// ```no_run
/// use mailsig::{KeyPair, Signer, Verifier};
/// use std::time::Duration;
///
/// let keys = KeyPair::from_pem_files("keys/private.pem", "keys/public.pem").unwrap();
/// let (signing_key, verifying_key) = keys.into_parts();
///
/// let signer = Signer::new(signing_key, Duration::from_secs(3600)).unwrap();
/// let token = signer.sign("example.com").unwrap();
///
/// assert!(Verifier::new(verifying_key).verify("example.com", &token));
/// ```
#[derive(Debug, Clone)]
pub struct Signer {
    signing_key: SigningKey,
    default_ttl: Duration,
}

impl Signer {
    /// Creates a new signer.
    ///
    /// # Arguments
    ///
    /// * `signing_key` - The RSA private key
    /// * `default_ttl` - Lifetime of tokens issued by [`sign`](Self::sign)
    ///
    /// # Errors
    ///
    /// Returns `MailsigError::InvalidTtl` if `default_ttl` is shorter than one
    /// second or pushes the expiry past the representable date range.
    pub fn new(signing_key: SigningKey, default_ttl: Duration) -> Result<Self, MailsigError> {
        let ttl = validate_ttl(default_ttl)?;
        Utc::now()
            .checked_add_signed(ttl)
            .ok_or(MailsigError::InvalidTtl)?;

        Ok(Self {
            signing_key,
            default_ttl,
        })
    }

    /// Returns the default TTL for issued tokens.
    #[must_use]
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Signs `domain` with the default TTL.
    ///
    /// The domain is not validated; any string is embedded as given.
    ///
    /// # Errors
    ///
    /// Returns `MailsigError::Signing` if the signing primitive fails.
    pub fn sign(&self, domain: &str) -> Result<String, MailsigError> {
        self.sign_with_ttl(domain, self.default_ttl)
    }

    /// Signs `domain` with a custom TTL.
    ///
    /// # Errors
    ///
    /// Returns `MailsigError::InvalidTtl` for a sub-second TTL, or
    /// `MailsigError::Signing` if the signing primitive fails.
    pub fn sign_with_ttl(&self, domain: &str, ttl: Duration) -> Result<String, MailsigError> {
        self.sign_at(domain, Utc::now(), ttl)
    }

    /// Signs `domain` as if issued at `now`.
    ///
    /// # Errors
    ///
    /// Returns `MailsigError::InvalidTtl` for a sub-second TTL, or
    /// `MailsigError::Signing` if the signing primitive fails.
    pub fn sign_at(
        &self,
        domain: &str,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, MailsigError> {
        let claims = DomainClaims::issued_at(domain, now, ttl)?;
        self.sign_claims(&claims)
    }

    /// Signs pre-built claims.
    ///
    /// # Errors
    ///
    /// Returns `MailsigError::Signing` if the signing primitive fails.
    pub fn sign_claims(&self, claims: &DomainClaims) -> Result<String, MailsigError> {
        let header = Header::new(SIGNATURE_ALGORITHM);

        let token = encode(&header, claims, self.signing_key.as_encoding_key()).map_err(|e| {
            error!(domain = %claims.domain, error = %e, "signing failed");
            MailsigError::Signing {
                reason: e.to_string(),
            }
        })?;

        trace!(domain = %claims.domain, exp = %claims.exp, "issued token");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    use super::*;

    const PRIMARY_PRIVATE: &[u8] = include_bytes!("../tests/fixtures/primary_private.pem");

    fn signer() -> Signer {
        let key = SigningKey::from_pem(PRIMARY_PRIVATE).unwrap();
        Signer::new(key, Duration::from_secs(3600)).unwrap()
    }

    fn decode_segment(segment: &str) -> serde_json::Value {
        let bytes = URL_SAFE_NO_PAD.decode(segment).unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn sign_produces_three_part_token() {
        let token = signer().sign("example.com").unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn header_names_ps256() {
        let token = signer().sign("example.com").unwrap();
        let header = decode_segment(token.split('.').next().unwrap());

        assert_eq!(header["alg"], "PS256");
    }

    #[test]
    fn payload_carries_domain_and_expiry() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let token = signer()
            .sign_at("example.com", now, Duration::from_secs(3600))
            .unwrap();
        let payload = decode_segment(token.split('.').nth(1).unwrap());

        assert_eq!(
            payload,
            serde_json::json!({ "domain": "example.com", "exp": 1_700_003_600 })
        );
    }

    #[test]
    fn signatures_are_randomized() {
        let signer = signer();
        let now = Utc::now();
        let first = signer.sign_at("example.com", now, Duration::from_secs(60)).unwrap();
        let second = signer.sign_at("example.com", now, Duration::from_secs(60)).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn zero_default_ttl_is_rejected() {
        let key = SigningKey::from_pem(PRIMARY_PRIVATE).unwrap();
        let result = Signer::new(key, Duration::ZERO);

        assert!(matches!(result, Err(MailsigError::InvalidTtl)));
    }

    #[test]
    fn default_ttl_beyond_date_range_is_rejected() {
        let key = SigningKey::from_pem(PRIMARY_PRIVATE).unwrap();
        // Fits in a chrono::Duration, but now + ttl lies past year 262143.
        let ttl = Duration::from_secs(10_000_000_000 * 3600);
        let result = Signer::new(key, ttl);

        assert!(matches!(result, Err(MailsigError::InvalidTtl)));
    }

    #[test]
    fn sign_with_ttl_rejects_sub_second_ttl() {
        let result = signer().sign_with_ttl("example.com", Duration::from_millis(10));
        assert!(matches!(result, Err(MailsigError::InvalidTtl)));
    }

    #[test]
    fn default_ttl_accessible() {
        assert_eq!(signer().default_ttl(), Duration::from_secs(3600));
    }
}
