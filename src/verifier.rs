//! Token verifier for checking domain assertions.

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{Validation, decode};
use tracing::debug;

use crate::claims::DomainClaims;
use crate::constants::SIGNATURE_ALGORITHM;
use crate::keys::VerifyingKey;
use crate::verification::{Rejection, check_domain, check_expiration};

/// Verifies that a token is a current, authentic assertion for a domain.
///
/// [`verify`](Self::verify) is a total predicate: malformed, forged, expired,
/// foreign-domain and wrong-algorithm tokens all yield `false`. Use
/// [`inspect`](Self::inspect) to see why a token was rejected.
///
/// # Example
///
/// ```no_run
/// use mailsig::{KeyPair, Signer, Verifier};
/// use std::time::Duration;
///
/// let keys = KeyPair::from_pem_files("keys/private.pem", "keys/public.pem").unwrap();
/// let signer = Signer::new(keys.signing_key().clone(), Duration::from_secs(3600)).unwrap();
/// let verifier = Verifier::new(keys.verifying_key().clone());
///
/// let token = signer.sign("example.com").unwrap();
///
/// assert!(verifier.verify("example.com", &token));
/// assert!(!verifier.verify("other.com", &token));
/// assert!(!verifier.verify("example.com", "not-a-token"));
/// ```
#[derive(Debug, Clone)]
pub struct Verifier {
    verifying_key: VerifyingKey,
    validation: Validation,
}

impl Verifier {
    /// Creates a verifier that only accepts PS256 tokens signed by `verifying_key`.
    #[must_use]
    pub fn new(verifying_key: VerifyingKey) -> Self {
        let mut validation = Validation::new(SIGNATURE_ALGORITHM);
        // Expiry is checked in `inspect_at` against the caller's clock.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            verifying_key,
            validation,
        }
    }

    /// Returns the public key tokens are checked against.
    #[must_use]
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Returns true if `token` is a valid, unexpired assertion for `domain`.
    #[must_use]
    pub fn verify(&self, domain: &str, token: &str) -> bool {
        self.verify_at(domain, token, Utc::now())
    }

    /// Returns true if `token` is a valid assertion for `domain` at time `now`.
    #[must_use]
    pub fn verify_at(&self, domain: &str, token: &str, now: DateTime<Utc>) -> bool {
        match self.inspect_at(domain, token, now) {
            Ok(_) => true,
            Err(rejection) => {
                debug!(domain, %rejection, "token rejected");
                false
            }
        }
    }

    /// Verifies a token and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] describing the first failed check.
    pub fn inspect(&self, domain: &str, token: &str) -> Result<DomainClaims, Rejection> {
        self.inspect_at(domain, token, Utc::now())
    }

    /// Verifies a token at time `now` and returns its claims.
    ///
    /// Checks, in order: encoding and algorithm, signature, expiry, domain.
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] describing the first failed check.
    pub fn inspect_at(
        &self,
        domain: &str,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<DomainClaims, Rejection> {
        let claims = self.decode(token)?;
        check_expiration(claims.exp, now)?;
        check_domain(domain, &claims.domain)?;
        Ok(claims)
    }

    fn decode(&self, token: &str) -> Result<DomainClaims, Rejection> {
        decode::<DomainClaims>(token, self.verifying_key.as_decoding_key(), &self.validation)
            .map(|data| data.claims)
            .map_err(|e| rejection_from(&e))
    }
}

fn rejection_from(err: &JwtError) -> Rejection {
    match err.kind() {
        ErrorKind::InvalidSignature => Rejection::BadSignature,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => Rejection::WrongAlgorithm,
        _ => Rejection::Malformed {
            reason: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Duration as ChronoDuration;

    use super::*;
    use crate::keys::SigningKey;
    use crate::signer::Signer;

    const PRIMARY_PRIVATE: &[u8] = include_bytes!("../tests/fixtures/primary_private.pem");
    const PRIMARY_PUBLIC: &[u8] = include_bytes!("../tests/fixtures/primary_public.pem");

    fn signer() -> Signer {
        let key = SigningKey::from_pem(PRIMARY_PRIVATE).unwrap();
        Signer::new(key, Duration::from_secs(3600)).unwrap()
    }

    fn verifier() -> Verifier {
        Verifier::new(VerifyingKey::from_pem(PRIMARY_PUBLIC).unwrap())
    }

    #[test]
    fn verify_valid_token() {
        let token = signer().sign("example.com").unwrap();
        let claims = verifier().inspect("example.com", &token).unwrap();

        assert_eq!(claims.domain, "example.com");
        assert!(!claims.is_expired());
    }

    #[test]
    fn verify_rejects_other_domain() {
        let token = signer().sign("example.com").unwrap();
        let result = verifier().inspect("other.com", &token);

        assert!(matches!(result, Err(Rejection::DomainMismatch { .. })));
    }

    #[test]
    fn verify_accepts_case_variant_of_domain() {
        let token = signer().sign("Example.com").unwrap();
        assert!(verifier().verify("example.COM", &token));
    }

    #[test]
    fn verify_rejects_expired_token() {
        let issued = Utc::now() - ChronoDuration::hours(2);
        let token = signer()
            .sign_at("example.com", issued, Duration::from_secs(3600))
            .unwrap();

        let result = verifier().inspect("example.com", &token);
        assert!(matches!(result, Err(Rejection::Expired { .. })));
    }

    #[test]
    fn expired_rejection_reports_token_expiry() {
        let issued = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let token = signer()
            .sign_at("example.com", issued, Duration::from_secs(60))
            .unwrap();

        let result = verifier().inspect("example.com", &token);
        assert_eq!(
            result,
            Err(Rejection::Expired {
                expired_at: "2023-11-14T22:14:20+00:00".to_string(),
            })
        );
    }

    #[test]
    fn expiry_is_checked_before_domain() {
        let issued = Utc::now() - ChronoDuration::hours(2);
        let token = signer()
            .sign_at("example.com", issued, Duration::from_secs(3600))
            .unwrap();

        let result = verifier().inspect("other.com", &token);
        assert!(matches!(result, Err(Rejection::Expired { .. })));
    }

    #[test]
    fn verify_at_honours_supplied_clock() {
        let now = Utc::now();
        let token = signer()
            .sign_at("example.com", now, Duration::from_secs(3600))
            .unwrap();
        let verifier = verifier();

        assert!(verifier.verify_at("example.com", &token, now + ChronoDuration::minutes(59)));
        assert!(!verifier.verify_at("example.com", &token, now + ChronoDuration::minutes(61)));
    }

    #[test]
    fn garbage_is_malformed() {
        let result = verifier().inspect("example.com", "not-a-token");
        assert!(matches!(result, Err(Rejection::Malformed { .. })));
    }

    #[test]
    fn empty_token_is_malformed() {
        let result = verifier().inspect("example.com", "");
        assert!(matches!(result, Err(Rejection::Malformed { .. })));
    }

    #[test]
    fn verify_never_panics_on_garbage() {
        let verifier = verifier();
        for token in ["", ".", "..", "a.b.c", "mailsig:abc", "\u{0}\u{1}", "eyJ.eyJ.eyJ"] {
            assert!(!verifier.verify("example.com", token));
        }
    }

    #[test]
    fn verifying_key_accessible() {
        let key = VerifyingKey::from_pem(PRIMARY_PUBLIC).unwrap();
        let verifier = Verifier::new(key.clone());

        assert_eq!(verifier.verifying_key(), &key);
    }
}
