//! Pure verification predicates and the rejection outcome.
//!
//! These functions hold the security-relevant comparisons in isolation from
//! the JWT machinery, so they can be tested exhaustively and checked with
//! Kani (see `proofs.rs`).
//!
//! | Function | Property |
//! |----------|----------|
//! | [`domains_match`] | Token domain equals the domain under test, ignoring ASCII case and one trailing root dot |
//! | [`check_domain`] | Same as above, with a structured rejection |
//! | [`check_expiration`] | Current time is strictly less than expiration |
//!
//! # Domain comparison policy
//!
//! DNS names are case-insensitive, so `Example.COM` and `example.com` name the
//! same zone and both match a token issued for either. A single trailing dot
//! (the fully-qualified form) is ignored. Nothing else is normalized: no
//! IDNA mapping, no whitespace trimming, no wildcard matching.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Why a token was not accepted.
///
/// Rejections are values, not failures of the verifier: the public
/// [`Verifier::verify`](crate::Verifier::verify) collapses every variant to
/// `false`. They exist for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The token could not be decoded or lacks required claims.
    #[error("malformed token: {reason}")]
    Malformed {
        /// Description of the decoding failure
        reason: String,
    },
    /// The token names an algorithm other than PS256.
    #[error("token uses an algorithm other than PS256")]
    WrongAlgorithm,
    /// The signature does not verify against the public key.
    #[error("token signature verification failed")]
    BadSignature,
    /// The token is past its expiry.
    #[error("token expired at {expired_at}")]
    Expired {
        /// When the token expired (RFC 3339)
        expired_at: String,
    },
    /// The token was issued for a different domain.
    #[error("token issued for '{token_domain}' but checked against '{expected_domain}'")]
    DomainMismatch {
        /// Domain embedded in the token
        token_domain: String,
        /// Domain under test
        expected_domain: String,
    },
}

/// Pure function: compares a token's domain with the domain under test.
///
/// Comparison ignores ASCII case and strips one trailing root dot from each
/// side before comparing.
///
/// # Arguments
///
/// * `expected` - The domain being validated
/// * `token_domain` - The `domain` claim from the token
///
/// # Returns
///
/// `true` if both name the same zone, `false` otherwise
///
/// # Examples
///
/// ```
/// use mailsig::domains_match;
///
/// assert!(domains_match("example.com", "example.com"));
/// assert!(domains_match("Example.COM", "example.com."));
/// assert!(!domains_match("example.com", "mail.example.com"));
/// ```
#[must_use]
pub fn domains_match(expected: &str, token_domain: &str) -> bool {
    strip_root(expected).eq_ignore_ascii_case(strip_root(token_domain))
}

/// Pure function: validates that the token domain matches the domain under test.
///
/// # Arguments
///
/// * `expected` - The domain being validated
/// * `token_domain` - The `domain` claim from the token
///
/// # Returns
///
/// `Ok(())` if [`domains_match`] holds
///
/// # Errors
///
/// Returns `Rejection::DomainMismatch` if [`domains_match`] is false.
///
/// # Examples
///
/// ```
/// use mailsig::check_domain;
///
/// assert!(check_domain("example.com", "EXAMPLE.com").is_ok());
/// assert!(check_domain("example.com", "other.com").is_err());
/// ```
pub fn check_domain(expected: &str, token_domain: &str) -> Result<(), Rejection> {
    if domains_match(expected, token_domain) {
        Ok(())
    } else {
        Err(Rejection::DomainMismatch {
            token_domain: token_domain.to_string(),
            expected_domain: expected.to_string(),
        })
    }
}

/// Pure function: checks if a token has expired at a given time.
///
/// # Arguments
///
/// * `exp` - The expiration claim from the token
/// * `now` - The current time (injected for testability)
///
/// # Returns
///
/// `Ok(())` if the token is still valid (`now < exp`)
///
/// # Errors
///
/// Returns `Rejection::Expired` if `now >= exp`.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use mailsig::check_expiration;
///
/// let now = Utc::now();
///
/// assert!(check_expiration(now + Duration::hours(1), now).is_ok());
/// assert!(check_expiration(now - Duration::hours(1), now).is_err());
/// assert!(check_expiration(now, now).is_err()); // Boundary: now >= exp is expired
/// ```
pub fn check_expiration(exp: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), Rejection> {
    if now < exp {
        Ok(())
    } else {
        Err(Rejection::Expired {
            expired_at: exp.to_rfc3339(),
        })
    }
}

fn strip_root(domain: &str) -> &str {
    domain.strip_suffix('.').unwrap_or(domain)
}
