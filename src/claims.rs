//! Domain claims embedded in a signature token.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::MIN_TTL_SECS;
use crate::error::MailsigError;

/// The payload bound into a token: "this domain is valid until `exp`".
///
/// Serialized as the JWT payload `{"domain": "...", "exp": <seconds>}`. The
/// expiry has whole-second resolution; constructors truncate it so that a
/// claim decoded from a token compares equal to the one that was signed.
///
/// # Example
///
/// ```
/// use mailsig::DomainClaims;
/// use std::time::Duration;
///
/// let claims = DomainClaims::new("example.com", Duration::from_secs(3600)).unwrap();
///
/// assert_eq!(claims.domain, "example.com");
/// assert!(!claims.is_expired());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainClaims {
    /// The subject domain, exactly as given to the signer
    pub domain: String,
    /// When the claim stops being valid
    #[serde(with = "chrono::serde::ts_seconds")]
    pub exp: DateTime<Utc>,
}

impl DomainClaims {
    /// Creates claims for `domain` expiring `ttl` from now.
    ///
    /// # Errors
    ///
    /// Returns `MailsigError::InvalidTtl` if `ttl` is shorter than one second
    /// or the expiry would overflow.
    pub fn new(domain: impl Into<String>, ttl: Duration) -> Result<Self, MailsigError> {
        Self::issued_at(domain, Utc::now(), ttl)
    }

    /// Creates claims for `domain` expiring `ttl` after `now`.
    ///
    /// # Errors
    ///
    /// Returns `MailsigError::InvalidTtl` if `ttl` is shorter than one second
    /// or the expiry would overflow.
    pub fn issued_at(
        domain: impl Into<String>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, MailsigError> {
        let ttl = validate_ttl(ttl)?;
        let exp = now
            .checked_add_signed(ttl)
            .ok_or(MailsigError::InvalidTtl)?;

        Ok(Self::expiring_at(domain, exp))
    }

    /// Creates claims with an explicit expiry, truncated to whole seconds.
    #[must_use]
    pub fn expiring_at(domain: impl Into<String>, exp: DateTime<Utc>) -> Self {
        let exp = DateTime::from_timestamp(exp.timestamp(), 0).unwrap_or(exp);
        Self {
            domain: domain.into(),
            exp,
        }
    }

    /// Returns true if the claims have expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Returns true if the claims are expired at `now` (`now >= exp`).
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.exp
    }
}

/// Converts a TTL to a chrono duration, rejecting sub-second values.
pub(crate) fn validate_ttl(ttl: Duration) -> Result<chrono::Duration, MailsigError> {
    if ttl.as_secs() < MIN_TTL_SECS {
        return Err(MailsigError::InvalidTtl);
    }
    chrono::Duration::from_std(ttl).map_err(|_| MailsigError::InvalidTtl)
}
