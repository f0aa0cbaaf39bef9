//! Reconciliation of a published signature window into a trust verdict.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::record::SignatureWindow;
use crate::verifier::Verifier;

/// Combined verdict for a domain's published window.
///
/// `outdated` means the previous token verified; that still counts as valid,
/// since it represents the grace period of a rotation in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// The domain is currently authorized
    pub valid: bool,
    /// The authorization rests on the previous token
    pub outdated: bool,
}

impl Reconciliation {
    /// Pure function: combines the per-slot results.
    ///
    /// # Examples
    ///
    /// ```
    /// use mailsig::Reconciliation;
    ///
    /// assert_eq!(
    ///     Reconciliation::combine(false, true),
    ///     Reconciliation { valid: true, outdated: true }
    /// );
    /// ```
    #[must_use]
    pub const fn combine(current_valid: bool, previous_valid: bool) -> Self {
        Self {
            valid: current_valid || previous_valid,
            outdated: previous_valid,
        }
    }
}

/// Verifies both slots of a window for `domain`.
///
/// An absent window yields `{valid: false, outdated: false}`.
///
/// # Example
///
/// ```no_run
/// use mailsig::{KeyPair, Signer, Verifier, SignatureWindow, reconcile};
/// use std::time::Duration;
///
/// let keys = KeyPair::from_pem_files("keys/private.pem", "keys/public.pem").unwrap();
/// let signer = Signer::new(keys.signing_key().clone(), Duration::from_secs(3600)).unwrap();
/// let verifier = Verifier::new(keys.verifying_key().clone());
///
/// let window = SignatureWindow::current_only(signer.sign("example.com").unwrap());
/// let verdict = reconcile(&verifier, "example.com", Some(&window));
///
/// assert!(verdict.valid);
/// assert!(!verdict.outdated);
/// ```
#[must_use]
pub fn reconcile(
    verifier: &Verifier,
    domain: &str,
    window: Option<&SignatureWindow>,
) -> Reconciliation {
    reconcile_at(verifier, domain, window, Utc::now())
}

/// Verifies both slots of a window for `domain` at time `now`.
#[must_use]
pub fn reconcile_at(
    verifier: &Verifier,
    domain: &str,
    window: Option<&SignatureWindow>,
    now: DateTime<Utc>,
) -> Reconciliation {
    let Some(window) = window else {
        debug!(domain, "no signature window published");
        return Reconciliation::default();
    };

    let current_valid = verifier.verify_at(domain, &window.current, now);
    let previous_valid = window
        .previous
        .as_deref()
        .is_some_and(|token| verifier.verify_at(domain, token, now));

    Reconciliation::combine(current_valid, previous_valid)
}
