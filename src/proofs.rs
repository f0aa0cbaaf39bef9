//! Kani formal verification proof harnesses.
//!
//! # Running Proofs
//!
//! ```bash
//! cargo kani -p mailsig
//! ```
//!
//! # Properties Verified
//!
//! | Category | Property | Harness |
//! |----------|----------|---------|
//! | Expiration | Never panics | `check_expiration_never_panics` |
//! | Expiration | Expired fails | `expired_claims_always_fail` |
//! | Expiration | Valid passes | `unexpired_claims_pass` |
//! | Domain | Never panics | `domains_match_never_panics` |
//! | Domain | Reflexive | `domain_matches_itself` |
//! | Domain | Symmetric | `domain_match_is_symmetric` |
//! | Rotation | Outdated implies valid | `outdated_implies_valid` |
//! | Rotation | Valid needs a verified slot | `valid_requires_a_verified_slot` |

#![cfg(kani)]

use chrono::{TimeZone, Utc};

use crate::rotation::Reconciliation;
use crate::verification::{check_expiration, domains_match};

mod expiration_proofs {
    use super::*;

    #[kani::proof]
    #[kani::unwind(2)]
    fn check_expiration_never_panics() {
        let exp_secs: i64 = kani::any();
        let now_secs: i64 = kani::any();

        kani::assume(exp_secs > -86400 * 365 * 100 && exp_secs < 86400 * 365 * 100);
        kani::assume(now_secs > -86400 * 365 * 100 && now_secs < 86400 * 365 * 100);

        if let (Some(exp), Some(now)) = (
            Utc.timestamp_opt(exp_secs, 0).single(),
            Utc.timestamp_opt(now_secs, 0).single(),
        ) {
            let _ = check_expiration(exp, now);
        }
    }

    #[kani::proof]
    #[kani::unwind(2)]
    fn expired_claims_always_fail() {
        let exp_secs: i64 = kani::any();
        let offset: i64 = kani::any();

        kani::assume(exp_secs > 0 && exp_secs < i64::MAX / 2);
        kani::assume(offset >= 0 && offset < 86400 * 365 * 10);

        if let (Some(exp), Some(now)) = (
            Utc.timestamp_opt(exp_secs, 0).single(),
            Utc.timestamp_opt(exp_secs.saturating_add(offset), 0).single(),
        ) {
            assert!(check_expiration(exp, now).is_err());
        }
    }

    #[kani::proof]
    #[kani::unwind(2)]
    fn unexpired_claims_pass() {
        let exp_secs: i64 = kani::any();
        let offset: i64 = kani::any();

        kani::assume(exp_secs > 1 && exp_secs < i64::MAX / 2);
        kani::assume(offset > 0 && offset <= exp_secs);

        if let (Some(exp), Some(now)) = (
            Utc.timestamp_opt(exp_secs, 0).single(),
            Utc.timestamp_opt(exp_secs - offset, 0).single(),
        ) {
            assert!(check_expiration(exp, now).is_ok());
        }
    }
}

mod domain_proofs {
    use super::*;

    #[kani::proof]
    #[kani::unwind(18)]
    fn domains_match_never_panics() {
        let a: [u8; 16] = kani::any();
        let b: [u8; 16] = kani::any();

        if let (Ok(a), Ok(b)) = (std::str::from_utf8(&a), std::str::from_utf8(&b)) {
            let _ = domains_match(a, b);
        }
    }

    #[kani::proof]
    #[kani::unwind(10)]
    fn domain_matches_itself() {
        let data: [u8; 8] = kani::any();

        if let Ok(s) = std::str::from_utf8(&data) {
            assert!(domains_match(s, s));
        }
    }

    #[kani::proof]
    #[kani::unwind(10)]
    fn domain_match_is_symmetric() {
        let a: [u8; 8] = kani::any();
        let b: [u8; 8] = kani::any();

        if let (Ok(a), Ok(b)) = (std::str::from_utf8(&a), std::str::from_utf8(&b)) {
            assert!(domains_match(a, b) == domains_match(b, a));
        }
    }
}

mod rotation_proofs {
    use super::*;

    #[kani::proof]
    fn outdated_implies_valid() {
        let verdict = Reconciliation::combine(kani::any(), kani::any());
        assert!(!verdict.outdated || verdict.valid);
    }

    #[kani::proof]
    fn valid_requires_a_verified_slot() {
        let current: bool = kani::any();
        let previous: bool = kani::any();

        let verdict = Reconciliation::combine(current, previous);
        assert!(verdict.valid == (current || previous));
    }
}
