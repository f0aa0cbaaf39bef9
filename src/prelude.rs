//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use mailsig::prelude::*;
//!
//! let window = parse_txt("mailsig:AAA").unwrap();
//! assert_eq!(window.current, "AAA");
//! ```

pub use crate::{
    // Core types
    DomainClaims, KeyPair, Reconciliation, SignatureWindow, Signer, SigningKey, Verifier,
    VerifyingKey,
    // Errors and outcomes
    MailsigError, Rejection,
    // Functions
    check_domain, check_expiration, domains_match, parse_txt, reconcile, reconcile_at,
    select_window,
    // Constants
    RECORD_PREFIX, SIGNATURE_ALGORITHM,
};
