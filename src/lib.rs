//! Signed, time-bounded domain assertions for DNS TXT publication.
//!
//! A mailsig token asserts "this domain is authorized until time T". Tokens
//! are issued by a [`Signer`] holding an RSA private key and checked by a
//! [`Verifier`] holding the public key. Domains publish their tokens in a TXT
//! record (`mailsig:<current>[,<previous>]`) and third parties confirm the
//! authorization with nothing but DNS and the public key.
//!
//! # Example
//!
//! ```no_run
//! use mailsig::{KeyPair, Signer, Verifier, parse_txt, reconcile};
//! use std::time::Duration;
//!
//! // Loaded once at startup
//! let keys = KeyPair::from_pem_files("keys/private.pem", "keys/public.pem").unwrap();
//! let (signing_key, verifying_key) = keys.into_parts();
//! let signer = Signer::new(signing_key, Duration::from_secs(24 * 3600)).unwrap();
//! let verifier = Verifier::new(verifying_key);
//!
//! // Issuer side: sign and publish `mailsig:<token>` under the domain
//! let token = signer.sign("example.com").unwrap();
//!
//! // Verifier side: parse the TXT record and reconcile the window
//! let window = parse_txt(&format!("mailsig:{token}"));
//! let verdict = reconcile(&verifier, "example.com", window.as_ref());
//! assert!(verdict.valid);
//! ```
//!
//! # Token Structure
//!
//! Tokens are compact JWTs with header `{"alg":"PS256","typ":"JWT"}` and payload:
//!
//! - `domain`: the subject domain, as given to the signer
//! - `exp`: expiration, seconds since the Unix epoch
//!
//! # Security Properties
//!
//! | Property | How Achieved |
//! |----------|--------------|
//! | No algorithm confusion | Only `PS256` is accepted |
//! | Probabilistic signatures | RSASSA-PSS with SHA-256 |
//! | Bounded lifetime | `exp` required and checked as `now < exp` |
//! | No cross-domain replay | `domain` claim compared with the domain under test |
//! | Fail-closed | [`Verifier::verify`] returns `false` for every failure |
//!
//! Domain comparison ignores ASCII case and a single trailing root dot; see
//! [`domains_match`].

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod claims;
mod constants;
mod error;
mod keys;
mod proofs;
mod record;
mod rotation;
mod signer;
mod verification;
mod verifier;

pub mod prelude;

pub use claims::DomainClaims;
pub use constants::{
    FINGERPRINT_HEX_LENGTH, MIN_TTL_SECS, RECORD_PREFIX, SIGNATURE_ALGORITHM, TOKEN_SEPARATOR,
};
pub use error::MailsigError;
pub use keys::{KeyPair, SigningKey, VerifyingKey};
pub use record::{SignatureWindow, parse_txt, select_window};
pub use rotation::{Reconciliation, reconcile, reconcile_at};
pub use signer::Signer;
pub use verification::{Rejection, check_domain, check_expiration, domains_match};
pub use verifier::Verifier;
