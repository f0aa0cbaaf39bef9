//! Constants shared by the signer, verifier and record parser.

use jsonwebtoken::Algorithm;

/// The only signature algorithm issued or accepted (RSASSA-PSS with SHA-256).
pub const SIGNATURE_ALGORITHM: Algorithm = Algorithm::PS256;

/// Prefix that marks a DNS TXT record as carrying mailsig tokens.
pub const RECORD_PREFIX: &str = "mailsig:";

/// Separator between the current and previous token in a TXT record.
pub const TOKEN_SEPARATOR: char = ',';

/// Smallest accepted token lifetime, in seconds. `exp` has whole-second resolution.
pub const MIN_TTL_SECS: u64 = 1;

/// Number of hex characters shown in a key fingerprint.
pub const FINGERPRINT_HEX_LENGTH: usize = 16;
