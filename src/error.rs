//! Error types for signing and key handling.
//!
//! Verification never produces these errors: a token that fails to verify is
//! reported as a [`Rejection`](crate::Rejection) value instead.

use thiserror::Error;

/// Errors that can occur while loading keys or issuing signatures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MailsigError {
    /// The TTL duration is invalid.
    #[error("TTL must be at least one second and fit in a timestamp")]
    InvalidTtl,

    /// A key file could not be read.
    #[error("failed to read key file '{path}': {reason}")]
    KeyRead {
        /// Path that was being read
        path: String,
        /// Underlying I/O error
        reason: String,
    },

    /// Key material is not a usable RSA key.
    #[error("invalid key format: {reason}")]
    InvalidKeyFormat {
        /// Description of the key error
        reason: String,
    },

    /// The public key does not verify signatures made by the private key.
    #[error("public key does not match private key; check PRIVATE_KEY_PATH and PUBLIC_KEY_PATH")]
    KeyMismatch,

    /// The signing primitive failed.
    #[error("failed to sign claims: {reason}")]
    Signing {
        /// Description of the signing failure
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_read_names_the_path() {
        let err = MailsigError::KeyRead {
            path: "/etc/mailsig/private.pem".to_string(),
            reason: "No such file or directory".to_string(),
        };

        let message = err.to_string();
        assert!(message.contains("/etc/mailsig/private.pem"));
        assert!(message.contains("No such file"));
    }

    #[test]
    fn key_mismatch_points_at_configuration() {
        assert!(MailsigError::KeyMismatch.to_string().contains("PUBLIC_KEY_PATH"));
    }
}
