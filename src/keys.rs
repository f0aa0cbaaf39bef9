//! Key types for signing and verifying domain tokens.

use std::path::Path;
use std::time::Duration;

use jsonwebtoken::{DecodingKey, EncodingKey};
use sha2::{Digest, Sha256};
use tracing::info;

use crate::claims::DomainClaims;
use crate::constants::FINGERPRINT_HEX_LENGTH;
use crate::error::MailsigError;
use crate::signer::Signer;
use crate::verifier::Verifier;

const PROBE_DOMAIN: &str = "probe.mailsig.invalid";

/// The private half of an RSA key pair, used to sign tokens.
///
/// # Example
///
/// ```no_run
/// use mailsig::SigningKey;
///
/// let pem = std::fs::read("keys/private.pem").unwrap();
/// let signing_key = SigningKey::from_pem(&pem).unwrap();
/// ```
#[derive(Clone)]
pub struct SigningKey {
    inner: EncodingKey,
}

impl SigningKey {
    /// Loads an unencrypted PEM RSA private key (PKCS#1 or PKCS#8).
    ///
    /// # Errors
    ///
    /// Returns `MailsigError::InvalidKeyFormat` if the PEM is not an RSA private key.
    pub fn from_pem(pem: &[u8]) -> Result<Self, MailsigError> {
        EncodingKey::from_rsa_pem(pem)
            .map(|inner| Self { inner })
            .map_err(|e| MailsigError::InvalidKeyFormat {
                reason: format!("private key: {e}"),
            })
    }

    /// Reads and loads a PEM RSA private key from disk.
    ///
    /// # Errors
    ///
    /// Returns `MailsigError::KeyRead` if the file cannot be read, or
    /// `MailsigError::InvalidKeyFormat` if it is not an RSA private key.
    pub fn from_pem_file(path: impl AsRef<Path>) -> Result<Self, MailsigError> {
        Self::from_pem(&read_key_file(path.as_ref())?)
    }

    pub(crate) fn as_encoding_key(&self) -> &EncodingKey {
        &self.inner
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey").finish_non_exhaustive()
    }
}

/// The public half of an RSA key pair, used to verify tokens.
///
/// This key can be safely shared and distributed.
#[derive(Clone)]
pub struct VerifyingKey {
    inner: DecodingKey,
    fingerprint: String,
}

impl VerifyingKey {
    /// Loads a PEM RSA public key (SPKI `PUBLIC KEY` or PKCS#1 `RSA PUBLIC KEY`).
    ///
    /// # Errors
    ///
    /// Returns `MailsigError::InvalidKeyFormat` if the PEM is not an RSA public key.
    pub fn from_pem(pem: &[u8]) -> Result<Self, MailsigError> {
        let inner = DecodingKey::from_rsa_pem(pem).map_err(|e| MailsigError::InvalidKeyFormat {
            reason: format!("public key: {e}"),
        })?;
        let parsed = pem::parse(pem).map_err(|e| MailsigError::InvalidKeyFormat {
            reason: format!("public key: {e}"),
        })?;

        Ok(Self {
            inner,
            fingerprint: fingerprint(parsed.contents()),
        })
    }

    /// Reads and loads a PEM RSA public key from disk.
    ///
    /// # Errors
    ///
    /// Returns `MailsigError::KeyRead` if the file cannot be read, or
    /// `MailsigError::InvalidKeyFormat` if it is not an RSA public key.
    pub fn from_pem_file(path: impl AsRef<Path>) -> Result<Self, MailsigError> {
        Self::from_pem(&read_key_file(path.as_ref())?)
    }

    /// Returns a short SHA-256 fingerprint of the key's DER encoding.
    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub(crate) fn as_decoding_key(&self) -> &DecodingKey {
        &self.inner
    }
}

impl std::fmt::Debug for VerifyingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VerifyingKey({}...)", self.fingerprint)
    }
}

impl PartialEq for VerifyingKey {
    fn eq(&self, other: &Self) -> bool {
        self.fingerprint == other.fingerprint
    }
}

impl Eq for VerifyingKey {}

/// A matched signing/verifying key pair, loaded once at startup.
///
/// Construction signs and verifies a probe token, so a pair that loads
/// successfully is known to be usable and consistent.
///
/// # Example
///
/// ```no_run
/// use mailsig::KeyPair;
///
/// let keys = KeyPair::from_pem_files("keys/private.pem", "keys/public.pem").unwrap();
/// println!("loaded key {}", keys.verifying_key().fingerprint());
/// ```
#[derive(Debug, Clone)]
pub struct KeyPair {
    signing: SigningKey,
    verifying: VerifyingKey,
}

impl KeyPair {
    /// Pairs two loaded keys after checking they belong together.
    ///
    /// # Errors
    ///
    /// Returns `MailsigError::Signing` if the private key cannot sign, or
    /// `MailsigError::KeyMismatch` if the public key rejects its signature.
    pub fn new(signing: SigningKey, verifying: VerifyingKey) -> Result<Self, MailsigError> {
        let probe = DomainClaims::new(PROBE_DOMAIN, Duration::from_secs(60))?;
        let token = Signer::new(signing.clone(), Duration::from_secs(60))?.sign_claims(&probe)?;

        if !Verifier::new(verifying.clone()).verify(PROBE_DOMAIN, &token) {
            return Err(MailsigError::KeyMismatch);
        }

        Ok(Self { signing, verifying })
    }

    /// Loads a key pair from PEM bytes.
    ///
    /// # Errors
    ///
    /// Returns `MailsigError` if either key is invalid or they do not match.
    pub fn from_pem(private_pem: &[u8], public_pem: &[u8]) -> Result<Self, MailsigError> {
        Self::new(
            SigningKey::from_pem(private_pem)?,
            VerifyingKey::from_pem(public_pem)?,
        )
    }

    /// Loads a key pair from PEM files.
    ///
    /// # Errors
    ///
    /// Returns `MailsigError` if either file is unreadable, either key is
    /// invalid, or they do not match.
    pub fn from_pem_files(
        private_path: impl AsRef<Path>,
        public_path: impl AsRef<Path>,
    ) -> Result<Self, MailsigError> {
        let pair = Self::new(
            SigningKey::from_pem_file(private_path)?,
            VerifyingKey::from_pem_file(public_path)?,
        )?;
        info!(fingerprint = pair.verifying.fingerprint(), "loaded signing key pair");
        Ok(pair)
    }

    /// Returns the private half.
    #[must_use]
    pub fn signing_key(&self) -> &SigningKey {
        &self.signing
    }

    /// Returns the public half.
    #[must_use]
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying
    }

    /// Splits the pair into its halves.
    #[must_use]
    pub fn into_parts(self) -> (SigningKey, VerifyingKey) {
        (self.signing, self.verifying)
    }
}

fn read_key_file(path: &Path) -> Result<Vec<u8>, MailsigError> {
    std::fs::read(path).map_err(|e| MailsigError::KeyRead {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn fingerprint(der: &[u8]) -> String {
    let mut hex = hex::encode(Sha256::digest(der));
    hex.truncate(FINGERPRINT_HEX_LENGTH);
    hex
}
