//! Shared application state.

use std::sync::Arc;

use mailsig::{Signer, Verifier};
use mailsig_dns::RecordSource;

use crate::{Config, ServerError};

/// State shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Issues tokens for `/sign`
    pub signer: Arc<Signer>,
    /// Checks published tokens for `/validation`
    pub verifier: Arc<Verifier>,
    /// Where published windows are fetched from
    pub records: Arc<dyn RecordSource>,
}

impl AppState {
    /// Assembles state from its parts.
    #[must_use]
    pub fn new(signer: Signer, verifier: Verifier, records: Arc<dyn RecordSource>) -> Self {
        Self {
            signer: Arc::new(signer),
            verifier: Arc::new(verifier),
            records,
        }
    }

    /// Loads keys and TTL from `config`.
    ///
    /// # Errors
    ///
    /// Returns `ServerError` if the TTL is invalid or the keys cannot be loaded.
    pub fn from_config(config: &Config, records: Arc<dyn RecordSource>) -> Result<Self, ServerError> {
        let ttl = config.signature_ttl()?;
        let (signing_key, verifying_key) = config.load_keys()?.into_parts();
        let signer = Signer::new(signing_key, ttl)?;

        Ok(Self::new(signer, Verifier::new(verifying_key), records))
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("signer", &self.signer)
            .field("verifier", &self.verifier)
            .finish_non_exhaustive()
    }
}
