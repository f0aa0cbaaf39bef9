//! Record source trait and implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use hickory_resolver::TokioResolver;
use mailsig::{SignatureWindow, select_window};
use tracing::debug;

use crate::LookupError;

/// Supplies the TXT records published for a domain.
///
/// Implementations only fetch; parsing and the choice of record happen in
/// the provided [`signature_window`](Self::signature_window) method.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Returns every TXT record string published for `domain`.
    ///
    /// # Errors
    ///
    /// Returns `LookupError` if the records cannot be fetched.
    async fn txt_records(&self, domain: &str) -> Result<Vec<String>, LookupError>;

    /// Returns the signature window from the first `mailsig:` record.
    ///
    /// Lookup failures and records without a match yield `None`.
    async fn signature_window(&self, domain: &str) -> Option<SignatureWindow> {
        match self.txt_records(domain).await {
            Ok(records) => {
                let window = select_window(&records);
                if window.is_none() {
                    debug!(domain, records = records.len(), "no mailsig record found");
                }
                window
            }
            Err(e) => {
                debug!(domain, error = %e, "TXT lookup failed");
                None
            }
        }
    }
}

/// Fetches TXT records over DNS.
///
/// No caching and no retries beyond what the resolver itself does.
pub struct DnsRecordSource {
    resolver: TokioResolver,
}

impl DnsRecordSource {
    /// Creates a source using the system resolver configuration.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::Resolver` if the system configuration cannot be read.
    pub fn from_system_conf() -> Result<Self, LookupError> {
        let resolver = TokioResolver::builder_tokio()
            .map_err(|e| LookupError::Resolver {
                reason: e.to_string(),
            })?
            .build();
        Ok(Self { resolver })
    }

    /// Wraps an already configured resolver.
    #[must_use]
    pub fn with_resolver(resolver: TokioResolver) -> Self {
        Self { resolver }
    }
}

impl std::fmt::Debug for DnsRecordSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DnsRecordSource").finish_non_exhaustive()
    }
}

#[async_trait]
impl RecordSource for DnsRecordSource {
    async fn txt_records(&self, domain: &str) -> Result<Vec<String>, LookupError> {
        let name = fqdn(domain);
        debug!(name = %name, "querying TXT records");

        let lookup = self
            .resolver
            .txt_lookup(name.as_str())
            .await
            .map_err(|e| LookupError::Query {
                domain: domain.to_string(),
                reason: e.to_string(),
            })?;

        // A TXT record may be split into several character-strings.
        Ok(lookup
            .iter()
            .map(|txt| {
                txt.iter()
                    .map(|data| String::from_utf8_lossy(data))
                    .collect::<String>()
            })
            .collect())
    }
}

/// Serves fixed records from memory.
///
/// Domains are keyed case-insensitively, ignoring a trailing root dot.
#[derive(Debug, Clone, Default)]
pub struct StaticRecordSource {
    records: HashMap<String, Vec<String>>,
}

impl StaticRecordSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds records for `domain`, replacing any existing ones.
    #[must_use]
    pub fn with_records<I, S>(mut self, domain: &str, records: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(domain, records);
        self
    }

    /// Sets the records for `domain`, replacing any existing ones.
    pub fn insert<I, S>(&mut self, domain: &str, records: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.records
            .insert(key(domain), records.into_iter().map(Into::into).collect());
    }
}

#[async_trait]
impl RecordSource for StaticRecordSource {
    async fn txt_records(&self, domain: &str) -> Result<Vec<String>, LookupError> {
        self.records
            .get(&key(domain))
            .cloned()
            .ok_or_else(|| LookupError::NoRecords {
                domain: domain.to_string(),
            })
    }
}

fn fqdn(domain: &str) -> String {
    if domain.ends_with('.') {
        domain.to_string()
    } else {
        format!("{domain}.")
    }
}

fn key(domain: &str) -> String {
    domain.strip_suffix('.').unwrap_or(domain).to_ascii_lowercase()
}
