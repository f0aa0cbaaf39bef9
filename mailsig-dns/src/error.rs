//! Error types for record lookups.

use thiserror::Error;

/// Errors that can occur while fetching TXT records.
///
/// [`RecordSource::signature_window`](crate::RecordSource::signature_window)
/// folds all of these into "no window published".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The resolver could not be constructed.
    #[error("failed to create resolver: {reason}")]
    Resolver {
        /// Description of the resolver error
        reason: String,
    },
    /// The TXT query failed (NXDOMAIN, SERVFAIL, timeout, ...).
    #[error("TXT lookup for '{domain}' failed: {reason}")]
    Query {
        /// The queried domain
        domain: String,
        /// Description of the query failure
        reason: String,
    },
    /// The domain has no TXT records.
    #[error("no TXT records for '{domain}'")]
    NoRecords {
        /// The queried domain
        domain: String,
    },
}
