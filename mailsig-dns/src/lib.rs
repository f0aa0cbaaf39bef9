//! DNS TXT record lookup for mailsig signature windows.
//!
//! Domains publish their current (and optionally previous) signature in a
//! TXT record:
//!
//! ```text
//! example.com.  IN TXT  "mailsig:<current>,<previous>"
//! ```
//!
//! This crate fetches those records and hands them to
//! [`mailsig::select_window`]. It provides:
//!
//! - **Trait interface**: [`RecordSource`] for abstracting where records come from
//! - **DNS**: [`DnsRecordSource`] backed by `hickory-resolver`
//! - **In-memory**: [`StaticRecordSource`] for tests and fixed deployments
//!
//! # Quick Start
//!
//! ```rust
//! use mailsig_dns::{RecordSource, StaticRecordSource};
//!
//! let source = StaticRecordSource::new()
//!     .with_records("example.com", ["v=spf1 -all", "mailsig:AAA,BBB"]);
//!
//! let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! let window = runtime.block_on(source.signature_window("example.com")).unwrap();
//!
//! assert_eq!(window.current, "AAA");
//! assert_eq!(window.previous.as_deref(), Some("BBB"));
//! ```
//!
//! # Failure Handling
//!
//! [`RecordSource::txt_records`] reports failures as [`LookupError`].
//! [`RecordSource::signature_window`] treats every failure the same as a
//! domain that publishes nothing: the result is `None`.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod error;
mod source;

pub use error::LookupError;
pub use source::{DnsRecordSource, RecordSource, StaticRecordSource};
