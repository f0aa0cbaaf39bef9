//! HTTP service for issuing and validating mailsig signatures.
//!
//! Two routes are exposed:
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /sign?domain=<d>` | `{"signature": "<token>"}` |
//! | `GET /validation?domain=<d>` | `{"valid": bool, "signatures": [..] \| null, "outdated": bool}` |
//!
//! A missing or empty `domain` yields `400 {"error": ".."}`. A signing
//! failure yields `500 {"error": ".."}`.
//!
//! The OpenAPI document for both routes is served at `/swagger`, and a
//! Swagger UI at `/swagger-ui` (`/` redirects there).
//!
//! Published windows are fetched through a [`mailsig_dns::RecordSource`],
//! so handlers can be exercised against a
//! [`StaticRecordSource`](mailsig_dns::StaticRecordSource) without DNS.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod config;
mod error;
mod handlers;
mod serve;
mod state;

pub use config::Config;
pub use error::{ErrorResponse, ServerError};
pub use handlers::{
    ApiDoc, DomainQuery, OPENAPI_PATH, SWAGGER_UI_PATH, SignResponse, ValidationResponse, router,
};
pub use serve::run;
pub use state::AppState;
