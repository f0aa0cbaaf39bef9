//! Error types for the HTTP service.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mailsig::MailsigError;
use mailsig_dns::LookupError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable description of the failure
    pub error: String,
}

/// Errors raised while starting or serving requests.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The request carried no usable `domain` parameter.
    #[error("missing required query parameter 'domain'")]
    MissingDomain,

    /// A token could not be issued.
    #[error("failed to sign token: {0}")]
    Signing(#[source] MailsigError),

    /// A configuration value is out of range.
    #[error("invalid configuration: {reason}")]
    Config {
        /// Description of the problem
        reason: String,
    },

    /// Key loading or signer construction failed.
    #[error(transparent)]
    Core(#[from] MailsigError),

    /// The record source could not be created.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Binding or serving failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    /// HTTP status reported for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingDomain => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (self.status(), body).into_response()
    }
}
