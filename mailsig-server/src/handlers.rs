//! HTTP routes.

use axum::extract::{Query, State};
use axum::response::Redirect;
use axum::routing::get;
use axum::{Json, Router};
use mailsig::reconcile;
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use utoipa::{IntoParams, OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ErrorResponse;
use crate::{AppState, ServerError};

/// Path of the generated OpenAPI document.
pub const OPENAPI_PATH: &str = "/swagger";
/// Path of the Swagger UI.
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

/// OpenAPI description of the service.
#[derive(OpenApi)]
#[openapi(
    info(title = "MailSig", version = "1.0"),
    paths(validation, sign),
    components(schemas(ValidationResponse, SignResponse, ErrorResponse))
)]
pub struct ApiDoc;

/// Query string shared by both routes.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DomainQuery {
    /// Domain to sign or validate
    pub domain: Option<String>,
}

impl DomainQuery {
    fn require(self) -> Result<String, ServerError> {
        match self.domain {
            Some(domain) if !domain.trim().is_empty() => Ok(domain),
            _ => Err(ServerError::MissingDomain),
        }
    }
}

/// Body of `GET /validation`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationResponse {
    /// The domain is currently authorized
    pub valid: bool,
    /// Published tokens, or `null` when no record was found
    pub signatures: Option<Vec<String>>,
    /// Authorization rests on the previous token
    pub outdated: bool,
}

/// Body of `GET /sign`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SignResponse {
    /// Freshly issued token
    pub signature: String,
}

/// Builds the service router.
///
/// Besides the API routes, serves the OpenAPI document at [`OPENAPI_PATH`]
/// and the Swagger UI at [`SWAGGER_UI_PATH`], with `/` redirecting to the UI.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/validation", get(validation))
        .route("/sign", get(sign))
        .route("/", get(|| async { Redirect::temporary(SWAGGER_UI_PATH) }))
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_PATH, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Validates the domain against its published signatures.
#[utoipa::path(
    get,
    path = "/validation",
    params(DomainQuery),
    responses(
        (status = 200, description = "Validation result", body = ValidationResponse),
        (status = 400, description = "Missing domain parameter", body = ErrorResponse),
    )
)]
async fn validation(
    State(state): State<AppState>,
    Query(query): Query<DomainQuery>,
) -> Result<Json<ValidationResponse>, ServerError> {
    let domain = query.require()?;
    let window = state.records.signature_window(&domain).await;
    let verdict = reconcile(&state.verifier, &domain, window.as_ref());

    info!(
        domain = %domain,
        valid = verdict.valid,
        outdated = verdict.outdated,
        "validated domain"
    );

    Ok(Json(ValidationResponse {
        valid: verdict.valid,
        signatures: window.map(|w| w.tokens().into_iter().map(str::to_string).collect()),
        outdated: verdict.outdated,
    }))
}

/// Creates a signature for the domain.
#[utoipa::path(
    get,
    path = "/sign",
    params(DomainQuery),
    responses(
        (status = 200, description = "Signature contents", body = SignResponse),
        (status = 400, description = "Missing domain parameter", body = ErrorResponse),
        (status = 500, description = "Signing failed", body = ErrorResponse),
    )
)]
async fn sign(
    State(state): State<AppState>,
    Query(query): Query<DomainQuery>,
) -> Result<Json<SignResponse>, ServerError> {
    let domain = query.require()?;
    let signature = state.signer.sign(&domain).map_err(|e| {
        error!(domain = %domain, error = %e, "signing request failed");
        ServerError::Signing(e)
    })?;

    info!(domain = %domain, "issued signature");
    Ok(Json(SignResponse { signature }))
}
