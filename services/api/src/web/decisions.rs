//! services/api/src/web/decisions.rs
//!
//! Contains the Axum handler for decision submission and the master
//! definition for the OpenAPI specification.

use axum::{extract::State, http::StatusCode, response::Json, Extension};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error};
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use crate::web::state::AppState;
use decision_mirror_core::domain::{
    Decision, DecisionCategory, DecisionInput, EnrichmentStatus, Preferences,
};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::auth::register_handler,
        crate::web::auth::login_handler,
        submit_decision_handler,
    ),
    components(
        schemas(
            crate::web::auth::RegisterRequest,
            crate::web::auth::LoginRequest,
            crate::web::auth::MessageResponse,
            crate::web::auth::TokenResponse,
            SubmitDecisionRequest,
            SubmitDecisionResponse,
        )
    ),
    tags(
        (name = "Decision Mirror API", description = "API endpoints for authentication and decision analysis.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

/// The payload submitted when a user asks for a decision analysis.
#[derive(Deserialize, ToSchema)]
pub struct SubmitDecisionRequest {
    pub title: String,
    pub description: String,
    #[schema(value_type = String)]
    pub category: DecisionCategory,
    /// Client preferences govern which analysis branch runs; they are
    /// client-owned state, not server configuration.
    #[schema(value_type = Object)]
    pub preferences: Preferences,
}

/// The response payload carrying the analyzed decision.
#[derive(Serialize, ToSchema)]
pub struct SubmitDecisionResponse {
    #[schema(value_type = Object)]
    pub decision: Decision,
    /// True when no API credential is configured, which is when the client
    /// shows its "using sample data" banner. A mere enrichment failure does
    /// not set this.
    pub using_sample_data: bool,
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Submit a decision for analysis.
///
/// The decision is built synchronously with placeholder analysis, then
/// enriched through the analysis service when the preferences call for it.
/// Enrichment failures are swallowed: the placeholders stay and submission
/// still succeeds.
#[utoipa::path(
    post,
    path = "/api/decisions",
    request_body = SubmitDecisionRequest,
    responses(
        (status = 201, description = "Decision analyzed", body = SubmitDecisionResponse),
        (status = 401, description = "Missing or invalid session token"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn submit_decision_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Json(req): Json<SubmitDecisionRequest>,
) -> Result<(StatusCode, Json<SubmitDecisionResponse>), (StatusCode, String)> {
    let preferences = req.preferences;
    let input = DecisionInput {
        title: req.title,
        description: req.description,
        category: req.category,
    };

    // Placeholder decision first; analysis never blocks submission.
    let mut decision = Decision::draft(input.clone(), &preferences);
    debug!(%user_id, decision_id = %decision.id, "decision submitted");

    if decision.enrichment == EnrichmentStatus::Pending {
        match state.analysis.analyze(&input, &preferences).await {
            Ok(analysis) => decision.apply_analysis(&analysis),
            Err(e) => {
                // Swallowed: the caller keeps the placeholder data.
                error!("Analysis enrichment failed: {:?}", e);
                decision.enrichment = EnrichmentStatus::Failed;
            }
        }
    }

    let using_sample_data = preferences.api_credential.is_none();

    Ok((
        StatusCode::CREATED,
        Json(SubmitDecisionResponse {
            decision,
            using_sample_data,
        }),
    ))
}
