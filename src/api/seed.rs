//! Seed API endpoint.

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::store::{seed_pages as run_seed, SeedOutcome};
use crate::AppState;

/// Optional body of a seed request.
#[derive(Debug, Default, Deserialize)]
struct SeedRequest {
    #[serde(default, rename = "forceReset", alias = "force_reset")]
    force_reset: bool,
}

/// POST /api/seed-pages - Seed the store, or reset it with `{"forceReset": true}`.
///
/// A missing or unreadable body means a plain seed.
pub async fn seed_pages(
    State(state): State<AppState>,
    body: Bytes,
) -> (StatusCode, Json<SeedOutcome>) {
    let force_reset = serde_json::from_slice::<SeedRequest>(&body)
        .map(|request| request.force_reset)
        .unwrap_or(false);

    let outcome = run_seed(&state.store, force_reset);
    let status = if outcome.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(outcome))
}
