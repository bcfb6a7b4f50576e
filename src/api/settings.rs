//! Site settings API endpoints.

use axum::extract::State;

use super::{success, ApiResult, Json};
use crate::models::{SiteSettings, UpdateSiteSettingsRequest};
use crate::AppState;

/// GET /api/site-settings - Get the site settings.
pub async fn get_site_settings(State(state): State<AppState>) -> ApiResult<SiteSettings> {
    success(state.store.get_site_settings()?)
}

/// PUT /api/site-settings - Update the site settings.
///
/// A `null` body is an empty update.
pub async fn update_site_settings(
    State(state): State<AppState>,
    Json(request): Json<Option<UpdateSiteSettingsRequest>>,
) -> ApiResult<SiteSettings> {
    success(state.store.update_site_settings(&request.unwrap_or_default())?)
}
