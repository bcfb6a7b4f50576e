//! Photo API endpoints.

use axum::extract::{Path, State};

use super::{success, ApiResult, Json};
use crate::errors::AppError;
use crate::models::{CreatePhotoRequest, Photo, UpdatePhotoRequest};
use crate::AppState;

/// POST /api/page-photos - Add a photo to a page.
pub async fn create_photo(
    State(state): State<AppState>,
    Json(request): Json<CreatePhotoRequest>,
) -> ApiResult<Photo> {
    success(state.store.create_photo(&request)?)
}

/// PUT /api/page-photos/:id - Update a photo.
pub async fn update_photo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdatePhotoRequest>,
) -> ApiResult<Photo> {
    success(state.store.update_photo(id.as_str(), &request)?)
}

/// DELETE /api/page-photos/:id - Delete a photo.
pub async fn delete_photo(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    if state.store.delete_photo(id.as_str())? {
        success(())
    } else {
        Err(AppError::NotFound(format!("Photo {} not found", id)))
    }
}
