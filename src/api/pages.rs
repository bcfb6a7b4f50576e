//! Page API endpoints.

use axum::extract::{Path, Query, State};
use serde::Serialize;

use super::{success, ApiResult, Json};
use crate::errors::AppError;
use crate::models::{CreatePageRequest, PageQuery, PageView, Photo, UpdatePageRequest};
use crate::AppState;

/// Either the full listing or a single day looked up by `?day=`.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PagesPayload {
    Page(PageView),
    Pages(Vec<PageView>),
}

/// A page with its photos in presentation order.
#[derive(Debug, Serialize)]
pub struct PageDetail {
    pub page: PageView,
    pub photos: Vec<Photo>,
}

/// GET /api/valentine-pages - List all pages, or one by `?day=N`.
pub async fn list_pages(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<PagesPayload> {
    match query.day {
        Some(day) => match state.store.get_page_by_day_number(day.as_str())? {
            Some(page) => success(PagesPayload::Page(page)),
            None => Err(AppError::NotFound("Day not found".to_string())),
        },
        None => success(PagesPayload::Pages(state.store.list_pages()?)),
    }
}

/// GET /api/valentine-pages/:id - Get a page with its photos.
pub async fn get_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<PageDetail> {
    let page = state
        .store
        .get_page_by_id(id.as_str())?
        .ok_or_else(|| AppError::NotFound(format!("Page {} not found", id)))?;
    let photos = state.store.list_photos_for_page(&page.page.id)?;

    success(PageDetail { page, photos })
}

/// GET /api/valentine-pages/:id/photos - List the photos of a page.
pub async fn list_page_photos(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<Photo>> {
    success(state.store.list_photos_for_page(id.as_str())?)
}

/// POST /api/valentine-pages - Create a new page.
pub async fn create_page(
    State(state): State<AppState>,
    Json(request): Json<CreatePageRequest>,
) -> ApiResult<PageView> {
    success(state.store.create_page(&request)?)
}

/// PUT /api/valentine-pages/:id - Update a page.
pub async fn update_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdatePageRequest>,
) -> ApiResult<PageView> {
    success(state.store.update_page(id.as_str(), &request)?)
}

/// DELETE /api/valentine-pages/:id - Delete a page and its photos.
pub async fn delete_page(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    if state.store.delete_page(id.as_str())? {
        success(())
    } else {
        Err(AppError::NotFound(format!("Page {} not found", id)))
    }
}
