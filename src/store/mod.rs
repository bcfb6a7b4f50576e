//! In-memory content store.
//!
//! Holds every page, photo and the settings record behind one mutex. The
//! store seeds itself from [`defaults`] on first access; there is no
//! persistence, so a restart starts over from the seed.

pub mod defaults;
pub mod seed;

use std::sync::Mutex;

use chrono::Utc;

use crate::errors::AppError;
use crate::models::{
    non_blank, normalize_display_date, required_integer, truthy, CreatePageRequest,
    CreatePhotoRequest, NumericArg, Page, PageView, Photo, SiteSettings, UpdatePageRequest,
    UpdatePhotoRequest, UpdateSiteSettingsRequest, DEFAULT_HOME_TITLE, DEFAULT_ROSE_DAY_MESSAGE,
};

pub use seed::{seed_pages, SeedOutcome};

/// The content store shared by all handlers.
pub struct ContentStore {
    state: Mutex<StoreState>,
}

#[derive(Debug)]
struct StoreState {
    initialized: bool,
    /// Kept sorted by `day_number`
    pages: Vec<Page>,
    photos: Vec<Photo>,
    settings: SiteSettings,
    next_page_id: i64,
    next_photo_id: i64,
}

impl Default for ContentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentStore {
    /// Create an empty store. It is seeded on first use.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StoreState {
                initialized: false,
                pages: Vec::new(),
                photos: Vec::new(),
                settings: defaults::default_site_settings(),
                next_page_id: 1,
                next_photo_id: 1,
            }),
        }
    }

    /// Seed the store if it has not been, or unconditionally when `force_reset`.
    ///
    /// Returns the resulting number of pages. A forced reset replaces the
    /// whole state, so it also recovers a lock poisoned by an earlier panic.
    pub fn ensure_initialized(&self, force_reset: bool) -> Result<usize, AppError> {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) if force_reset => {
                tracing::warn!("Content store lock was poisoned, resetting");
                self.state.clear_poison();
                poisoned.into_inner()
            }
            Err(e) => return Err(e.into()),
        };
        state.ensure_initialized(force_reset);
        Ok(state.pages.len())
    }

    /// Lock, make sure the seed is in place, and run `f` against the state.
    fn with_state<R>(
        &self,
        f: impl FnOnce(&mut StoreState) -> Result<R, AppError>,
    ) -> Result<R, AppError> {
        let mut state = self.state.lock()?;
        state.ensure_initialized(false);
        f(&mut state)
    }

    // ==================== PAGE OPERATIONS ====================

    /// List all pages ordered by day number.
    pub fn list_pages(&self) -> Result<Vec<PageView>, AppError> {
        self.with_state(|state| Ok(state.pages.iter().map(|p| state.decorate(p)).collect()))
    }

    /// Get a page by ID.
    pub fn get_page_by_id<I: NumericArg + ?Sized>(
        &self,
        id: &I,
    ) -> Result<Option<PageView>, AppError> {
        let id = id.to_integer("page id")?;
        self.with_state(|state| {
            Ok(state
                .pages
                .iter()
                .find(|p| p.id == id)
                .map(|p| state.decorate(p)))
        })
    }

    /// Get a page by its day number.
    pub fn get_page_by_day_number<I: NumericArg + ?Sized>(
        &self,
        day: &I,
    ) -> Result<Option<PageView>, AppError> {
        let day = day.to_integer("day number")?;
        self.with_state(|state| {
            Ok(state
                .pages
                .iter()
                .find(|p| p.day_number == day)
                .map(|p| state.decorate(p)))
        })
    }

    /// Create a new page.
    pub fn create_page(&self, request: &CreatePageRequest) -> Result<PageView, AppError> {
        let day_number = required_integer(request.day_number.as_ref(), "day number")?;

        self.with_state(|state| {
            if state.pages.iter().any(|p| p.day_number == day_number) {
                return Err(AppError::Conflict(
                    "A page already exists for that day".to_string(),
                ));
            }

            let now = Utc::now();
            let page = Page {
                id: state.next_page_id,
                day_number,
                title: non_blank(request.title.as_deref())
                    .unwrap_or_else(|| format!("Day {}", day_number)),
                subtitle: non_blank(request.subtitle.as_deref()),
                is_locked: matches!(request.is_locked, Some(serde_json::Value::Bool(true))),
                music_url: non_blank(request.music_url.as_deref()),
                created_at: now,
                updated_at: now,
            };
            state.next_page_id += 1;

            tracing::info!(page_id = page.id, day_number, "Created page");
            state.pages.push(page.clone());
            state.sort_pages();
            Ok(state.decorate(&page))
        })
    }

    /// Update a page. Absent fields are preserved.
    pub fn update_page<I: NumericArg + ?Sized>(
        &self,
        id: &I,
        request: &UpdatePageRequest,
    ) -> Result<PageView, AppError> {
        let id = id.to_integer("page id")?;
        let requested_day = request
            .day_number
            .as_ref()
            .map(|d| d.to_integer("day number"))
            .transpose()?;

        self.with_state(|state| {
            let index = state
                .pages
                .iter()
                .position(|p| p.id == id)
                .ok_or_else(|| AppError::NotFound("Page not found".to_string()))?;
            let current = &state.pages[index];
            let day_number = requested_day.unwrap_or(current.day_number);

            if state
                .pages
                .iter()
                .any(|p| p.id != id && p.day_number == day_number)
            {
                return Err(AppError::Conflict(
                    "Another page already uses that day number".to_string(),
                ));
            }

            let updated = Page {
                id,
                day_number,
                title: match &request.title {
                    Some(title) => {
                        non_blank(title.as_deref()).unwrap_or_else(|| current.title.clone())
                    }
                    None => current.title.clone(),
                },
                subtitle: match &request.subtitle {
                    Some(subtitle) => non_blank(subtitle.as_deref()),
                    None => current.subtitle.clone(),
                },
                is_locked: request
                    .is_locked
                    .as_ref()
                    .map(truthy)
                    .unwrap_or(current.is_locked),
                music_url: match &request.music_url {
                    Some(url) => non_blank(url.as_deref()),
                    None => current.music_url.clone(),
                },
                created_at: current.created_at,
                updated_at: Utc::now(),
            };

            tracing::debug!(page_id = id, day_number, "Updated page");
            state.pages[index] = updated.clone();
            state.sort_pages();
            Ok(state.decorate(&updated))
        })
    }

    /// Delete a page and every photo on it. Returns `false` if there was no such page.
    pub fn delete_page<I: NumericArg + ?Sized>(&self, id: &I) -> Result<bool, AppError> {
        let id = id.to_integer("page id")?;

        self.with_state(|state| {
            let before = state.pages.len();
            state.pages.retain(|p| p.id != id);
            if state.pages.len() == before {
                return Ok(false);
            }

            let photos_before = state.photos.len();
            state.photos.retain(|photo| photo.page_id != id);
            tracing::info!(
                page_id = id,
                photos_removed = photos_before - state.photos.len(),
                "Deleted page"
            );
            Ok(true)
        })
    }

    // ==================== PHOTO OPERATIONS ====================

    /// List the photos of a page in presentation order.
    pub fn list_photos_for_page<I: NumericArg + ?Sized>(
        &self,
        page_id: &I,
    ) -> Result<Vec<Photo>, AppError> {
        let page_id = page_id.to_integer("page id")?;
        self.with_state(|state| Ok(state.photos_for_page(page_id)))
    }

    /// Add a photo to a page.
    ///
    /// Without a `display_order` the photo goes after the last one on the page.
    /// An explicit `0` shifts every existing photo on the page down by one.
    pub fn create_photo(&self, request: &CreatePhotoRequest) -> Result<Photo, AppError> {
        let page_id = required_integer(request.page_id.as_ref(), "page id")?;
        let requested_order = request
            .display_order
            .as_ref()
            .map(|o| o.to_integer("display order"))
            .transpose()?;

        self.with_state(|state| {
            if !state.pages.iter().any(|p| p.id == page_id) {
                return Err(AppError::NotFound("Page not found".to_string()));
            }
            let photo_url = non_blank(request.photo_url.as_deref())
                .ok_or_else(|| AppError::InvalidArgument("Photo URL is required".to_string()))?;
            let display_date = normalize_display_date(request.display_date.as_deref())?;

            let display_order = match requested_order {
                Some(order) => order,
                None => state
                    .photos
                    .iter()
                    .filter(|photo| photo.page_id == page_id)
                    .map(|photo| photo.display_order)
                    .max()
                    .map_or(Some(0), |max| max.checked_add(1))
                    .ok_or_else(order_out_of_range)?,
            };

            let now = Utc::now();
            if display_order == 0 {
                state.shift_orders(page_id, None)?;
            }

            let photo = Photo {
                id: state.next_photo_id,
                page_id,
                photo_url,
                caption: non_blank(request.caption.as_deref()),
                display_date,
                display_order,
                created_at: now,
                updated_at: now,
            };
            state.next_photo_id += 1;

            tracing::debug!(photo_id = photo.id, page_id, display_order, "Created photo");
            state.photos.push(photo.clone());
            Ok(photo)
        })
    }

    /// Update a photo. Absent fields are preserved.
    pub fn update_photo<I: NumericArg + ?Sized>(
        &self,
        id: &I,
        request: &UpdatePhotoRequest,
    ) -> Result<Photo, AppError> {
        let id = id.to_integer("photo id")?;
        let requested_order = request
            .display_order
            .as_ref()
            .map(|o| o.to_integer("display order"))
            .transpose()?;
        let requested_date = request
            .display_date
            .as_ref()
            .map(|date| normalize_display_date(date.as_deref()))
            .transpose()?;

        self.with_state(|state| {
            let index = state
                .photos
                .iter()
                .position(|photo| photo.id == id)
                .ok_or_else(|| AppError::NotFound("Photo not found".to_string()))?;

            if requested_order == Some(0) {
                let page_id = state.photos[index].page_id;
                state.shift_orders(page_id, Some(id))?;
            }

            let current = &state.photos[index];
            let updated = Photo {
                id,
                page_id: current.page_id,
                photo_url: match &request.photo_url {
                    Some(url) => {
                        non_blank(url.as_deref()).unwrap_or_else(|| current.photo_url.clone())
                    }
                    None => current.photo_url.clone(),
                },
                caption: match &request.caption {
                    Some(caption) => non_blank(caption.as_deref()),
                    None => current.caption.clone(),
                },
                display_date: requested_date.unwrap_or_else(|| current.display_date.clone()),
                display_order: requested_order.unwrap_or(current.display_order),
                created_at: current.created_at,
                updated_at: Utc::now(),
            };

            state.photos[index] = updated.clone();
            Ok(updated)
        })
    }

    /// Delete a photo. Remaining photos keep their display order.
    pub fn delete_photo<I: NumericArg + ?Sized>(&self, id: &I) -> Result<bool, AppError> {
        let id = id.to_integer("photo id")?;

        self.with_state(|state| {
            let before = state.photos.len();
            state.photos.retain(|photo| photo.id != id);
            Ok(state.photos.len() < before)
        })
    }

    // ==================== SETTINGS OPERATIONS ====================

    pub fn get_site_settings(&self) -> Result<SiteSettings, AppError> {
        self.with_state(|state| Ok(state.settings.clone()))
    }

    /// Apply the fields present in `request` to the settings record.
    pub fn update_site_settings(
        &self,
        request: &UpdateSiteSettingsRequest,
    ) -> Result<SiteSettings, AppError> {
        self.with_state(|state| {
            let settings = &mut state.settings;

            let optional_urls = [
                (&request.home_background_url, &mut settings.home_background_url),
                (&request.kukku_profile_url, &mut settings.kukku_profile_url),
                (&request.jello_profile_url, &mut settings.jello_profile_url),
                (&request.home_music_url, &mut settings.home_music_url),
            ];
            for (update, field) in optional_urls {
                if let Some(value) = update {
                    *field = non_blank(value.as_deref());
                }
            }

            if let Some(title) = &request.home_title {
                settings.home_title =
                    non_blank(title.as_deref()).unwrap_or_else(|| DEFAULT_HOME_TITLE.to_string());
            }
            if let Some(message) = &request.rose_day_message {
                settings.rose_day_message = non_blank(message.as_deref())
                    .unwrap_or_else(|| DEFAULT_ROSE_DAY_MESSAGE.to_string());
            }

            Ok(settings.clone())
        })
    }
}

impl StoreState {
    fn ensure_initialized(&mut self, force_reset: bool) {
        if self.initialized && !force_reset {
            return;
        }

        let now = Utc::now();
        self.pages = defaults::DEFAULT_PAGES
            .iter()
            .zip(1..)
            .map(|(template, id)| Page {
                id,
                day_number: template.day_number,
                title: template.title.to_string(),
                subtitle: Some(template.subtitle.to_string()),
                is_locked: false,
                music_url: None,
                created_at: now,
                updated_at: now,
            })
            .collect();
        self.sort_pages();

        self.photos = defaults::DEFAULT_PHOTO_URLS
            .iter()
            .zip(1..)
            .map(|(url, id)| Photo {
                id,
                page_id: id,
                photo_url: url.to_string(),
                caption: Some(format!("Memory for day {}", id)),
                display_date: None,
                display_order: 0,
                created_at: now,
                updated_at: now,
            })
            .collect();

        self.next_page_id = self.pages.len() as i64 + 1;
        self.next_photo_id = self.photos.len() as i64 + 1;
        self.settings = defaults::default_site_settings();

        if self.initialized {
            tracing::info!(pages = self.pages.len(), "Content store reset to defaults");
        } else {
            tracing::info!(pages = self.pages.len(), "Content store seeded");
        }
        self.initialized = true;
    }

    fn sort_pages(&mut self) {
        self.pages.sort_by_key(|p| p.day_number);
    }

    fn photos_for_page(&self, page_id: i64) -> Vec<Photo> {
        let mut photos: Vec<Photo> = self
            .photos
            .iter()
            .filter(|photo| photo.page_id == page_id)
            .cloned()
            .collect();
        photos.sort_by_key(Photo::sort_key);
        photos
    }

    /// Push every photo on `page_id` (except `skip`) one slot back.
    ///
    /// Nothing moves unless every photo can move.
    fn shift_orders(&mut self, page_id: i64, skip: Option<i64>) -> Result<(), AppError> {
        let shifted = |photo: &Photo| photo.page_id == page_id && Some(photo.id) != skip;

        if self
            .photos
            .iter()
            .filter(|photo| shifted(photo))
            .any(|photo| photo.display_order.checked_add(1).is_none())
        {
            return Err(order_out_of_range());
        }

        let now = Utc::now();
        for photo in self.photos.iter_mut().filter(|photo| shifted(photo)) {
            photo.display_order += 1;
            photo.updated_at = now;
        }
        Ok(())
    }

    fn decorate(&self, page: &Page) -> PageView {
        let cover = self
            .photos
            .iter()
            .filter(|photo| photo.page_id == page.id)
            .min_by_key(|photo| photo.sort_key());
        PageView {
            page: page.clone(),
            cover_photo_url: cover.map(|photo| photo.photo_url.clone()),
            photo_count: self
                .photos
                .iter()
                .filter(|photo| photo.page_id == page.id)
                .count(),
        }
    }
}

fn order_out_of_range() -> AppError {
    AppError::InvalidArgument("Display order out of range".to_string())
}
