//! Day page model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{present, NumberInput};

/// One day of the week, as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: i64,
    pub day_number: i64,
    pub title: String,
    pub subtitle: Option<String>,
    pub is_locked: bool,
    pub music_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A page together with the fields derived from its photos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageView {
    #[serde(flatten)]
    pub page: Page,
    /// URL of the first photo by display order
    pub cover_photo_url: Option<String>,
    pub photo_count: usize,
}

/// Request body for creating a new page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePageRequest {
    #[serde(default)]
    pub day_number: Option<NumberInput>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    /// Only an explicit `true` locks the new page
    #[serde(default)]
    pub is_locked: Option<Value>,
    #[serde(default)]
    pub music_url: Option<String>,
}

/// Request body for updating an existing page.
///
/// Outer `None` means the field was absent and is preserved.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePageRequest {
    #[serde(default, deserialize_with = "present")]
    pub day_number: Option<NumberInput>,
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub subtitle: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub is_locked: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub music_url: Option<Option<String>>,
}

/// Query string accepted by the page listing.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Look a single page up by day number instead of listing
    pub day: Option<String>,
}
