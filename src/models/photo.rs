//! Photo model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{present, NumberInput};

/// An image attached to a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: i64,
    pub page_id: i64,
    pub photo_url: String,
    pub caption: Option<String>,
    /// `YYYY-MM-DD`
    pub display_date: Option<String>,
    pub display_order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for adding a photo to a page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePhotoRequest {
    #[serde(default)]
    pub page_id: Option<NumberInput>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub display_date: Option<String>,
    /// Omitted appends after the last photo; `0` inserts at the front
    #[serde(default)]
    pub display_order: Option<NumberInput>,
}

/// Request body for updating a photo.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePhotoRequest {
    #[serde(default, deserialize_with = "present")]
    pub photo_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub caption: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub display_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub display_order: Option<NumberInput>,
}

impl Photo {
    /// Presentation order: `display_order`, then `id`.
    pub fn sort_key(&self) -> (i64, i64) {
        (self.display_order, self.id)
    }
}
