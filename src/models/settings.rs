//! Site-wide settings model.

use serde::{Deserialize, Serialize};

use super::present;

/// Fallback for a cleared home title.
pub const DEFAULT_HOME_TITLE: &str = "We are here Together";

/// Fallback for a cleared reveal message.
pub const DEFAULT_ROSE_DAY_MESSAGE: &str = "Every petal opens for a memory with you.";

/// The singleton settings record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSettings {
    pub home_background_url: Option<String>,
    pub kukku_profile_url: Option<String>,
    pub jello_profile_url: Option<String>,
    pub home_music_url: Option<String>,
    pub home_title: String,
    /// Message shown by the reveal widget
    pub rose_day_message: String,
}

/// Request body for updating settings. Only present fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSiteSettingsRequest {
    #[serde(default, deserialize_with = "present")]
    pub home_background_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub kukku_profile_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub jello_profile_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub home_music_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub home_title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub rose_day_message: Option<Option<String>>,
}
