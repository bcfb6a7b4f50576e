//! Explicit seed/reset of the content store.

use serde::{Deserialize, Serialize};

use super::ContentStore;

/// Result of a seed or reset request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SeedOutcome {
    fn completed(force_reset: bool, count: usize) -> Self {
        let message = if force_reset {
            "Pages reset successfully"
        } else {
            "Pages seeded successfully"
        };
        Self {
            success: true,
            message: Some(message.to_string()),
            count: Some(count),
            error: None,
        }
    }

    fn failed(error: String) -> Self {
        Self {
            success: false,
            message: None,
            count: None,
            error: Some(error),
        }
    }
}

/// Seed the store, or wipe it back to defaults when `force_reset` is set.
///
/// Never fails: errors are logged and reported inside the outcome.
pub fn seed_pages(store: &ContentStore, force_reset: bool) -> SeedOutcome {
    match store.ensure_initialized(force_reset) {
        Ok(count) => SeedOutcome::completed(force_reset, count),
        Err(e) => {
            tracing::error!("Error seeding Valentine pages: {}", e);
            SeedOutcome::failed(e.message().to_string())
        }
    }
}
