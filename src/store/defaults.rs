//! Seed content for a fresh store.

use crate::models::{SiteSettings, DEFAULT_HOME_TITLE, DEFAULT_ROSE_DAY_MESSAGE};

/// Static description of a seeded page.
#[derive(Debug, Clone, Copy)]
pub struct PageTemplate {
    pub day_number: i64,
    pub title: &'static str,
    pub subtitle: &'static str,
}

pub const DEFAULT_PAGES: [PageTemplate; 7] = [
    PageTemplate {
        day_number: 1,
        title: "Rose Day",
        subtitle: "A flower for every memory",
    },
    PageTemplate {
        day_number: 2,
        title: "Propose Day",
        subtitle: "The yes that changed everything",
    },
    PageTemplate {
        day_number: 3,
        title: "Chocolate Day",
        subtitle: "Sweet moments, sweeter smiles",
    },
    PageTemplate {
        day_number: 4,
        title: "Teddy Day",
        subtitle: "Comfort in every hug",
    },
    PageTemplate {
        day_number: 5,
        title: "Promise Day",
        subtitle: "Choosing each other every day",
    },
    PageTemplate {
        day_number: 6,
        title: "Hug Day",
        subtitle: "Close hearts, quiet joy",
    },
    PageTemplate {
        day_number: 7,
        title: "Kiss Day",
        subtitle: "A soft ending to a beautiful week",
    },
];

/// One cover photo per seeded page, in page order.
pub const DEFAULT_PHOTO_URLS: [&str; 7] = [
    "https://images.unsplash.com/photo-1516589091380-5d601f4f5e8f?auto=format&fit=crop&w=1600&q=80",
    "https://images.unsplash.com/photo-1518199266791-5375a83190b7?auto=format&fit=crop&w=1600&q=80",
    "https://images.unsplash.com/photo-1459257868276-5e65389e2722?auto=format&fit=crop&w=1600&q=80",
    "https://images.unsplash.com/photo-1511988617509-a57c8a288659?auto=format&fit=crop&w=1600&q=80",
    "https://images.unsplash.com/photo-1517263904808-5dc91e3e7044?auto=format&fit=crop&w=1600&q=80",
    "https://images.unsplash.com/photo-1518623489648-a173ef7824f3?auto=format&fit=crop&w=1600&q=80",
    "https://images.unsplash.com/photo-1518895949257-7621c3c786d7?auto=format&fit=crop&w=1600&q=80",
];

pub fn default_site_settings() -> SiteSettings {
    SiteSettings {
        home_background_url: Some(
            "https://images.unsplash.com/photo-1518895949257-7621c3c786d7?auto=format&fit=crop&w=1920&q=80"
                .to_string(),
        ),
        kukku_profile_url: Some(
            "https://images.unsplash.com/photo-1517841905240-472988babdf9?auto=format&fit=crop&w=500&q=80"
                .to_string(),
        ),
        jello_profile_url: Some(
            "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?auto=format&fit=crop&w=500&q=80"
                .to_string(),
        ),
        home_music_url: None,
        home_title: DEFAULT_HOME_TITLE.to_string(),
        rose_day_message: DEFAULT_ROSE_DAY_MESSAGE.to_string(),
    }
}
