//! Data models for the Valentine Week site.
//!
//! Field names stay snake_case on the wire, matching what the site's pages read.

mod input;
mod page;
mod photo;
mod settings;

pub use input::*;
pub use page::*;
pub use photo::*;
pub use settings::*;
