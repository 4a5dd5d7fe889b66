//! Server-rendered UI components for FindMe pages.

pub mod components;

/// Stylesheet served at `/static/app.css`.
pub const APP_CSS: &str = include_str!("../assets/app.css");

/// Table sorting, filtering and paging, served at `/static/table.js`.
pub const TABLE_JS: &str = include_str!("../assets/table.js");
pub use components::*;
