//! Workflows shared by the HTML pages and the JSON API. Each takes its
//! backends as trait objects so callers decide what is injected.

pub mod auth;
pub mod report;
pub mod status;

pub use auth::*;
pub use report::*;
pub use status::*;
