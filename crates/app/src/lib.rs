//! FindMe web application: server-rendered pages on top of the `server`
//! crate's backends.

pub mod format_helpers;
pub mod render;
pub mod routes;
pub mod tables;

pub use routes::build_router;
