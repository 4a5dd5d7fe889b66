pub mod cookies;
pub mod extractors;
pub mod gate;
pub mod middleware;
pub mod password;
pub mod session;

/// Where unauthenticated visitors of a protected page are sent.
pub const LOGIN_PATH: &str = "/login";

/// Where signed-in non-agents are sent when they open an agent page.
pub const UNAUTHORIZED_PATH: &str = "/lead/unauthorized";
