use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored profile role controlling which dashboard a user lands on.
///
/// - `Public` — any registered reporter, and the fallback for unknown values.
/// - `Agent` — law-enforcement agent; may view and update every case.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum UserRole {
    #[default]
    Public,
    Agent,
}

impl UserRole {
    /// Parse the `profiles.role` column. Unknown values default to Public.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "agent" => UserRole::Agent,
            _ => UserRole::Public,
        }
    }

    /// Lowercase string for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Public => "public",
            UserRole::Agent => "agent",
        }
    }

    /// Returns true if this role satisfies the `required` role.
    pub fn satisfies(&self, required: &UserRole) -> bool {
        match self {
            UserRole::Agent => true,
            UserRole::Public => matches!(required, UserRole::Public),
        }
    }

    /// Where a freshly signed-in user with this role is sent.
    pub fn landing_path(&self) -> &'static str {
        match self {
            UserRole::Agent => "/lead",
            UserRole::Public => "/dashboard",
        }
    }
}

/// A row of the `profiles` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Profile {
    pub id: Uuid,
    pub username: Option<String>,
    pub email: String,
    pub role: String,
}

impl Profile {
    pub fn role(&self) -> UserRole {
        UserRole::from_str_or_default(&self.role)
    }

    /// Username when set, otherwise the email address.
    pub fn display_name(&self) -> &str {
        match self.username.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.email,
        }
    }
}

/// The identity returned by a successful sign-in or sign-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}
