use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A deceased person whose body has not been claimed. Listing only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct UnclaimedPerson {
    pub tracking_number: String,
    pub date_of_death: Option<NaiveDate>,
    pub age: Option<i32>,
    pub legal_last_name: Option<String>,
    pub legal_first_name: Option<String>,
    pub gender: Option<String>,
    pub current_status: Option<String>,
    pub found_location: Option<String>,
}

impl UnclaimedPerson {
    /// "First Last", or "Unknown" when neither name is recorded.
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.legal_first_name.as_deref(), self.legal_last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            "Unknown".to_string()
        } else {
            parts.join(" ")
        }
    }
}
