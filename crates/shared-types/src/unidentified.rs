use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An unidentified person found by the authorities. Listing only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct UnidentifiedPerson {
    pub tracking_number: String,
    pub description: Option<String>,
    pub found_location: Option<String>,
    pub date_found: Option<NaiveDate>,
    pub gender: Option<String>,
    pub current_status: Option<String>,
}
