//! Display formatting shared by the page views.

use chrono::{DateTime, NaiveDate, Utc};

pub use shared_types::format_date;

/// `DD/MM/YYYY` for a required date.
pub fn display_date(date: NaiveDate) -> String {
    format_date(Some(date))
}

/// ISO date used as a sort key behind a `DD/MM/YYYY` cell.
pub fn sort_key(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

/// Day a record was filed, `DD/MM/YYYY`.
pub fn display_timestamp(at: DateTime<Utc>) -> String {
    format_date(Some(at.date_naive()))
}

/// Age column text; unknown ages read `N/A`.
pub fn display_age(age: Option<i32>) -> String {
    age.map(|a| a.to_string()).unwrap_or_else(|| "N/A".to_string())
}

/// `/cases/{case_number}`.
pub fn case_href(case_number: &str) -> String {
    format!("/cases/{case_number}")
}
