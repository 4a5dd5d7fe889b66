use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "validation")]
use validator::Validate;

use crate::AppError;

// ── Status ──────────────────────────────────────────────────────────

/// Valid case status values matching the DB CHECK constraint.
pub const CASE_STATUSES: &[&str] = &["pending", "active", "closed"];

/// Lifecycle of a missing-person case. Any state may be overwritten by any
/// other; there is no transition guard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Pending,
    Active,
    Closed,
}

impl CaseStatus {
    pub const ALL: [CaseStatus; 3] = [CaseStatus::Pending, CaseStatus::Active, CaseStatus::Closed];

    /// Parse a stored or submitted status. Case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Some(CaseStatus::Pending),
            "active" => Some(CaseStatus::Active),
            "closed" => Some(CaseStatus::Closed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::Pending => "pending",
            CaseStatus::Active => "active",
            CaseStatus::Closed => "closed",
        }
    }

    /// Human label used in dropdowns.
    pub fn label(&self) -> &'static str {
        match self {
            CaseStatus::Pending => "Pending",
            CaseStatus::Active => "Active",
            CaseStatus::Closed => "Closed",
        }
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── DB row structs ──────────────────────────────────────────────────

/// A full missing-person case record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct MissingPerson {
    pub case_number: String,
    pub legal_first_name: String,
    pub legal_last_name: String,
    pub date_of_birth: NaiveDate,
    pub age: i32,
    pub gender: String,
    pub town_location: String,
    pub date_of_last_contact: NaiveDate,
    pub status: String,
    pub reporter_id: Option<Uuid>,
    pub officer_id: Option<Uuid>,
    pub physical_description: Option<String>,
    pub last_seen_wearing: Option<String>,
    pub medical_conditions: Option<String>,
    pub emergency_contacts: Option<String>,
    pub possible_locations: Option<String>,
    pub circumstances: Option<String>,
    pub reporter_name: Option<String>,
    pub reporter_contact: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl MissingPerson {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.legal_first_name, self.legal_last_name)
    }
}

/// Fixed list projection of a missing-person case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct MissingPersonSummary {
    pub case_number: String,
    pub date_of_last_contact: NaiveDate,
    pub legal_last_name: String,
    pub legal_first_name: String,
    pub age: i32,
    pub gender: String,
    pub town_location: String,
    pub status: String,
    pub officer_id: Option<Uuid>,
    /// Username of the assigned agent, when one is assigned.
    pub officer_username: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl MissingPersonSummary {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.legal_first_name, self.legal_last_name)
    }
}

/// Which rows a list view is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    All,
    /// Cases filed by this user.
    Reporter(Uuid),
    /// Cases assigned to this agent.
    Officer(Uuid),
}

impl ListScope {
    pub fn matches(&self, reporter_id: Option<Uuid>, officer_id: Option<Uuid>) -> bool {
        match self {
            ListScope::All => true,
            ListScope::Reporter(id) => reporter_id == Some(*id),
            ListScope::Officer(id) => officer_id == Some(*id),
        }
    }
}

/// Dashboard counters derived from a list of case statuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseCounts {
    pub total: usize,
    pub active: usize,
    pub closed: usize,
}

impl CaseCounts {
    pub fn tally<'a>(statuses: impl IntoIterator<Item = &'a str>) -> Self {
        let mut counts = CaseCounts::default();
        for status in statuses {
            counts.total += 1;
            match CaseStatus::parse(status) {
                Some(CaseStatus::Active) => counts.active += 1,
                Some(CaseStatus::Closed) => counts.closed += 1,
                _ => {}
            }
        }
        counts
    }
}

/// Prefix of every missing-person case number.
pub const CASE_NUMBER_PREFIX: &str = "MSP";

/// `MSP-YYYY-NNNNN`, e.g. `MSP-2025-00042`.
pub fn format_case_number(year: i32, seq: i64) -> String {
    format!("{CASE_NUMBER_PREFIX}-{year}-{seq:05}")
}

// ── Insert payload ──────────────────────────────────────────────────

/// Column values for a new missing-person row. The store assigns
/// `case_number`, `status` and `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMissingPerson {
    pub legal_first_name: String,
    pub legal_last_name: String,
    pub date_of_birth: NaiveDate,
    pub age: i32,
    pub gender: String,
    pub town_location: String,
    pub date_of_last_contact: NaiveDate,
    pub reporter_id: Uuid,
    pub physical_description: Option<String>,
    pub last_seen_wearing: Option<String>,
    pub medical_conditions: Option<String>,
    pub emergency_contacts: Option<String>,
    pub possible_locations: Option<String>,
    pub circumstances: Option<String>,
    pub reporter_name: Option<String>,
    pub reporter_contact: Option<String>,
    pub photo_url: Option<String>,
}

/// Genders offered by the report form.
pub const GENDERS: &[&str] = &["Male", "Female", "Other"];

/// Text fields of the new-report form, keyed by their HTML input names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct NewReportForm {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Legal first name is required"))
    )]
    pub firstname: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Legal last name is required"))
    )]
    pub lastname: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Date of birth is required"))
    )]
    pub dob: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Gender is required"))
    )]
    pub gender: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Town/location is required"))
    )]
    pub location: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Date of last contact is required"))
    )]
    pub dlc: String,
    pub pydesc: String,
    pub lstwear: String,
    pub medcon: String,
    pub emcont: String,
    pub posloc: String,
    pub circ: String,
    pub reporter_name: String,
    pub reporter_contact: String,
}

impl NewReportForm {
    /// Assign a multipart text field by its input name. Unknown names are ignored.
    /// Required fields are trimmed; free-text answers are kept as typed.
    pub fn set_field(&mut self, name: &str, value: String) {
        match name {
            "firstname" => self.firstname = value.trim().to_string(),
            "lastname" => self.lastname = value.trim().to_string(),
            "dob" => self.dob = value.trim().to_string(),
            "gender" => self.gender = value.trim().to_string(),
            "location" => self.location = value.trim().to_string(),
            "dlc" => self.dlc = value.trim().to_string(),
            "pydesc" => self.pydesc = value,
            "lstwear" => self.lstwear = value,
            "medcon" => self.medcon = value,
            "emcont" => self.emcont = value,
            "posloc" => self.posloc = value,
            "circ" => self.circ = value,
            "reporter_name" => self.reporter_name = value,
            "reporter_contact" => self.reporter_contact = value,
            _ => {}
        }
    }

    /// Parse dates and compute the age. Runs after the presence checks, so
    /// only format and range problems are reported here.
    pub fn parse_dates(&self, today: NaiveDate) -> Result<(NaiveDate, NaiveDate), AppError> {
        let mut field_errors = std::collections::HashMap::new();

        let dob = parse_past_date(&self.dob, today);
        if let Err(msg) = &dob {
            field_errors.insert("dob".to_string(), format!("Date of birth {msg}"));
        }
        let dlc = parse_past_date(&self.dlc, today);
        if let Err(msg) = &dlc {
            field_errors.insert("dlc".to_string(), format!("Date of last contact {msg}"));
        }

        match (dob, dlc) {
            (Ok(dob), Ok(dlc)) if dlc < dob => {
                field_errors.insert(
                    "dlc".to_string(),
                    "Date of last contact cannot be before the date of birth".to_string(),
                );
                Err(AppError::validation("Please correct the highlighted dates", field_errors))
            }
            (Ok(dob), Ok(dlc)) => Ok((dob, dlc)),
            _ => Err(AppError::validation("Please correct the highlighted dates", field_errors)),
        }
    }

    /// Build the row to insert. Empty optional fields become `None`.
    pub fn into_new_record(
        self,
        reporter_id: Uuid,
        photo_url: Option<String>,
        today: NaiveDate,
    ) -> Result<NewMissingPerson, AppError> {
        let (dob, dlc) = self.parse_dates(today)?;
        Ok(NewMissingPerson {
            legal_first_name: self.firstname,
            legal_last_name: self.lastname,
            date_of_birth: dob,
            age: age_on(dob, today),
            gender: self.gender,
            town_location: self.location,
            date_of_last_contact: dlc,
            reporter_id,
            physical_description: non_empty(self.pydesc),
            last_seen_wearing: non_empty(self.lstwear),
            medical_conditions: non_empty(self.medcon),
            emergency_contacts: non_empty(self.emcont),
            possible_locations: non_empty(self.posloc),
            circumstances: non_empty(self.circ),
            reporter_name: non_empty(self.reporter_name),
            reporter_contact: non_empty(self.reporter_contact),
            photo_url,
        })
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

fn parse_past_date(s: &str, today: NaiveDate) -> Result<NaiveDate, &'static str> {
    let date = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| "must be a valid date")?;
    if date > today {
        return Err("cannot be in the future");
    }
    Ok(date)
}

/// Whole years between `dob` and `today`, one less when this year's
/// birthday has not happened yet.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

/// `DD/MM/YYYY`, or `N/A` when the date is absent.
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

// ── Request types ───────────────────────────────────────────────────

/// Request to overwrite the status of a case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateCaseStatusRequest {
    pub status: String,
}
