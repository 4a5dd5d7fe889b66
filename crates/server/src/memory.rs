//! In-memory backend. Used by the dev server when no `DATABASE_URL` is set
//! and by the integration tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use shared_types::{
    format_case_number, AppError, AuthUser, CaseStatus, ListScope, MissingPerson,
    MissingPersonSummary, NewMissingPerson, Profile, UnclaimedPerson, UnidentifiedPerson, UserRole,
};
use uuid::Uuid;

use crate::auth::password::{
    check_credentials, hash_password, hash_password_blocking, StoredCredentials,
};
use crate::store::{AuthService, CaseStore};

struct Account {
    profile: Profile,
    password_hash: String,
}

#[derive(Default)]
struct Tables {
    missing: Vec<MissingPerson>,
    unidentified: Vec<UnidentifiedPerson>,
    unclaimed: Vec<UnclaimedPerson>,
    accounts: Vec<Account>,
    /// Last case number issued, per year.
    case_seq: HashMap<i32, i64>,
}

impl Tables {
    fn summary(&self, row: &MissingPerson) -> MissingPersonSummary {
        let officer_username = row.officer_id.and_then(|id| {
            self.accounts
                .iter()
                .find(|a| a.profile.id == id)
                .and_then(|a| a.profile.username.clone())
        });
        MissingPersonSummary {
            case_number: row.case_number.clone(),
            date_of_last_contact: row.date_of_last_contact,
            legal_last_name: row.legal_last_name.clone(),
            legal_first_name: row.legal_first_name.clone(),
            age: row.age,
            gender: row.gender.clone(),
            town_location: row.town_location.clone(),
            status: row.status.clone(),
            officer_id: row.officer_id,
            officer_username,
            created_at: row.created_at,
        }
    }

    fn missing_mut(&mut self, case_number: &str) -> Option<&mut MissingPerson> {
        self.missing.iter_mut().find(|m| m.case_number == case_number)
    }
}

/// Case store and auth service held in process memory.
#[derive(Default)]
pub struct MemoryBackend {
    tables: Mutex<Tables>,
    unavailable: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, AppError> {
        self.tables
            .lock()
            .map_err(|_| AppError::database("memory store poisoned"))
    }

    /// Case tables, or an error while the store is marked unavailable.
    fn case_tables(&self) -> Result<MutexGuard<'_, Tables>, AppError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::database("memory store unavailable"));
        }
        self.tables()
    }

    /// Make every case operation fail until switched back.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Create an account with the given role.
    pub fn seed_account(
        &self,
        username: &str,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> Result<AuthUser, AppError> {
        self.insert_account(username, email, hash_password(password)?, role)
    }

    fn insert_account(
        &self,
        username: &str,
        email: &str,
        password_hash: String,
        role: UserRole,
    ) -> Result<AuthUser, AppError> {
        let mut tables = self.tables()?;
        let email = email.trim().to_lowercase();

        if tables.accounts.iter().any(|a| a.profile.email == email) {
            return Err(AppError::conflict("An account with this email already exists"));
        }
        if tables
            .accounts
            .iter()
            .any(|a| a.profile.username.as_deref() == Some(username))
        {
            return Err(AppError::conflict("This username is already taken"));
        }

        let profile = Profile {
            id: Uuid::new_v4(),
            username: Some(username.to_string()),
            email: email.clone(),
            role: role.as_str().to_string(),
        };
        let user = AuthUser {
            id: profile.id,
            email,
        };
        tables.accounts.push(Account {
            profile,
            password_hash,
        });
        Ok(user)
    }

    /// Remove a profile while keeping sessions that reference it valid.
    pub fn remove_profile(&self, user_id: Uuid) {
        if let Ok(mut tables) = self.tables() {
            tables.accounts.retain(|a| a.profile.id != user_id);
        }
    }

    pub fn seed_unidentified(&self, row: UnidentifiedPerson) {
        if let Ok(mut tables) = self.tables() {
            tables.unidentified.push(row);
        }
    }

    pub fn seed_unclaimed(&self, row: UnclaimedPerson) {
        if let Ok(mut tables) = self.tables() {
            tables.unclaimed.push(row);
        }
    }

    pub fn missing_count(&self) -> usize {
        self.tables().map(|t| t.missing.len()).unwrap_or(0)
    }

    /// Insert a report as if filed at `now`. Numbering restarts at 1 each year.
    pub fn insert_missing_at(
        &self,
        record: NewMissingPerson,
        now: DateTime<Utc>,
    ) -> Result<MissingPerson, AppError> {
        let mut tables = self.case_tables()?;
        let seq = {
            let last = tables.case_seq.entry(now.year()).or_insert(0);
            *last += 1;
            *last
        };

        let row = MissingPerson {
            case_number: format_case_number(now.year(), seq),
            legal_first_name: record.legal_first_name,
            legal_last_name: record.legal_last_name,
            date_of_birth: record.date_of_birth,
            age: record.age,
            gender: record.gender,
            town_location: record.town_location,
            date_of_last_contact: record.date_of_last_contact,
            status: CaseStatus::Pending.as_str().to_string(),
            reporter_id: Some(record.reporter_id),
            officer_id: None,
            physical_description: record.physical_description,
            last_seen_wearing: record.last_seen_wearing,
            medical_conditions: record.medical_conditions,
            emergency_contacts: record.emergency_contacts,
            possible_locations: record.possible_locations,
            circumstances: record.circumstances,
            reporter_name: record.reporter_name,
            reporter_contact: record.reporter_contact,
            photo_url: record.photo_url,
            created_at: now,
        };
        tables.missing.push(row.clone());
        Ok(row)
    }
}

#[async_trait]
impl CaseStore for MemoryBackend {
    async fn insert_missing(&self, record: NewMissingPerson) -> Result<MissingPerson, AppError> {
        self.insert_missing_at(record, Utc::now())
    }

    async fn find_missing(&self, case_number: &str) -> Result<Option<MissingPerson>, AppError> {
        let tables = self.case_tables()?;
        Ok(tables
            .missing
            .iter()
            .find(|m| m.case_number == case_number)
            .cloned())
    }

    async fn list_missing(&self, scope: ListScope) -> Result<Vec<MissingPersonSummary>, AppError> {
        let tables = self.case_tables()?;
        // Insertion order is creation order; newest first.
        Ok(tables
            .missing
            .iter()
            .rev()
            .filter(|m| scope.matches(m.reporter_id, m.officer_id))
            .map(|m| tables.summary(m))
            .collect())
    }

    async fn update_missing_status(
        &self,
        case_number: &str,
        status: CaseStatus,
    ) -> Result<Option<MissingPerson>, AppError> {
        let mut tables = self.case_tables()?;
        Ok(tables.missing_mut(case_number).map(|row| {
            row.status = status.as_str().to_string();
            row.clone()
        }))
    }

    async fn assign_officer(
        &self,
        case_number: &str,
        officer_id: Uuid,
    ) -> Result<Option<MissingPerson>, AppError> {
        let mut tables = self.case_tables()?;
        Ok(tables.missing_mut(case_number).map(|row| {
            if row.officer_id.is_none() {
                row.officer_id = Some(officer_id);
                if CaseStatus::parse(&row.status) == Some(CaseStatus::Pending) {
                    row.status = CaseStatus::Active.as_str().to_string();
                }
            }
            row.clone()
        }))
    }

    async fn list_unidentified(&self) -> Result<Vec<UnidentifiedPerson>, AppError> {
        Ok(self.case_tables()?.unidentified.clone())
    }

    async fn list_unclaimed(&self) -> Result<Vec<UnclaimedPerson>, AppError> {
        Ok(self.case_tables()?.unclaimed.clone())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.case_tables().map(|_| ())
    }
}

#[async_trait]
impl AuthService for MemoryBackend {
    async fn sign_up(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, AppError> {
        let password_hash = hash_password_blocking(password.to_string()).await?;
        self.insert_account(username, email, password_hash, UserRole::Public)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AppError> {
        let email = email.trim().to_lowercase();
        let found = {
            let tables = self.tables()?;
            tables
                .accounts
                .iter()
                .find(|a| a.profile.email == email)
                .map(|a| StoredCredentials {
                    id: a.profile.id,
                    email: a.profile.email.clone(),
                    password_hash: a.password_hash.clone(),
                })
        };
        check_credentials(found, password.to_string()).await
    }

    async fn find_profile(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        let tables = self.tables()?;
        Ok(tables
            .accounts
            .iter()
            .find(|a| a.profile.id == user_id)
            .map(|a| a.profile.clone()))
    }
}
