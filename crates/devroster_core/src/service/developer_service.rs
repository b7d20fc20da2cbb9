//! Developer roster use-case service.
//!
//! # Responsibility
//! - Enforce the two roster business rules: email uniqueness at create
//!   time and existence checks before every mutation.
//! - Translate repository outcomes into domain-level results.
//!
//! # Invariants
//! - Every operation is single-shot against the store: no retries, no
//!   internal recovery.
//! - Failed operations perform no store mutation; `deactivate` is the
//!   one read-modify-write pair (a lost update between its two calls
//!   loses the status change but corrupts nothing).
//! - Deactivation keeps the record retrievable; only hard delete
//!   removes it.

use crate::model::developer::{Developer, DeveloperId, Status};
use crate::repo::developer_repo::{DeveloperRepository, RepoError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Key that failed to resolve during a lookup or mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    Id(DeveloperId),
    Email(String),
}

impl Display for LookupKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id {id}"),
            Self::Email(email) => write!(f, "email {email}"),
        }
    }
}

/// Domain error surface of the roster service.
#[derive(Debug)]
pub enum ServiceError {
    /// An existing record already holds the given email. Create only.
    DuplicateEmail(String),
    /// The target record does not exist by the given key.
    NotFound(LookupKey),
    /// A transient record was passed where a persisted one is required.
    MissingId,
    /// Persistence-layer failure, propagated as-is.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateEmail(email) => {
                write!(f, "developer with email {email} already exists")
            }
            Self::NotFound(key) => write!(f, "developer with {key} not found"),
            Self::MissingId => write!(f, "developer record has no id"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case service over an injected record store.
///
/// Any `DeveloperRepository` implementation is substitutable; tests
/// inject an in-memory fake.
pub struct DeveloperService<R: DeveloperRepository> {
    repo: R,
}

impl<R: DeveloperRepository> DeveloperService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a transient record after checking email uniqueness.
    ///
    /// # Contract
    /// - Fails with `DuplicateEmail` when any record, active or
    ///   deactivated, already holds the email; nothing is written.
    /// - Returns the persisted record with its store-assigned id.
    ///
    /// The duplicate check and the write are two store calls with no
    /// atomic guard between them; concurrent creates with the same email
    /// can both pass the check. The schema carries no unique constraint
    /// on email.
    pub fn create_developer(&self, developer: &Developer) -> ServiceResult<Developer> {
        if self.repo.find_by_email(&developer.email)?.is_some() {
            return Err(ServiceError::DuplicateEmail(developer.email.clone()));
        }

        let persisted = self.repo.save(developer)?;
        info!(
            "event=developer_created module=service status=ok id={}",
            persisted.id.unwrap_or_default()
        );
        Ok(persisted)
    }

    /// Overwrites an existing record with the given record's fields.
    ///
    /// # Contract
    /// - Fails with `MissingId` for a transient record.
    /// - Fails with `NotFound` when no record has the given id; nothing
    ///   is written.
    /// - Email uniqueness is NOT re-checked, and the supplied status is
    ///   stored as given. Updates are an unchecked escape hatch.
    pub fn update_developer(&self, developer: &Developer) -> ServiceResult<Developer> {
        let id = developer.id.ok_or(ServiceError::MissingId)?;

        if !self.repo.exists_by_id(id)? {
            return Err(ServiceError::NotFound(LookupKey::Id(id)));
        }

        let persisted = self.repo.save(developer)?;
        info!("event=developer_updated module=service status=ok id={id}");
        Ok(persisted)
    }

    /// Fetches one record by id, regardless of its status.
    pub fn get_developer_by_id(&self, id: DeveloperId) -> ServiceResult<Developer> {
        self.repo
            .find_by_id(id)?
            .ok_or(ServiceError::NotFound(LookupKey::Id(id)))
    }

    /// Fetches one record by email, regardless of its status.
    pub fn get_developer_by_email(&self, email: &str) -> ServiceResult<Developer> {
        self.repo
            .find_by_email(email)?
            .ok_or_else(|| ServiceError::NotFound(LookupKey::Email(email.to_string())))
    }

    /// Lists all active records, preserving store order.
    ///
    /// Deactivated records stay in the store but are filtered out of
    /// this view.
    pub fn list_developers(&self) -> ServiceResult<Vec<Developer>> {
        let developers = self.repo.find_all()?;
        Ok(developers
            .into_iter()
            .filter(Developer::is_active)
            .collect())
    }

    /// Lists active records with an exact specialty match.
    ///
    /// The store performs the status/specialty filtering; no partial or
    /// case-insensitive matching.
    pub fn list_active_by_specialty(&self, specialty: &str) -> ServiceResult<Vec<Developer>> {
        Ok(self.repo.find_active_by_specialty(specialty)?)
    }

    /// Sets an existing record's status to `Deleted` and persists it.
    ///
    /// # Contract
    /// - Fails with `NotFound` when no record has the given id.
    /// - Exactly one save; the record is never removed from the store.
    pub fn deactivate_developer(&self, id: DeveloperId) -> ServiceResult<()> {
        let mut developer = self
            .repo
            .find_by_id(id)?
            .ok_or(ServiceError::NotFound(LookupKey::Id(id)))?;

        developer.status = Status::Deleted;
        self.repo.save(&developer)?;
        info!("event=developer_deactivated module=service status=ok id={id}");
        Ok(())
    }

    /// Removes an existing record from the store entirely.
    ///
    /// # Contract
    /// - Fails with `NotFound` when no record has the given id, including
    ///   a repeated delete of the same id.
    /// - Subsequent lookups by that id or its email fail with `NotFound`.
    pub fn delete_developer(&self, id: DeveloperId) -> ServiceResult<()> {
        if self.repo.find_by_id(id)?.is_none() {
            return Err(ServiceError::NotFound(LookupKey::Id(id)));
        }

        self.repo.delete_by_id(id)?;
        info!("event=developer_deleted module=service status=ok id={id}");
        Ok(())
    }
}
