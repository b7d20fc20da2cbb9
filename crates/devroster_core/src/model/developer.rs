//! Developer domain model.
//!
//! # Responsibility
//! - Define the canonical developer record and its status lifecycle.
//! - Provide constructors for transient records and soft-delete helpers.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes once set.
//! - `status` is always one of the two recognized values.
//! - String fields are opaque: no trimming, casing or other normalization.
//!
//! # See also
//! - docs/architecture/data-model.md

use serde::{Deserialize, Serialize};

/// Store-assigned integer identifier for a persisted developer record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type DeveloperId = i64;

/// Roster lifecycle state of a developer record.
///
/// There are exactly two states: `deactivate` marks a record `Deleted`
/// while leaving it in the store, and a separate hard delete removes the
/// row entirely. The same terminal value serves both the soft-delete
/// marker and the conceptual "gone" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Visible in default listings and specialty scans.
    Active,
    /// Soft-deleted: excluded from listings, still retrievable by key.
    Deleted,
}

/// Canonical developer roster record.
///
/// `id = None` marks a transient record that has never been persisted;
/// the store assigns an id on first save and it stays stable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Developer {
    /// Store-assigned id; `None` until the record is first saved.
    pub id: Option<DeveloperId>,
    pub first_name: String,
    pub last_name: String,
    /// Unique across the whole store at creation time. Uniqueness is a
    /// service-level check, not a storage constraint.
    pub email: String,
    /// Free-text filter dimension, matched exactly.
    pub specialty: String,
    pub status: Status,
}

impl Developer {
    /// Creates a transient active record with no id.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        specialty: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            specialty: specialty.into(),
            status: Status::Active,
        }
    }

    /// Marks this record as deactivated.
    ///
    /// The record stays in the store and remains retrievable by id or
    /// email; only default listings stop returning it.
    pub fn deactivate(&mut self) {
        self.status = Status::Deleted;
    }

    /// Returns whether this record appears in default listings.
    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }

    /// Returns whether this record has been assigned a store id.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}
