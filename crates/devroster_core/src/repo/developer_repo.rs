//! Developer repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the record store operations the roster service consumes.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `save` on a transient record assigns a fresh id; `save` on a
//!   persisted record overwrites the row with that id (upsert).
//! - Rows with an unrecognized `status` value fail reads as invalid
//!   persisted data.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::db::DbError;
use crate::model::developer::{Developer, DeveloperId, Status};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DEVELOPER_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    email,
    specialty,
    status
FROM developers";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for developer persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted developer data: {message}")
            }
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing; run migrations first")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Record store contract consumed by the roster service.
///
/// Any implementation honoring these operations is substitutable; tests
/// use an in-memory fake in place of SQLite.
pub trait DeveloperRepository {
    /// Point lookup by store-assigned id.
    fn find_by_id(&self, id: DeveloperId) -> RepoResult<Option<Developer>>;
    /// Point lookup by email. Email is assumed unique by construction;
    /// with multiple matches the result is implementation-defined.
    fn find_by_email(&self, email: &str) -> RepoResult<Option<Developer>>;
    fn exists_by_id(&self, id: DeveloperId) -> RepoResult<bool>;
    /// Every persisted record regardless of status, in store order.
    fn find_all(&self) -> RepoResult<Vec<Developer>>;
    /// Records with `status = Active` and an exact specialty match.
    fn find_active_by_specialty(&self, specialty: &str) -> RepoResult<Vec<Developer>>;
    /// Persists the record: assigns a fresh id when transient, overwrites
    /// the row with the same id otherwise. Returns the persisted record
    /// with its id populated.
    fn save(&self, developer: &Developer) -> RepoResult<Developer>;
    /// Removes the row with that id. Benign no-op when absent.
    fn delete_by_id(&self, id: DeveloperId) -> RepoResult<()>;
}

/// SQLite-backed developer repository.
#[derive(Debug)]
pub struct SqliteDeveloperRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDeveloperRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        if !table_exists(conn, "developers")? {
            return Err(RepoError::MissingRequiredTable("developers"));
        }
        Ok(Self { conn })
    }
}

impl DeveloperRepository for SqliteDeveloperRepository<'_> {
    fn find_by_id(&self, id: DeveloperId) -> RepoResult<Option<Developer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DEVELOPER_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_developer_row(row)?));
        }

        Ok(None)
    }

    fn find_by_email(&self, email: &str) -> RepoResult<Option<Developer>> {
        // Email uniqueness is checked, not constrained; if the check was
        // ever raced the oldest row wins here.
        let mut stmt = self.conn.prepare(&format!(
            "{DEVELOPER_SELECT_SQL} WHERE email = ?1 ORDER BY id ASC LIMIT 1;"
        ))?;

        let mut rows = stmt.query(params![email])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_developer_row(row)?));
        }

        Ok(None)
    }

    fn exists_by_id(&self, id: DeveloperId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM developers WHERE id = ?1);",
            params![id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn find_all(&self) -> RepoResult<Vec<Developer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DEVELOPER_SELECT_SQL} ORDER BY id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut developers = Vec::new();
        while let Some(row) = rows.next()? {
            developers.push(parse_developer_row(row)?);
        }

        Ok(developers)
    }

    fn find_active_by_specialty(&self, specialty: &str) -> RepoResult<Vec<Developer>> {
        let mut stmt = self.conn.prepare(&format!(
            "{DEVELOPER_SELECT_SQL}
             WHERE specialty = ?1
               AND status = ?2
             ORDER BY id ASC;"
        ))?;

        let mut rows = stmt.query(params![specialty, status_to_db(Status::Active)])?;
        let mut developers = Vec::new();
        while let Some(row) = rows.next()? {
            developers.push(parse_developer_row(row)?);
        }

        Ok(developers)
    }

    fn save(&self, developer: &Developer) -> RepoResult<Developer> {
        match developer.id {
            None => {
                self.conn.execute(
                    "INSERT INTO developers (
                        first_name,
                        last_name,
                        email,
                        specialty,
                        status
                    ) VALUES (?1, ?2, ?3, ?4, ?5);",
                    params![
                        developer.first_name.as_str(),
                        developer.last_name.as_str(),
                        developer.email.as_str(),
                        developer.specialty.as_str(),
                        status_to_db(developer.status),
                    ],
                )?;

                let mut persisted = developer.clone();
                persisted.id = Some(self.conn.last_insert_rowid());
                Ok(persisted)
            }
            Some(id) => {
                self.conn.execute(
                    "INSERT INTO developers (
                        id,
                        first_name,
                        last_name,
                        email,
                        specialty,
                        status
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                    ON CONFLICT(id) DO UPDATE SET
                        first_name = excluded.first_name,
                        last_name = excluded.last_name,
                        email = excluded.email,
                        specialty = excluded.specialty,
                        status = excluded.status;",
                    params![
                        id,
                        developer.first_name.as_str(),
                        developer.last_name.as_str(),
                        developer.email.as_str(),
                        developer.specialty.as_str(),
                        status_to_db(developer.status),
                    ],
                )?;

                Ok(developer.clone())
            }
        }
    }

    fn delete_by_id(&self, id: DeveloperId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM developers WHERE id = ?1;", params![id])?;
        Ok(())
    }
}

fn parse_developer_row(row: &Row<'_>) -> RepoResult<Developer> {
    let status_text: String = row.get("status")?;
    let status = parse_status(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid status value `{status_text}` in developers.status"
        ))
    })?;

    Ok(Developer {
        id: Some(row.get("id")?),
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        specialty: row.get("specialty")?,
        status,
    })
}

fn status_to_db(status: Status) -> &'static str {
    match status {
        Status::Active => "ACTIVE",
        Status::Deleted => "DELETED",
    }
}

fn parse_status(value: &str) -> Option<Status> {
    match value {
        "ACTIVE" => Some(Status::Active),
        "DELETED" => Some(Status::Deleted),
        _ => None,
    }
}

fn table_exists(conn: &Connection, table_name: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        params![table_name],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
