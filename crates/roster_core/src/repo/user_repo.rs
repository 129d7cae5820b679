//! User store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide lookup/upsert/delete/list APIs over persisted accounts.
//! - Mint account ids at save time for unsaved candidates.
//!
//! # Invariants
//! - `save` never returns a record with an empty `id`.
//! - `users.email` carries a unique index; violations surface as
//!   `RepoError::EmailTaken`, making the check-then-save race loss explicit.

use crate::db::{migrations, DbError};
use crate::model::email::is_valid_email;
use crate::model::user::{User, UserId};
use rusqlite::{params, Connection, ErrorCode, Row};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const USER_SELECT_SQL: &str = "SELECT user_id, email, name, is_active FROM users";

const REQUIRED_USER_COLUMNS: &[&str] =
    &["user_id", "email", "name", "is_active", "created_at", "updated_at"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Store-level error for account persistence operations.
#[derive(Debug)]
pub enum RepoError {
    /// Connection or SQL transport failure.
    Db(DbError),
    /// Delete target does not exist.
    NotFound(UserId),
    /// The unique email index rejected a write.
    EmailTaken(String),
    /// Persisted state violates model invariants.
    InvalidData(String),
    /// Implementation-specific failure from a non-SQLite store.
    Backend(String),
    /// Connection has no applied schema at all.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "user not found: {id}"),
            Self::EmailTaken(email) => write!(f, "email already persisted: `{email}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted user data: {message}"),
            Self::Backend(message) => write!(f, "storage backend failure: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection has schema version {actual_version}, expected {expected_version}; \
                 open it through roster_core::db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
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

/// Store interface for user account persistence.
///
/// Absence is modeled as `Ok(None)`; an error always means the store itself
/// failed. Implementations are responsible for making concurrent
/// `find_by_email` + `save` pairs safe for the same email.
pub trait UserRepository {
    fn find_by_id(&self, id: &str) -> RepoResult<Option<User>>;
    fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;
    /// Upserts `candidate`, minting an id when it has none, and returns the
    /// persisted record.
    fn save(&self, candidate: &User) -> RepoResult<User>;
    fn delete(&self, id: &str) -> RepoResult<()>;
    fn list_all(&self) -> RepoResult<Vec<User>>;
}

/// SQLite-backed user store.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Wraps a connection after verifying the expected schema is present.
    ///
    /// # Errors
    /// - `UninitializedConnection` when no migration has ever been applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema
    ///   does not match what this binary was built against.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actual_version =
            conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
        if actual_version == 0 {
            return Err(RepoError::UninitializedConnection {
                expected_version: migrations::latest_version(),
                actual_version,
            });
        }

        ensure_table(conn, "users")?;
        ensure_columns(conn, "users", REQUIRED_USER_COLUMNS)?;

        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE user_id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }

        Ok(None)
    }

    fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE email = ?1;"))?;

        let mut rows = stmt.query([email])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }

        Ok(None)
    }

    fn save(&self, candidate: &User) -> RepoResult<User> {
        let mut record = candidate.clone();

        if record.id.is_empty() {
            record.id = Uuid::new_v4().to_string();
            self.insert(&record)?;
            return Ok(record);
        }

        let changed = self
            .conn
            .execute(
                "UPDATE users
                 SET
                    email = ?1,
                    name = ?2,
                    is_active = ?3,
                    updated_at = (strftime('%s', 'now') * 1000)
                 WHERE user_id = ?4;",
                params![
                    record.email.as_str(),
                    record.name.as_str(),
                    bool_to_int(record.active),
                    record.id.as_str(),
                ],
            )
            .map_err(|err| map_constraint_error(err, &record.email))?;

        if changed == 0 {
            // Caller-provided id with no existing row: import/sync path.
            self.insert(&record)?;
        }

        Ok(record)
    }

    fn delete(&self, id: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM users WHERE user_id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id.to_string()));
        }

        Ok(())
    }

    fn list_all(&self) -> RepoResult<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} ORDER BY created_at ASC, user_id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut users = Vec::new();

        while let Some(row) = rows.next()? {
            users.push(parse_user_row(row)?);
        }

        Ok(users)
    }
}

impl SqliteUserRepository<'_> {
    fn insert(&self, record: &User) -> RepoResult<()> {
        self.conn
            .execute(
                "INSERT INTO users (user_id, email, name, is_active)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    record.id.as_str(),
                    record.email.as_str(),
                    record.name.as_str(),
                    bool_to_int(record.active),
                ],
            )
            .map_err(|err| map_constraint_error(err, &record.email))?;

        Ok(())
    }
}

fn ensure_table(conn: &Connection, table: &'static str) -> RepoResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;

    if exists == 0 {
        return Err(RepoError::MissingRequiredTable(table));
    }

    Ok(())
}

fn ensure_columns(
    conn: &Connection,
    table: &'static str,
    required: &[&'static str],
) -> RepoResult<()> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;

    let mut present: HashSet<String> = HashSet::new();
    while let Some(row) = rows.next()? {
        present.insert(row.get::<_, String>("name")?);
    }

    for column in required {
        if !present.contains(*column) {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }

    Ok(())
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    let id: String = row.get("user_id")?;
    if id.is_empty() {
        return Err(RepoError::InvalidData(
            "empty user_id in users.user_id".to_string(),
        ));
    }

    let email: String = row.get("email")?;
    if !is_valid_email(&email) {
        return Err(RepoError::InvalidData(format!(
            "malformed email `{email}` in users.email"
        )));
    }

    let active = match row.get::<_, i64>("is_active")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_active value `{other}` in users.is_active"
            )));
        }
    };

    Ok(User {
        id,
        email,
        name: row.get("name")?,
        active,
    })
}

fn map_constraint_error(err: rusqlite::Error, email: &str) -> RepoError {
    if err.sqlite_error_code() == Some(ErrorCode::ConstraintViolation)
        && err.to_string().contains("users.email")
    {
        return RepoError::EmailTaken(email.to_string());
    }
    err.into()
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
