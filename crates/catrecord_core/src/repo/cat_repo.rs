//! Cat repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and field-based lookups over `cats` storage.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `save` assigns an id on insert and never changes an existing id.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - Absence is reported as `None` or an empty list, never as an error.
//! - List results are ordered by `id ASC`.

use crate::db::DbError;
use crate::model::cat::{Cat, CatId};
use log::debug;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CAT_SELECT_SQL: &str = "SELECT
    id,
    name,
    age,
    identificator
FROM cats";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for cat persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted cat data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
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

/// Repository interface for cat records.
pub trait CatRepository {
    fn find_all(&self) -> RepoResult<Vec<Cat>>;
    fn find_by_id(&self, id: CatId) -> RepoResult<Option<Cat>>;
    /// Exact, case-sensitive name match.
    fn find_by_name(&self, name: &str) -> RepoResult<Vec<Cat>>;
    /// Case-insensitive substring match; an empty fragment matches every cat.
    fn find_by_name_containing_ignore_case(&self, fragment: &str) -> RepoResult<Vec<Cat>>;
    fn find_by_age(&self, age: i32) -> RepoResult<Vec<Cat>>;
    /// Inserts when `cat.id` is `None`, otherwise writes the row with that id.
    ///
    /// Returns the stored record carrying its id.
    fn save(&self, cat: &Cat) -> RepoResult<Cat>;
    /// Deletes every listed cat that has an id. Unsaved cats are ignored.
    fn delete_all(&self, cats: &[Cat]) -> RepoResult<()>;
}

/// SQLite-backed cat repository.
pub struct SqliteCatRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCatRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_cats(&self, where_clause: &str, params: impl rusqlite::Params) -> RepoResult<Vec<Cat>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CAT_SELECT_SQL} {where_clause} ORDER BY id ASC;"))?;
        let mut rows = stmt.query(params)?;
        let mut cats = Vec::new();

        while let Some(row) = rows.next()? {
            cats.push(parse_cat_row(row)?);
        }

        Ok(cats)
    }
}

impl CatRepository for SqliteCatRepository<'_> {
    fn find_all(&self) -> RepoResult<Vec<Cat>> {
        self.query_cats("", [])
    }

    fn find_by_id(&self, id: CatId) -> RepoResult<Option<Cat>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CAT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_cat_row(row)?));
        }

        Ok(None)
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Vec<Cat>> {
        self.query_cats("WHERE name = ?1", [name])
    }

    fn find_by_name_containing_ignore_case(&self, fragment: &str) -> RepoResult<Vec<Cat>> {
        // SQLite `lower()` only folds ASCII, so matching happens here.
        let needle = fragment.to_lowercase();
        let cats = self.find_all()?;
        Ok(cats
            .into_iter()
            .filter(|cat| cat.name.to_lowercase().contains(needle.as_str()))
            .collect())
    }

    fn find_by_age(&self, age: i32) -> RepoResult<Vec<Cat>> {
        self.query_cats("WHERE age = ?1", [age])
    }

    fn save(&self, cat: &Cat) -> RepoResult<Cat> {
        self.conn.execute(
            "INSERT INTO cats (id, name, age, identificator)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                age = excluded.age,
                identificator = excluded.identificator,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![
                cat.id,
                cat.name.as_str(),
                cat.age,
                cat.identificator.as_deref(),
            ],
        )?;

        let id = cat.id.unwrap_or_else(|| self.conn.last_insert_rowid());
        debug!(
            "event=cat_save module=repo status=ok id={} inserted={}",
            id,
            cat.id.is_none()
        );

        Ok(Cat {
            id: Some(id),
            ..cat.clone()
        })
    }

    fn delete_all(&self, cats: &[Cat]) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        let mut deleted = 0usize;
        for id in cats.iter().filter_map(|cat| cat.id) {
            deleted += tx.execute("DELETE FROM cats WHERE id = ?1;", [id])?;
        }
        tx.commit()?;

        debug!(
            "event=cat_delete module=repo status=ok requested={} deleted={}",
            cats.len(),
            deleted
        );
        Ok(())
    }
}

fn parse_cat_row(row: &Row<'_>) -> RepoResult<Cat> {
    let id: CatId = row.get("id")?;

    let raw_age: i64 = row.get("age")?;
    let age = i32::try_from(raw_age).map_err(|_| {
        RepoError::InvalidData(format!("age `{raw_age}` out of range in cats.age (id={id})"))
    })?;

    Ok(Cat {
        id: Some(id),
        name: row.get("name")?,
        age,
        identificator: row.get("identificator")?,
    })
}
