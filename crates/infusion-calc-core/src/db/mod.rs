//! Database layer for infusion-calc.
//!
//! Holds the drug catalog and user preferences. Calculation results are
//! never stored.

mod catalog;
mod preferences;
mod schema;

#[allow(unused_imports)]
pub use catalog::*;
#[allow(unused_imports)]
pub use preferences::*;
pub use schema::*;

use rusqlite::Connection;
use std::path::Path;
use thiserror::Error;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Catalog error: {0}")]
    Catalog(#[from] crate::catalog::CatalogError),
}

pub type DbResult<T> = Result<T, DbError>;

/// Catalog and preference store.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the store file, creating it and its tables on first use.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        Self::with_schema(Connection::open(path)?)
    }

    /// Store that lives only as long as the value.
    pub fn open_in_memory() -> DbResult<Self> {
        Self::with_schema(Connection::open_in_memory()?)
    }

    fn with_schema(conn: Connection) -> DbResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}
