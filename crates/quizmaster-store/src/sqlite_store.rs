//! SQLite implementation of the `Store` trait.

use std::path::{Path, PathBuf};

use rusqlite::{
    Connection, OpenFlags, OptionalExtension, Transaction, TransactionBehavior, params,
};
use tracing::debug;

use quizmaster_core::error::DomainError;
use quizmaster_core::store::{Bucket, ReadTxn, Store, WriteTxn};

use crate::schema::CREATE_TABLES;

/// File-backed store. Holds only the path; every call opens its own
/// connection and closes it before returning.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Creates a store backed by the file at `path`. The file is created by
    /// the first write; reads never create it.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open_for_write(&self) -> Result<Connection, DomainError> {
        debug!(path = %self.path.display(), "opening store for writing");
        let conn = Connection::open(&self.path).map_err(|e| self.open_error(&e))?;
        conn.execute_batch(CREATE_TABLES)
            .map_err(infrastructure("schema initialization"))?;
        Ok(conn)
    }

    /// Opens the file read-only. A missing file, or one no write has
    /// initialised yet, reads as an empty in-memory store.
    fn open_for_read(&self) -> Result<Connection, DomainError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "store file absent, reading an empty store");
            return empty_store();
        }
        debug!(path = %self.path.display(), "opening store for reading");
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| self.open_error(&e))?;
        let initialised: bool = conn
            .query_row(
                "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'buckets')",
                [],
                |row| row.get(0),
            )
            .map_err(infrastructure("schema lookup"))?;
        if initialised { Ok(conn) } else { empty_store() }
    }

    fn open_error(&self, e: &rusqlite::Error) -> DomainError {
        DomainError::Infrastructure(format!(
            "failed to open store {}: {e}",
            self.path.display()
        ))
    }
}

fn empty_store() -> Result<Connection, DomainError> {
    let conn = Connection::open_in_memory().map_err(infrastructure("in-memory store"))?;
    conn.execute_batch(CREATE_TABLES)
        .map_err(infrastructure("schema initialization"))?;
    Ok(conn)
}

fn infrastructure(context: &'static str) -> impl Fn(rusqlite::Error) -> DomainError {
    move |e| DomainError::Infrastructure(format!("{context} failed: {e}"))
}

/// A transaction on an open connection. Dropping it without committing
/// rolls back.
struct SqliteTxn<'conn> {
    tx: Transaction<'conn>,
}

impl SqliteTxn<'_> {
    fn require_bucket(&self, bucket: Bucket) -> Result<(), DomainError> {
        let exists: bool = self
            .tx
            .query_row(
                "SELECT EXISTS (SELECT 1 FROM buckets WHERE name = ?1)",
                params![bucket.name()],
                |row| row.get(0),
            )
            .map_err(infrastructure("bucket lookup"))?;
        if exists {
            Ok(())
        } else {
            Err(DomainError::MissingBucket(bucket.name()))
        }
    }

    fn create_bucket_if_missing(&self, bucket: Bucket) -> Result<(), DomainError> {
        self.tx
            .execute(
                "INSERT OR IGNORE INTO buckets (name) VALUES (?1)",
                params![bucket.name()],
            )
            .map_err(infrastructure("bucket creation"))?;
        Ok(())
    }
}

impl ReadTxn for SqliteTxn<'_> {
    fn get(&self, bucket: Bucket, key: &[u8]) -> Result<Option<Vec<u8>>, DomainError> {
        self.require_bucket(bucket)?;
        self.tx
            .query_row(
                "SELECT value FROM entries WHERE bucket = ?1 AND key = ?2",
                params![bucket.name(), key],
                |row| row.get(0),
            )
            .optional()
            .map_err(infrastructure("entry lookup"))
    }

    fn entries(&self, bucket: Bucket) -> Result<Vec<(Vec<u8>, Vec<u8>)>, DomainError> {
        self.require_bucket(bucket)?;
        let mut stmt = self
            .tx
            .prepare("SELECT key, value FROM entries WHERE bucket = ?1 ORDER BY key")
            .map_err(infrastructure("entry scan"))?;
        let rows = stmt
            .query_map(params![bucket.name()], |row| {
                Ok((row.get::<_, Vec<u8>>(0)?, row.get::<_, Vec<u8>>(1)?))
            })
            .map_err(infrastructure("entry scan"))?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(infrastructure("entry scan"))
    }
}

impl WriteTxn for SqliteTxn<'_> {
    fn put(&mut self, bucket: Bucket, key: &[u8], value: &[u8]) -> Result<(), DomainError> {
        self.require_bucket(bucket)?;
        self.tx
            .execute(
                "INSERT INTO entries (bucket, key, value) VALUES (?1, ?2, ?3)
                 ON CONFLICT (bucket, key) DO UPDATE SET value = excluded.value",
                params![bucket.name(), key, value],
            )
            .map_err(infrastructure("entry write"))?;
        Ok(())
    }
}

impl Store for SqliteStore {
    fn update<T, F>(&self, f: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut dyn WriteTxn) -> Result<T, DomainError>,
    {
        let mut conn = self.open_for_write()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(infrastructure("begin transaction"))?;
        let mut txn = SqliteTxn { tx };
        for bucket in Bucket::ALL {
            txn.create_bucket_if_missing(bucket)?;
        }
        let out = f(&mut txn)?;
        txn.tx.commit().map_err(infrastructure("commit"))?;
        Ok(out)
    }

    fn read<T, F>(&self, f: F) -> Result<T, DomainError>
    where
        F: FnOnce(&dyn ReadTxn) -> Result<T, DomainError>,
    {
        let mut conn = self.open_for_read()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Deferred)
            .map_err(infrastructure("begin transaction"))?;
        let txn = SqliteTxn { tx };
        f(&txn)
    }
}
