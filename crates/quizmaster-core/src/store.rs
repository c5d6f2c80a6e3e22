//! Transactional bucket store abstraction.
//!
//! A store is a single local file organised as named buckets of binary
//! key/value pairs. Every call to [`Store::update`] or [`Store::read`] is one
//! self-contained transaction; implementations open and close their backing
//! resource per call and are not reentrant.

use crate::error::DomainError;

/// The well-known buckets of a game store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bucket {
    /// Game-wide settings such as the manager spreadsheet.
    GameConfiguration,
    /// One spreadsheet reference per team name.
    TeamsSpreadsheets,
    /// One results record per round.
    GameResults,
}

impl Bucket {
    /// Every bucket, in creation order.
    pub const ALL: [Self; 3] = [
        Self::GameConfiguration,
        Self::TeamsSpreadsheets,
        Self::GameResults,
    ];

    /// Persisted bucket name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::GameConfiguration => "game-configuration",
            Self::TeamsSpreadsheets => "teams-spreadsheets",
            Self::GameResults => "game-results",
        }
    }
}

/// Read access inside a transaction.
///
/// Operations on a bucket that does not exist fail with
/// `DomainError::MissingBucket`, which is distinct from an empty bucket.
pub trait ReadTxn {
    /// Returns the value stored under `key`, or `None` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingBucket` if the bucket does not exist and
    /// `DomainError::Infrastructure` on storage failures.
    fn get(&self, bucket: Bucket, key: &[u8]) -> Result<Option<Vec<u8>>, DomainError>;

    /// Returns every entry of the bucket ordered by key.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingBucket` if the bucket does not exist and
    /// `DomainError::Infrastructure` on storage failures.
    fn entries(&self, bucket: Bucket) -> Result<Vec<(Vec<u8>, Vec<u8>)>, DomainError>;
}

/// Write access inside a transaction.
pub trait WriteTxn: ReadTxn {
    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingBucket` if the bucket does not exist and
    /// `DomainError::Infrastructure` on storage failures.
    fn put(&mut self, bucket: Bucket, key: &[u8], value: &[u8]) -> Result<(), DomainError>;
}

/// Transactional store handle passed explicitly to every repository call.
pub trait Store {
    /// Runs `f` in a writable transaction after making sure every bucket in
    /// [`Bucket::ALL`] exists. Commits if `f` succeeds; any error rolls the
    /// whole transaction back.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `f`, or `DomainError::Infrastructure` if
    /// the store cannot be opened or committed.
    fn update<T, F>(&self, f: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut dyn WriteTxn) -> Result<T, DomainError>;

    /// Runs `f` against a read-only snapshot. Never creates buckets.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `f`, or `DomainError::Infrastructure` if
    /// the store cannot be opened.
    fn read<T, F>(&self, f: F) -> Result<T, DomainError>
    where
        F: FnOnce(&dyn ReadTxn) -> Result<T, DomainError>;
}
