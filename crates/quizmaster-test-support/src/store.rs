//! Test stores — in-memory `Store` implementations for tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use quizmaster_core::error::DomainError;
use quizmaster_core::store::{Bucket, ReadTxn, Store, WriteTxn};

type Buckets = BTreeMap<Bucket, BTreeMap<Vec<u8>, Vec<u8>>>;

/// A store kept entirely in memory with the same transaction semantics as the
/// file-backed one: `update` works on a copy that replaces the state only when
/// the closure succeeds, and `read` never creates buckets.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    buckets: Mutex<Buckets>,
}

impl InMemoryStore {
    /// Creates an empty store without any bucket.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds the given empty buckets.
    #[must_use]
    pub fn with_buckets(buckets: &[Bucket]) -> Self {
        let state = buckets
            .iter()
            .map(|&bucket| (bucket, BTreeMap::new()))
            .collect();
        Self {
            buckets: Mutex::new(state),
        }
    }

    /// Writes raw bytes outside any transaction, creating the bucket if
    /// needed. Useful for seeding corrupt values.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn insert_raw(&self, bucket: Bucket, key: &[u8], value: &[u8]) {
        self.buckets
            .lock()
            .unwrap()
            .entry(bucket)
            .or_default()
            .insert(key.to_vec(), value.to_vec());
    }

    /// Returns the buckets that currently exist.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn existing_buckets(&self) -> Vec<Bucket> {
        self.buckets.lock().unwrap().keys().copied().collect()
    }
}

struct MemoryTxn {
    buckets: Buckets,
}

impl MemoryTxn {
    fn bucket(&self, bucket: Bucket) -> Result<&BTreeMap<Vec<u8>, Vec<u8>>, DomainError> {
        self.buckets
            .get(&bucket)
            .ok_or(DomainError::MissingBucket(bucket.name()))
    }
}

impl ReadTxn for MemoryTxn {
    fn get(&self, bucket: Bucket, key: &[u8]) -> Result<Option<Vec<u8>>, DomainError> {
        Ok(self.bucket(bucket)?.get(key).cloned())
    }

    fn entries(&self, bucket: Bucket) -> Result<Vec<(Vec<u8>, Vec<u8>)>, DomainError> {
        Ok(self
            .bucket(bucket)?
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

impl WriteTxn for MemoryTxn {
    fn put(&mut self, bucket: Bucket, key: &[u8], value: &[u8]) -> Result<(), DomainError> {
        self.buckets
            .get_mut(&bucket)
            .ok_or(DomainError::MissingBucket(bucket.name()))?
            .insert(key.to_vec(), value.to_vec());
        Ok(())
    }
}

impl Store for InMemoryStore {
    fn update<T, F>(&self, f: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut dyn WriteTxn) -> Result<T, DomainError>,
    {
        let mut state = self
            .buckets
            .lock()
            .map_err(|e| DomainError::Infrastructure(format!("store mutex poisoned: {e}")))?;
        let mut txn = MemoryTxn {
            buckets: state.clone(),
        };
        for bucket in Bucket::ALL {
            txn.buckets.entry(bucket).or_default();
        }
        let out = f(&mut txn)?;
        *state = txn.buckets;
        Ok(out)
    }

    fn read<T, F>(&self, f: F) -> Result<T, DomainError>
    where
        F: FnOnce(&dyn ReadTxn) -> Result<T, DomainError>,
    {
        let state = self
            .buckets
            .lock()
            .map_err(|e| DomainError::Infrastructure(format!("store mutex poisoned: {e}")))?;
        let txn = MemoryTxn {
            buckets: state.clone(),
        };
        f(&txn)
    }
}

/// A store whose every transaction fails with an infrastructure error.
#[derive(Debug)]
pub struct FailingStore;

impl Store for FailingStore {
    fn update<T, F>(&self, _f: F) -> Result<T, DomainError>
    where
        F: FnOnce(&mut dyn WriteTxn) -> Result<T, DomainError>,
    {
        Err(DomainError::Infrastructure("disk unavailable".into()))
    }

    fn read<T, F>(&self, _f: F) -> Result<T, DomainError>
    where
        F: FnOnce(&dyn ReadTxn) -> Result<T, DomainError>,
    {
        Err(DomainError::Infrastructure("disk unavailable".into()))
    }
}
