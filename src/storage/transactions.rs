//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json, stored as a
//! plain JSON array of records. The record order is kept as stored because the
//! analytics pipeline is order sensitive for records that share a date.

use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{FinboardError, FinboardResult};
use crate::models::{Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};

/// Repository for transaction persistence
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<Vec<Transaction>>,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    fn read(&self) -> FinboardResult<RwLockReadGuard<'_, Vec<Transaction>>> {
        self.data
            .read()
            .map_err(|e| FinboardError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> FinboardResult<RwLockWriteGuard<'_, Vec<Transaction>>> {
        self.data
            .write()
            .map_err(|e| FinboardError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load transactions from disk, replacing what is in memory
    pub fn load(&self) -> FinboardResult<()> {
        let transactions: Vec<Transaction> = read_json(&self.path)?;
        let mut data = self.write()?;
        *data = transactions;
        tracing::info!(count = data.len(), "loaded transactions");
        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> FinboardResult<()> {
        let data = self.read()?;
        write_json_atomic(&self.path, &*data)?;
        tracing::info!(count = data.len(), "saved transactions");
        Ok(())
    }

    /// Snapshot of every transaction in stored order
    pub fn get_all(&self) -> FinboardResult<Vec<Transaction>> {
        Ok(self.read()?.clone())
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> FinboardResult<Option<Transaction>> {
        Ok(self.read()?.iter().find(|t| t.id == id).cloned())
    }

    /// Transactions matching a predicate, in stored order
    pub fn find<F>(&self, predicate: F) -> FinboardResult<Vec<Transaction>>
    where
        F: Fn(&Transaction) -> bool,
    {
        Ok(self.read()?.iter().filter(|t| predicate(t)).cloned().collect())
    }

    /// Replace the whole collection
    pub fn replace(&self, transactions: Vec<Transaction>) -> FinboardResult<()> {
        let mut data = self.write()?;
        *data = transactions;
        tracing::debug!(count = data.len(), "replaced transactions");
        Ok(())
    }

    /// Append a new transaction
    pub fn add(&self, txn: Transaction) -> FinboardResult<()> {
        let mut data = self.write()?;
        if data.iter().any(|t| t.id == txn.id) {
            return Err(FinboardError::duplicate_transaction(txn.id.to_string()));
        }
        tracing::debug!(id = %txn.id, "added transaction");
        data.push(txn);
        Ok(())
    }

    /// Replace an existing transaction in place
    pub fn update(&self, txn: Transaction) -> FinboardResult<()> {
        let mut data = self.write()?;
        let slot = data
            .iter_mut()
            .find(|t| t.id == txn.id)
            .ok_or_else(|| FinboardError::transaction_not_found(txn.id.to_string()))?;
        tracing::debug!(id = %txn.id, "updated transaction");
        *slot = txn;
        Ok(())
    }

    /// Delete a transaction, returning whether it existed
    pub fn delete(&self, id: TransactionId) -> FinboardResult<bool> {
        let mut data = self.write()?;
        let before = data.len();
        data.retain(|t| t.id != id);
        let removed = data.len() != before;
        if removed {
            tracing::debug!(id = %id, "deleted transaction");
        }
        Ok(removed)
    }

    pub fn len(&self) -> FinboardResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> FinboardResult<bool> {
        Ok(self.read()?.is_empty())
    }

    /// A fresh time-derived id that does not collide with a stored one
    pub fn next_id(&self) -> FinboardResult<TransactionId> {
        let now = TransactionId::now();
        let data = self.read()?;
        Ok(match data.iter().map(|t| t.id).max() {
            Some(max) if max >= now => max.next(),
            _ => now,
        })
    }
}
