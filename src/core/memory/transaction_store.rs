//! Thread-safe in-memory transaction log
//!
//! Records are kept in a `Vec` in creation order, so the identifier of a record
//! is its position plus one and "most recent" is simply the tail.

use crate::core::traits::TransactionStore;
use crate::types::{LedgerError, NewTransaction, Transaction};
use parking_lot::RwLock;

/// In-memory append-only transaction log
#[derive(Debug, Default)]
pub struct MemoryTransactionStore {
    transactions: RwLock<Vec<Transaction>>,
}

impl MemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded transactions
    pub fn len(&self) -> usize {
        self.transactions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.read().is_empty()
    }
}

impl TransactionStore for MemoryTransactionStore {
    fn create(&self, transaction: NewTransaction) -> Result<Transaction, LedgerError> {
        let mut log = self.transactions.write();
        let id = log.len() as i64 + 1;
        let stored = transaction.into_transaction(id);
        log.push(stored.clone());
        Ok(stored)
    }

    fn get_last(&self, count: usize) -> Result<Vec<Transaction>, LedgerError> {
        Ok(self
            .transactions
            .read()
            .iter()
            .rev()
            .take(count)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::sync::Arc;
    use std::thread;

    fn record(from: &str, to: &str, amount: i64) -> NewTransaction {
        NewTransaction {
            from: from.to_string(),
            to: to.to_string(),
            amount: Decimal::new(amount, 0),
        }
    }

    #[test]
    fn test_create_assigns_increasing_ids() {
        let store = MemoryTransactionStore::new();

        let first = store.create(record("a", "b", 1)).unwrap();
        let second = store.create(record("b", "a", 2)).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.len(), 2);
    }

    #[rstest]
    #[case::fewer_than_stored(2, vec![5, 4])]
    #[case::exactly_stored(5, vec![5, 4, 3, 2, 1])]
    #[case::more_than_stored(10, vec![5, 4, 3, 2, 1])]
    fn test_get_last_newest_first(#[case] count: usize, #[case] expected_ids: Vec<i64>) {
        let store = MemoryTransactionStore::new();
        for i in 1..=5 {
            store.create(record("a", "b", i)).unwrap();
        }

        let ids: Vec<i64> = store
            .get_last(count)
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();

        assert_eq!(ids, expected_ids);
    }

    #[test]
    fn test_get_last_empty_log() {
        let store = MemoryTransactionStore::new();

        assert!(store.get_last(5).unwrap().is_empty());
    }

    #[test]
    fn test_concurrent_create_ids_are_unique() {
        let store = Arc::new(MemoryTransactionStore::new());
        let mut handles = vec![];

        for i in 0..20 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                store.create(record("a", "b", i)).unwrap().id
            }));
        }

        let mut ids: Vec<i64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        ids.sort();

        assert_eq!(ids, (1..=20).collect::<Vec<i64>>());
    }
}
