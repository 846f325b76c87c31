//! Read-side interfaces to the document store that owns tickets and the ledger.

use crate::tickets::Ticket;
use crate::wallet::Transaction;
use std::collections::BTreeMap;

/// Name of the collection tickets land in when a snapshot does not say otherwise.
pub const DEFAULT_COLLECTION: &str = "tickets";

/// Storage abstraction so the dashboard service can be exercised in isolation.
pub trait TicketStore: Send + Sync {
    /// Every ticket in one owning collection; unknown collections are empty.
    fn tickets_in(&self, collection: &str) -> Result<Vec<Ticket>, StoreError>;
    fn all_tickets(&self) -> Result<Vec<Ticket>, StoreError>;
}

pub trait TransactionStore: Send + Sync {
    fn all_transactions(&self) -> Result<Vec<Transaction>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Snapshot of tickets and transactions held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    collections: BTreeMap<String, Vec<Ticket>>,
    transactions: Vec<Transaction>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tickets(
        mut self,
        collection: impl Into<String>,
        tickets: impl IntoIterator<Item = Ticket>,
    ) -> Self {
        self.insert_tickets(collection, tickets);
        self
    }

    pub fn with_transactions(mut self, transactions: impl IntoIterator<Item = Transaction>) -> Self {
        self.transactions.extend(transactions);
        self
    }

    pub fn insert_tickets(
        &mut self,
        collection: impl Into<String>,
        tickets: impl IntoIterator<Item = Ticket>,
    ) {
        self.collections
            .entry(collection.into())
            .or_default()
            .extend(tickets);
    }

    pub fn collections(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }

    pub fn ticket_count(&self) -> usize {
        self.collections.values().map(Vec::len).sum()
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }
}

impl TicketStore for InMemoryStore {
    fn tickets_in(&self, collection: &str) -> Result<Vec<Ticket>, StoreError> {
        Ok(self
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }

    fn all_tickets(&self) -> Result<Vec<Ticket>, StoreError> {
        Ok(self.collections.values().flatten().cloned().collect())
    }
}

impl TransactionStore for InMemoryStore {
    fn all_transactions(&self) -> Result<Vec<Transaction>, StoreError> {
        Ok(self.transactions.clone())
    }
}
