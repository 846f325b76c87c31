//! CSV snapshot import for tickets and ledger transactions.

mod parser;

use crate::store::InMemoryStore;
use crate::tickets::Ticket;
use crate::wallet::Transaction;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug)]
pub enum ImportError {
    Io { path: PathBuf, source: std::io::Error },
    Csv(csv::Error),
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io { path, source } => {
                write!(f, "failed to read snapshot {}: {}", path.display(), source)
            }
            ImportError::Csv(err) => write!(f, "invalid snapshot CSV data: {}", err),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io { source, .. } => Some(source),
            ImportError::Csv(err) => Some(err),
        }
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Tickets grouped by their owning collection.
pub type TicketCollections = BTreeMap<String, Vec<Ticket>>;

pub struct SnapshotImporter;

impl SnapshotImporter {
    pub fn tickets_from_path<P: AsRef<Path>>(path: P) -> Result<TicketCollections, ImportError> {
        let file = open(path.as_ref())?;
        Self::tickets_from_reader(file)
    }

    pub fn tickets_from_reader<R: Read>(reader: R) -> Result<TicketCollections, ImportError> {
        let mut collections = TicketCollections::new();
        for collected in parser::parse_tickets(reader)? {
            collections
                .entry(collected.collection)
                .or_default()
                .push(collected.ticket);
        }
        Ok(collections)
    }

    pub fn transactions_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<Transaction>, ImportError> {
        let file = open(path.as_ref())?;
        Self::transactions_from_reader(file)
    }

    pub fn transactions_from_reader<R: Read>(reader: R) -> Result<Vec<Transaction>, ImportError> {
        Ok(parser::parse_transactions(reader)?)
    }

    /// Builds an in-memory store from whichever snapshots are provided.
    pub fn load_store(
        tickets: Option<&Path>,
        transactions: Option<&Path>,
    ) -> Result<InMemoryStore, ImportError> {
        let mut store = InMemoryStore::new();

        if let Some(path) = tickets {
            for (collection, batch) in Self::tickets_from_path(path)? {
                store.insert_tickets(collection, batch);
            }
        }

        if let Some(path) = transactions {
            store = store.with_transactions(Self::transactions_from_path(path)?);
        }

        info!(
            tickets = store.ticket_count(),
            transactions = store.transaction_count(),
            "snapshot loaded"
        );

        Ok(store)
    }
}

fn open(path: &Path) -> Result<std::fs::File, ImportError> {
    std::fs::File::open(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
