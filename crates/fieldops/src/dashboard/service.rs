use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::config::ScoringConfig;
use crate::store::{StoreError, TicketStore, TransactionStore};
use crate::tickets::{AdminAggregator, AdminSummary, LeaderboardEntry, ScoredTicket, Ticket};
use crate::wallet::{Technician, WalletCalculator, WalletReport};

/// Which tickets a query reads: one owning collection or the whole store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Option<String>")]
pub enum TicketScope {
    #[default]
    All,
    Collection(String),
}

impl From<Option<String>> for TicketScope {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(collection) if !collection.trim().is_empty() => {
                Self::Collection(collection.trim().to_string())
            }
            _ => Self::All,
        }
    }
}

/// Service composing the stores with the admin aggregator and wallet calculator.
pub struct DashboardService<T, X> {
    tickets: Arc<T>,
    transactions: Arc<X>,
    aggregator: AdminAggregator,
    wallet: WalletCalculator,
}

impl<T, X> DashboardService<T, X>
where
    T: TicketStore + 'static,
    X: TransactionStore + 'static,
{
    pub fn new(tickets: Arc<T>, transactions: Arc<X>, config: &ScoringConfig) -> Self {
        Self {
            tickets,
            transactions,
            aggregator: AdminAggregator::new(config.attribution.clone()),
            wallet: WalletCalculator::new(config.wallet),
        }
    }

    pub fn admin_summary(
        &self,
        identity: &str,
        scope: &TicketScope,
    ) -> Result<AdminSummary, DashboardServiceError> {
        let tickets = self.load_tickets(scope)?;
        let summary = self.aggregator.aggregate(&tickets, identity);
        debug!(
            identity = %summary.identity,
            points = summary.total_points,
            resolved = summary.resolved_count,
            total = summary.total_tickets,
            "admin summary computed"
        );
        Ok(summary)
    }

    pub fn admin_tickets(
        &self,
        identity: &str,
        scope: &TicketScope,
    ) -> Result<Vec<ScoredTicket>, DashboardServiceError> {
        let tickets = self.load_tickets(scope)?;
        Ok(self.aggregator.scored_tickets(&tickets, identity))
    }

    pub fn leaderboard<I: AsRef<str>>(
        &self,
        identities: &[I],
        scope: &TicketScope,
    ) -> Result<Vec<LeaderboardEntry>, DashboardServiceError> {
        let tickets = self.load_tickets(scope)?;
        let board = self.aggregator.leaderboard(&tickets, identities);
        debug!(entries = board.len(), "leaderboard computed");
        Ok(board)
    }

    pub fn technician_wallet(
        &self,
        technician: &Technician,
    ) -> Result<WalletReport, DashboardServiceError> {
        let tickets = self.tickets.all_tickets()?;
        let transactions = self.transactions.all_transactions()?;
        let report = self.wallet.compute(&tickets, &transactions, technician);
        debug!(
            technician = %report.technician_id,
            formula = %report.formula,
            balance = %report.balance,
            resolved = report.breakdown.resolved_tickets,
            "wallet computed"
        );
        Ok(report)
    }

    fn load_tickets(&self, scope: &TicketScope) -> Result<Vec<Ticket>, StoreError> {
        match scope {
            TicketScope::All => self.tickets.all_tickets(),
            TicketScope::Collection(collection) => self.tickets.tickets_in(collection),
        }
    }
}

/// Error raised by the dashboard service.
#[derive(Debug, thiserror::Error)]
pub enum DashboardServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
}
