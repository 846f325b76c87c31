use super::calculator::WalletFormula;
use crate::tickets::ServiceCategory;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Credit,
    Debit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntrySource {
    Ticket {
        ticket_id: String,
        category: ServiceCategory,
    },
    Ledger {
        transaction_id: String,
    },
}

/// One line of the audit trail behind a wallet balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletEntry {
    pub date: Option<DateTime<Utc>>,
    pub kind: EntryKind,
    pub amount: Decimal,
    pub source: EntrySource,
    pub description: String,
}

impl WalletEntry {
    /// Amount with its sign applied: credits add, debits subtract.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            EntryKind::Credit => self.amount,
            EntryKind::Debit => -self.amount,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WalletBreakdown {
    pub resolved_tickets: usize,
    pub excluded_tickets: usize,
    pub third_party_service_total: Decimal,
    pub third_party_commission_total: Decimal,
    pub in_store_service_total: Decimal,
    pub in_store_commission_total: Decimal,
    pub credit_total: Decimal,
    pub debit_total: Decimal,
    /// Most recent first; undated entries trail.
    pub entries: Vec<WalletEntry>,
}

impl WalletBreakdown {
    pub(crate) fn sort_entries(&mut self) {
        self.entries.sort_by(|left, right| right.date.cmp(&left.date));
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletReport {
    pub technician_id: String,
    pub formula: WalletFormula,
    pub balance: Decimal,
    pub breakdown: WalletBreakdown,
}
