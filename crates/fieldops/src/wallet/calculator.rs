use super::breakdown::{EntryKind, EntrySource, WalletBreakdown, WalletEntry, WalletReport};
use super::domain::{Technician, Transaction, TransactionKind};
use crate::tickets::{ServiceCategory, Ticket, TicketStatus, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two balance rules used by different dashboard surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalletFormula {
    /// Third Party adds service and subtracts commission; In Store adds commission.
    #[default]
    CategoryAsymmetric,
    /// Both categories add `service - commission`.
    FlatNet,
}

impl WalletFormula {
    pub const fn key(self) -> &'static str {
        match self {
            Self::CategoryAsymmetric => "category_asymmetric",
            Self::FlatNet => "flat_net",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "category_asymmetric" | "categoryasymmetric" => Some(Self::CategoryAsymmetric),
            "flat_net" | "flatnet" => Some(Self::FlatNet),
            _ => None,
        }
    }
}

impl fmt::Display for WalletFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConfig {
    pub formula: WalletFormula,
    /// Ignore the ledger entirely when the technician has no resolved work.
    pub zero_if_no_resolved_tickets: bool,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            formula: WalletFormula::CategoryAsymmetric,
            zero_if_no_resolved_tickets: true,
        }
    }
}

/// Recomputes a technician's balance from resolved tickets and the manual ledger.
#[derive(Debug, Clone, Default)]
pub struct WalletCalculator {
    config: WalletConfig,
}

impl WalletCalculator {
    pub fn new(config: WalletConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> WalletConfig {
        self.config
    }

    pub fn compute(
        &self,
        tickets: &[Ticket],
        transactions: &[Transaction],
        technician: &Technician,
    ) -> WalletReport {
        // Completed tickets stay out of the wallet; only Resolved ones settle.
        let resolved: Vec<&Ticket> = tickets
            .iter()
            .filter(|ticket| ticket.status == TicketStatus::Resolved)
            .filter(|ticket| technician.owns_ticket(ticket))
            .collect();

        let mut breakdown = WalletBreakdown {
            resolved_tickets: resolved.len(),
            ..WalletBreakdown::default()
        };

        if resolved.is_empty() && self.config.zero_if_no_resolved_tickets {
            return self.report(technician, Decimal::ZERO, breakdown);
        }

        for ticket in resolved {
            self.apply_ticket(ticket, &mut breakdown);
        }

        for transaction in transactions
            .iter()
            .filter(|transaction| technician.owns_transaction(transaction))
        {
            apply_transaction(transaction, &mut breakdown);
        }

        breakdown.sort_entries();
        let balance = self.balance(&breakdown);
        self.report(technician, balance, breakdown)
    }

    fn apply_ticket(&self, ticket: &Ticket, breakdown: &mut WalletBreakdown) {
        let service = ticket.service_amount;
        let commission = ticket.commission_amount;

        match ticket.category {
            ServiceCategory::ThirdParty => {
                accumulate(&mut breakdown.third_party_service_total, service);
                accumulate(&mut breakdown.third_party_commission_total, commission);
            }
            ServiceCategory::InStore => {
                accumulate(&mut breakdown.in_store_service_total, service);
                accumulate(&mut breakdown.in_store_commission_total, commission);
            }
            _ => {
                breakdown.excluded_tickets += 1;
                return;
            }
        }

        let date = ticket.finished_at().and_then(Timestamp::instant);
        let source = || EntrySource::Ticket {
            ticket_id: ticket.id.clone(),
            category: ticket.category.clone(),
        };
        let mut push = |kind, amount: Decimal, description: &str| {
            if !amount.is_zero() {
                breakdown.entries.push(WalletEntry {
                    date,
                    kind,
                    amount,
                    source: source(),
                    description: description.to_string(),
                });
            }
        };

        match (self.config.formula, &ticket.category) {
            (WalletFormula::CategoryAsymmetric, ServiceCategory::InStore) => {
                push(EntryKind::Credit, commission, "in store commission earned");
            }
            (WalletFormula::CategoryAsymmetric, _) => {
                push(EntryKind::Credit, service, "third party service collected");
                push(EntryKind::Debit, commission, "third party commission");
            }
            (WalletFormula::FlatNet, _) => {
                push(EntryKind::Credit, service, "service amount");
                push(EntryKind::Debit, commission, "commission");
            }
        }
    }

    fn balance(&self, breakdown: &WalletBreakdown) -> Decimal {
        // Amounts near Decimal::MAX clamp instead of overflowing.
        let ledger = breakdown
            .credit_total
            .saturating_sub(breakdown.debit_total);
        let tickets = match self.config.formula {
            WalletFormula::CategoryAsymmetric => breakdown
                .third_party_service_total
                .saturating_add(breakdown.in_store_commission_total)
                .saturating_sub(breakdown.third_party_commission_total),
            WalletFormula::FlatNet => breakdown
                .third_party_service_total
                .saturating_sub(breakdown.third_party_commission_total)
                .saturating_add(
                    breakdown
                        .in_store_service_total
                        .saturating_sub(breakdown.in_store_commission_total),
                ),
        };
        tickets.saturating_add(ledger)
    }

    fn report(
        &self,
        technician: &Technician,
        balance: Decimal,
        breakdown: WalletBreakdown,
    ) -> WalletReport {
        WalletReport {
            technician_id: technician.id.clone(),
            formula: self.config.formula,
            balance,
            breakdown,
        }
    }
}

fn apply_transaction(transaction: &Transaction, breakdown: &mut WalletBreakdown) {
    let kind = match transaction.kind {
        TransactionKind::Credit => {
            accumulate(&mut breakdown.credit_total, transaction.amount);
            EntryKind::Credit
        }
        TransactionKind::Debit => {
            accumulate(&mut breakdown.debit_total, transaction.amount);
            EntryKind::Debit
        }
        TransactionKind::Unknown => {
            tracing::trace!(transaction_id = %transaction.id, "skipping transaction without a credit/debit type");
            return;
        }
    };

    let description = transaction
        .description
        .clone()
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| format!("manual {}", transaction.kind.label()));

    breakdown.entries.push(WalletEntry {
        date: transaction.date.as_ref().and_then(Timestamp::instant),
        kind,
        amount: transaction.amount,
        source: EntrySource::Ledger {
            transaction_id: transaction.id.clone(),
        },
        description,
    });
}

fn accumulate(total: &mut Decimal, amount: Decimal) {
    *total = total.saturating_add(amount);
}
