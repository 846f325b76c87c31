//! Technician wallet: balance recomputed from resolved tickets plus the manual ledger.

mod breakdown;
mod calculator;
pub mod domain;

pub use breakdown::{EntryKind, EntrySource, WalletBreakdown, WalletEntry, WalletReport};
pub use calculator::{WalletCalculator, WalletConfig, WalletFormula};
pub use domain::{Technician, Transaction, TransactionKind};
