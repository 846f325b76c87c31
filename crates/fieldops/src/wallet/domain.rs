use crate::tickets::{Ticket, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum TransactionKind {
    Credit,
    Debit,
    #[default]
    Unknown,
}

impl TransactionKind {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "credit" => Self::Credit,
            "debit" => Self::Debit,
            _ => Self::Unknown,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
            Self::Unknown => "unknown",
        }
    }
}

impl From<Option<String>> for TransactionKind {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map(Self::parse).unwrap_or_default()
    }
}

impl From<TransactionKind> for String {
    fn from(value: TransactionKind) -> Self {
        value.label().to_string()
    }
}

/// Manual wallet adjustment recorded against a technician.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub technician_id: String,
    #[serde(default, rename = "type")]
    pub kind: TransactionKind,
    #[serde(default, deserialize_with = "crate::amount::lenient")]
    pub amount: Decimal,
    #[serde(default)]
    pub date: Option<Timestamp>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Owner of a wallet. Tickets name technicians by id or display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technician {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl Technician {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// True when `assignedTo` or `subOption` names this technician.
    pub fn owns_ticket(&self, ticket: &Ticket) -> bool {
        [&ticket.assigned_to, &ticket.sub_option]
            .into_iter()
            .flatten()
            .any(|value| self.is_named(value))
    }

    pub fn owns_transaction(&self, transaction: &Transaction) -> bool {
        let id = self.id.trim();
        !id.is_empty() && transaction.technician_id.trim() == id
    }

    fn is_named(&self, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return false;
        }

        std::iter::once(self.id.as_str())
            .chain(self.name.as_deref())
            .map(str::trim)
            .any(|candidate| !candidate.is_empty() && candidate.eq_ignore_ascii_case(value))
    }
}
