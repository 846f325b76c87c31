use super::timestamp::{first_present, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a service ticket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum TicketStatus {
    #[default]
    Unset,
    Pending,
    InProgress,
    Resolved,
    Completed,
    Other(String),
}

impl TicketStatus {
    pub fn parse(raw: &str) -> Self {
        let normalized = normalize_label(raw);
        match normalized.as_str() {
            "" => Self::Unset,
            "pending" => Self::Pending,
            "in progress" | "inprogress" => Self::InProgress,
            "resolved" => Self::Resolved,
            "completed" => Self::Completed,
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Unset => "Unset",
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Completed => "Completed",
            Self::Other(raw) => raw,
        }
    }

    /// Resolved and Completed both close a ticket for scoring purposes.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved | Self::Completed)
    }
}

impl From<Option<String>> for TicketStatus {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map(Self::parse).unwrap_or_default()
    }
}

impl From<TicketStatus> for String {
    fn from(value: TicketStatus) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Service channel of a ticket, which decides its commission treatment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum ServiceCategory {
    #[default]
    Unspecified,
    InStore,
    ThirdParty,
    Pickup,
    Other(String),
}

impl ServiceCategory {
    pub fn parse(raw: &str) -> Self {
        let normalized = normalize_label(raw);
        match normalized.as_str() {
            "" => Self::Unspecified,
            "in store" | "instore" => Self::InStore,
            "third party" | "thirdparty" | "3rd party" => Self::ThirdParty,
            "pickup" | "pick up" => Self::Pickup,
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Unspecified => "Unspecified",
            Self::InStore => "In Store",
            Self::ThirdParty => "Third Party",
            Self::Pickup => "Pickup",
            Self::Other(raw) => raw,
        }
    }
}

impl From<Option<String>> for ServiceCategory {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map(Self::parse).unwrap_or_default()
    }
}

impl From<ServiceCategory> for String {
    fn from(value: ServiceCategory) -> Self {
        value.label().to_string()
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Read-only snapshot of a ticket document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub status: TicketStatus,
    #[serde(default)]
    pub category: ServiceCategory,
    #[serde(default)]
    pub assigned_at: Option<Timestamp>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub resolved_at: Option<Timestamp>,
    #[serde(default)]
    pub resolved_date: Option<Timestamp>,
    #[serde(default)]
    pub end_date: Option<Timestamp>,
    #[serde(default)]
    pub expected_end_date: Option<Timestamp>,
    #[serde(default, deserialize_with = "crate::amount::lenient")]
    pub service_amount: Decimal,
    #[serde(default, deserialize_with = "crate::amount::lenient")]
    pub commission_amount: Decimal,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub admin_email: Option<String>,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub sub_option: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
}

impl Ticket {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// When work began: `assignedAt`, then `createdAt`.
    pub fn started_at(&self) -> Option<&Timestamp> {
        first_present([self.assigned_at.as_ref(), self.created_at.as_ref()])
    }

    /// When work finished: `resolvedAt`, then `resolvedDate`.
    pub fn finished_at(&self) -> Option<&Timestamp> {
        first_present([self.resolved_at.as_ref(), self.resolved_date.as_ref()])
    }

    /// Contractual deadline: `endDate`, then `expectedEndDate`.
    pub fn deadline(&self) -> Option<&Timestamp> {
        first_present([self.end_date.as_ref(), self.expected_end_date.as_ref()])
    }
}

fn normalize_label(raw: &str) -> String {
    raw.replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
