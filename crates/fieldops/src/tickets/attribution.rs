use super::domain::Ticket;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decides whether a ticket belongs to an admin identity.
///
/// Tickets carry free-text attribution fields rather than foreign keys, so
/// ownership is a matter of string comparison.
pub trait AttributionStrategy: Send + Sync {
    fn attributes(&self, ticket: &Ticket, identity: &str) -> bool;
}

/// A single named way of comparing attribution fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributionMode {
    /// `userEmail`, `createdBy` or `adminEmail` equal the identity.
    ExactEmail,
    /// `userName` or `createdBy` equal the identity.
    ExactName,
    /// `createdBy` or `adminEmail` contain the identity, ignoring case.
    SubstringCaseInsensitive,
}

impl AttributionMode {
    pub const fn ordered() -> [Self; 3] {
        [
            Self::ExactEmail,
            Self::ExactName,
            Self::SubstringCaseInsensitive,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::ExactEmail => "exact_email",
            Self::ExactName => "exact_name",
            Self::SubstringCaseInsensitive => "substring_case_insensitive",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, UnknownAttributionMode> {
        let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
        Self::ordered()
            .into_iter()
            .find(|mode| mode.key() == normalized)
            .ok_or_else(|| UnknownAttributionMode(raw.trim().to_string()))
    }
}

impl AttributionStrategy for AttributionMode {
    fn attributes(&self, ticket: &Ticket, identity: &str) -> bool {
        let identity = identity.trim();
        if identity.is_empty() {
            return false;
        }

        match self {
            Self::ExactEmail => [&ticket.user_email, &ticket.created_by, &ticket.admin_email]
                .into_iter()
                .any(|field| equals(field, identity)),
            Self::ExactName => [&ticket.user_name, &ticket.created_by]
                .into_iter()
                .any(|field| equals(field, identity)),
            Self::SubstringCaseInsensitive => {
                let needle = identity.to_lowercase();
                [&ticket.created_by, &ticket.admin_email]
                    .into_iter()
                    .flatten()
                    .any(|value| value.to_lowercase().contains(&needle))
            }
        }
    }
}

fn equals(field: &Option<String>, identity: &str) -> bool {
    field
        .as_deref()
        .map(|value| value.trim() == identity)
        .unwrap_or(false)
}

/// A set of modes; a ticket is attributed when any enabled mode matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributionModes {
    modes: Vec<AttributionMode>,
}

impl AttributionModes {
    pub fn new(modes: impl IntoIterator<Item = AttributionMode>) -> Self {
        let mut unique = Vec::new();
        for mode in modes {
            if !unique.contains(&mode) {
                unique.push(mode);
            }
        }
        Self { modes: unique }
    }

    pub fn only(mode: AttributionMode) -> Self {
        Self { modes: vec![mode] }
    }

    pub fn modes(&self) -> &[AttributionMode] {
        &self.modes
    }

    /// Parses a comma separated list such as `exact_email,exact_name`.
    pub fn parse_list(raw: &str) -> Result<Self, UnknownAttributionMode> {
        let modes = raw
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(AttributionMode::parse)
            .collect::<Result<Vec<_>, _>>()?;

        if modes.is_empty() {
            return Ok(Self::default());
        }

        Ok(Self::new(modes))
    }
}

impl Default for AttributionModes {
    fn default() -> Self {
        Self::new(AttributionMode::ordered())
    }
}

impl AttributionStrategy for AttributionModes {
    fn attributes(&self, ticket: &Ticket, identity: &str) -> bool {
        self.modes
            .iter()
            .any(|mode| mode.attributes(ticket, identity))
    }
}

impl fmt::Display for AttributionModes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<_> = self.modes.iter().map(|mode| mode.key()).collect();
        f.write_str(&keys.join(","))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown attribution mode '{0}' (expected exact_email, exact_name or substring_case_insensitive)")]
pub struct UnknownAttributionMode(pub String);
