//! Service tickets: domain snapshot, late-penalty scoring, and admin attribution.

pub mod admin;
pub mod attribution;
pub mod domain;
pub mod scoring;
pub mod timestamp;

pub use admin::{AdminAggregator, AdminSummary, LeaderboardEntry, ScoredTicket};
pub use attribution::{
    AttributionMode, AttributionModes, AttributionStrategy, UnknownAttributionMode,
};
pub use domain::{ServiceCategory, Ticket, TicketStatus};
pub use scoring::{ScoreVerdict, TicketScore, TicketScorer};
pub use timestamp::Timestamp;
