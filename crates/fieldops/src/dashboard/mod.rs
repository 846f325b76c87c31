//! Dashboard views: admin points, leaderboards and technician wallets over a store.

pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use router::dashboard_router;
pub use service::{DashboardService, DashboardServiceError, TicketScope};
