//! Ticket scoring, admin leaderboards and technician wallet accounting.
//!
//! The computation core ([`tickets`] and [`wallet`]) is pure: it takes
//! in-memory snapshots and never fails. The remaining modules wire it to
//! CSV snapshots, a store abstraction, HTTP routes and configuration.

pub mod amount;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod import;
pub mod store;
pub mod telemetry;
pub mod tickets;
pub mod wallet;
