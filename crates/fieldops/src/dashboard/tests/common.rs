use std::sync::Arc;

use axum::response::Response;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::config::ScoringConfig;
use crate::dashboard::{dashboard_router, DashboardService};
use crate::store::{InMemoryStore, StoreError, TicketStore, TransactionStore};
use crate::tickets::{ServiceCategory, Ticket, TicketStatus, Timestamp};
use crate::wallet::{Transaction, TransactionKind};

pub(super) const ADMIN: &str = "lee@fixit.example";
pub(super) const TECHNICIAN: &str = "tech-9";

pub(super) fn ticket(
    id: &str,
    status: TicketStatus,
    category: ServiceCategory,
    resolved_at: &str,
    service: Decimal,
    commission: Decimal,
) -> Ticket {
    Ticket {
        status,
        category,
        created_by: Some(ADMIN.to_string()),
        assigned_to: Some(TECHNICIAN.to_string()),
        assigned_at: Some(Timestamp::text("2025-07-01T09:00:00Z")),
        resolved_at: Some(Timestamp::text(resolved_at)),
        end_date: Some(Timestamp::text("2025-07-04T09:00:00Z")),
        service_amount: service,
        commission_amount: commission,
        ..Ticket::new(id)
    }
}

pub(super) fn transaction(id: &str, kind: TransactionKind, amount: Decimal) -> Transaction {
    Transaction {
        id: id.to_string(),
        technician_id: TECHNICIAN.to_string(),
        kind,
        amount,
        date: Some(Timestamp::text("2025-07-05")),
        description: None,
    }
}

/// Two collections: `north` holds resolved work, `south` an open ticket.
pub(super) fn store() -> InMemoryStore {
    InMemoryStore::new()
        .with_tickets(
            "north",
            [
                ticket(
                    "n-1",
                    TicketStatus::Resolved,
                    ServiceCategory::InStore,
                    "2025-07-01T20:00:00Z",
                    Decimal::from(500),
                    Decimal::from(100),
                ),
                ticket(
                    "n-2",
                    TicketStatus::Resolved,
                    ServiceCategory::ThirdParty,
                    "2025-07-02T08:00:00Z",
                    Decimal::from(300),
                    Decimal::from(50),
                ),
            ],
        )
        .with_tickets(
            "south",
            [ticket(
                "s-1",
                TicketStatus::Pending,
                ServiceCategory::InStore,
                "",
                Decimal::from(80),
                Decimal::from(8),
            )],
        )
        .with_transactions([transaction("tx-1", TransactionKind::Credit, Decimal::from(25))])
}

pub(super) fn build_service() -> Arc<DashboardService<InMemoryStore, InMemoryStore>> {
    let store = Arc::new(store());
    Arc::new(DashboardService::new(
        store.clone(),
        store,
        &ScoringConfig::default(),
    ))
}

pub(super) fn router() -> axum::Router {
    dashboard_router(build_service())
}

pub(super) struct UnavailableStore;

impl TicketStore for UnavailableStore {
    fn tickets_in(&self, _collection: &str) -> Result<Vec<Ticket>, StoreError> {
        Err(StoreError::Unavailable("tickets offline".to_string()))
    }

    fn all_tickets(&self) -> Result<Vec<Ticket>, StoreError> {
        Err(StoreError::Unavailable("tickets offline".to_string()))
    }
}

impl TransactionStore for UnavailableStore {
    fn all_transactions(&self) -> Result<Vec<Transaction>, StoreError> {
        Err(StoreError::Unavailable("ledger offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
