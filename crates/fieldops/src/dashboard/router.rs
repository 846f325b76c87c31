use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::service::{DashboardService, DashboardServiceError, TicketScope};
use crate::store::{TicketStore, TransactionStore};
use crate::wallet::Technician;

/// Router builder exposing the admin and wallet views.
pub fn dashboard_router<T, X>(service: Arc<DashboardService<T, X>>) -> Router
where
    T: TicketStore + 'static,
    X: TransactionStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/admins/:identity/summary",
            get(admin_summary_handler::<T, X>),
        )
        .route(
            "/api/v1/admins/:identity/tickets",
            get(admin_tickets_handler::<T, X>),
        )
        .route("/api/v1/leaderboard", get(leaderboard_handler::<T, X>))
        .route(
            "/api/v1/technicians/:technician_id/wallet",
            get(wallet_handler::<T, X>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ScopeQuery {
    #[serde(default)]
    collection: TicketScope,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LeaderboardQuery {
    #[serde(default)]
    identities: String,
    #[serde(default)]
    collection: TicketScope,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct WalletQuery {
    #[serde(default)]
    name: Option<String>,
}

pub(crate) async fn admin_summary_handler<T, X>(
    State(service): State<Arc<DashboardService<T, X>>>,
    Path(identity): Path<String>,
    Query(query): Query<ScopeQuery>,
) -> Response
where
    T: TicketStore + 'static,
    X: TransactionStore + 'static,
{
    respond(service.admin_summary(&identity, &query.collection))
}

pub(crate) async fn admin_tickets_handler<T, X>(
    State(service): State<Arc<DashboardService<T, X>>>,
    Path(identity): Path<String>,
    Query(query): Query<ScopeQuery>,
) -> Response
where
    T: TicketStore + 'static,
    X: TransactionStore + 'static,
{
    respond(service.admin_tickets(&identity, &query.collection))
}

pub(crate) async fn leaderboard_handler<T, X>(
    State(service): State<Arc<DashboardService<T, X>>>,
    Query(query): Query<LeaderboardQuery>,
) -> Response
where
    T: TicketStore + 'static,
    X: TransactionStore + 'static,
{
    let identities: Vec<&str> = query
        .identities
        .split(',')
        .map(str::trim)
        .filter(|identity| !identity.is_empty())
        .collect();

    if identities.is_empty() {
        let payload = json!({
            "error": "identities query parameter must list at least one admin",
        });
        return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
    }

    respond(service.leaderboard(&identities, &query.collection))
}

pub(crate) async fn wallet_handler<T, X>(
    State(service): State<Arc<DashboardService<T, X>>>,
    Path(technician_id): Path<String>,
    Query(query): Query<WalletQuery>,
) -> Response
where
    T: TicketStore + 'static,
    X: TransactionStore + 'static,
{
    let mut technician = Technician::new(technician_id);
    if let Some(name) = query.name.filter(|name| !name.trim().is_empty()) {
        technician = technician.with_name(name);
    }

    respond(service.technician_wallet(&technician))
}

fn respond<V: Serialize>(result: Result<V, DashboardServiceError>) -> Response {
    match result {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(DashboardServiceError::Store(error)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::SERVICE_UNAVAILABLE, Json(payload)).into_response()
        }
    }
}
