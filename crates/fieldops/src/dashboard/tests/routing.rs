use super::common::*;
use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::{Request, StatusCode};
use std::sync::Arc;
use tower::ServiceExt;

use crate::config::ScoringConfig;
use crate::dashboard::router::{admin_summary_handler, ScopeQuery};
use crate::dashboard::DashboardService;

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request builds")
}

#[tokio::test]
async fn summary_route_returns_points_and_counts() {
    let response = router()
        .oneshot(get("/api/v1/admins/lee@fixit.example/summary"))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["identity"], ADMIN);
    assert_eq!(body["total_points"], 200);
    assert_eq!(body["resolved_count"], 2);
    assert_eq!(body["total_tickets"], 3);
    assert_eq!(body["pending_tickets"], 1);
}

#[tokio::test]
async fn summary_route_honours_collection_scope() {
    let response = router()
        .oneshot(get("/api/v1/admins/lee@fixit.example/summary?collection=north"))
        .await
        .expect("route responds");

    let body = read_json_body(response).await;
    assert_eq!(body["total_tickets"], 2);
}

#[tokio::test]
async fn tickets_route_lists_scored_tickets() {
    let response = router()
        .oneshot(get("/api/v1/admins/lee@fixit.example/tickets"))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let rows = body.as_array().expect("array body");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["ticket_id"], "n-1");
    assert_eq!(rows[0]["points"], 100);
    assert_eq!(rows[0]["verdict"]["kind"], "on_time");
    assert_eq!(rows[1]["points"], 100);
}

#[tokio::test]
async fn leaderboard_route_ranks_requested_identities() {
    let response = router()
        .oneshot(get(
            "/api/v1/leaderboard?identities=nobody@fixit.example,lee@fixit.example",
        ))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body[0]["rank"], 1);
    assert_eq!(body[0]["identity"], ADMIN);
    assert_eq!(body[1]["identity"], "nobody@fixit.example");
    assert_eq!(body[1]["total_points"], 0);
}

#[tokio::test]
async fn leaderboard_route_requires_identities() {
    let response = router()
        .oneshot(get("/api/v1/leaderboard"))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wallet_route_returns_balance_and_breakdown() {
    let response = router()
        .oneshot(get("/api/v1/technicians/tech-9/wallet"))
        .await
        .expect("route responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["technician_id"], TECHNICIAN);
    assert_eq!(body["formula"], "category_asymmetric");
    assert_eq!(body["balance"], "375");
    let entries = body["breakdown"]["entries"].as_array().expect("entries");
    assert_eq!(entries[0]["source"]["type"], "ledger");
}

#[tokio::test]
async fn summary_handler_reports_store_outage() {
    let store = Arc::new(UnavailableStore);
    let service = Arc::new(DashboardService::new(
        store.clone(),
        store,
        &ScoringConfig::default(),
    ));

    let response = admin_summary_handler::<UnavailableStore, UnavailableStore>(
        State(service),
        Path(ADMIN.to_string()),
        Query(ScopeQuery::default()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("tickets offline"));
}
