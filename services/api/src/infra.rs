use crate::cli::SnapshotArgs;
use fieldops::config::AppConfig;
use fieldops::dashboard::DashboardService;
use fieldops::error::AppError;
use fieldops::import::SnapshotImporter;
use fieldops::store::InMemoryStore;
use fieldops::wallet::WalletFormula;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type SnapshotDashboard = DashboardService<InMemoryStore, InMemoryStore>;

/// Applies CLI snapshot overrides on top of the configured paths.
pub(crate) fn apply_snapshot_overrides(config: &mut AppConfig, args: SnapshotArgs) {
    if let Some(path) = args.tickets {
        config.snapshots.tickets_csv = Some(path);
    }
    if let Some(path) = args.transactions {
        config.snapshots.transactions_csv = Some(path);
    }
}

pub(crate) fn load_dashboard(config: &AppConfig) -> Result<Arc<SnapshotDashboard>, AppError> {
    let store = Arc::new(SnapshotImporter::load_store(
        config.snapshots.tickets_csv.as_deref(),
        config.snapshots.transactions_csv.as_deref(),
    )?);

    Ok(Arc::new(DashboardService::new(
        store.clone(),
        store,
        &config.scoring,
    )))
}

pub(crate) fn parse_wallet_formula(raw: &str) -> Result<WalletFormula, String> {
    WalletFormula::parse(raw).ok_or_else(|| {
        format!("unknown wallet formula '{raw}' (expected category_asymmetric or flat_net)")
    })
}
