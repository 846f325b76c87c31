use crate::tickets::{AttributionModes, UnknownAttributionMode};
use crate::wallet::{WalletConfig, WalletFormula};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub scoring: ScoringConfig,
    pub snapshots: SnapshotConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let attribution = match env::var("APP_ATTRIBUTION_MODES") {
            Ok(raw) => AttributionModes::parse_list(&raw).map_err(ConfigError::Attribution)?,
            Err(_) => AttributionModes::default(),
        };

        let formula = match env::var("APP_WALLET_FORMULA") {
            Ok(raw) => WalletFormula::parse(&raw).ok_or(ConfigError::InvalidWalletFormula(raw))?,
            Err(_) => WalletFormula::default(),
        };

        let zero_if_no_resolved_tickets = match env::var("APP_WALLET_ZERO_WITHOUT_RESOLVED") {
            Ok(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidFlag {
                name: "APP_WALLET_ZERO_WITHOUT_RESOLVED",
                value: raw,
            })?,
            Err(_) => true,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            scoring: ScoringConfig {
                attribution,
                wallet: WalletConfig {
                    formula,
                    zero_if_no_resolved_tickets,
                },
            },
            snapshots: SnapshotConfig {
                tickets_csv: optional_path("APP_TICKETS_CSV"),
                transactions_csv: optional_path("APP_TRANSACTIONS_CSV"),
            },
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn optional_path(name: &str) -> Option<PathBuf> {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Business rules that differ between dashboard surfaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoringConfig {
    pub attribution: AttributionModes,
    pub wallet: WalletConfig,
}

/// CSV exports used to hydrate the in-memory store.
#[derive(Debug, Clone, Default)]
pub struct SnapshotConfig {
    pub tickets_csv: Option<PathBuf>,
    pub transactions_csv: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    Attribution(UnknownAttributionMode),
    InvalidWalletFormula(String),
    InvalidFlag { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::Attribution(err) => write!(f, "APP_ATTRIBUTION_MODES: {err}"),
            ConfigError::InvalidWalletFormula(value) => write!(
                f,
                "APP_WALLET_FORMULA must be category_asymmetric or flat_net (got '{value}')"
            ),
            ConfigError::InvalidFlag { name, value } => {
                write!(f, "{name} must be true or false (got '{value}')")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::Attribution(err) => Some(err),
            ConfigError::InvalidPort
            | ConfigError::InvalidWalletFormula(_)
            | ConfigError::InvalidFlag { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tickets::AttributionMode;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for name in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_ATTRIBUTION_MODES",
            "APP_WALLET_FORMULA",
            "APP_WALLET_ZERO_WITHOUT_RESOLVED",
            "APP_TICKETS_CSV",
            "APP_TRANSACTIONS_CSV",
        ] {
            env::remove_var(name);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.scoring, ScoringConfig::default());
        assert!(config.scoring.wallet.zero_if_no_resolved_tickets);
        assert!(config.snapshots.tickets_csv.is_none());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_scoring_rules_and_snapshots() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ATTRIBUTION_MODES", "substring_case_insensitive");
        env::set_var("APP_WALLET_FORMULA", "flat-net");
        env::set_var("APP_WALLET_ZERO_WITHOUT_RESOLVED", "off");
        env::set_var("APP_TICKETS_CSV", "data/tickets.csv");

        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(
            config.scoring.attribution.modes(),
            &[AttributionMode::SubstringCaseInsensitive]
        );
        assert_eq!(config.scoring.wallet.formula, WalletFormula::FlatNet);
        assert!(!config.scoring.wallet.zero_if_no_resolved_tickets);
        assert_eq!(
            config.snapshots.tickets_csv,
            Some(PathBuf::from("data/tickets.csv"))
        );
    }

    #[test]
    fn rejects_unknown_wallet_formula_and_flags() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_WALLET_FORMULA", "generous");
        let error = AppConfig::load().expect_err("formula rejected");
        assert!(matches!(error, ConfigError::InvalidWalletFormula(ref value) if value == "generous"));

        reset_env();
        env::set_var("APP_WALLET_ZERO_WITHOUT_RESOLVED", "maybe");
        let error = AppConfig::load().expect_err("flag rejected");
        assert!(error.to_string().contains("APP_WALLET_ZERO_WITHOUT_RESOLVED"));
        reset_env();
    }
}
