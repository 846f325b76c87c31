use crate::report::{run_leaderboard, run_points, run_wallet, LeaderboardArgs, PointsArgs, WalletArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use fieldops::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "fieldops",
    about = "Score service tickets, rank admins and settle technician wallets",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print an admin's points summary and per-ticket scores
    Points(PointsArgs),
    /// Rank several admins by points
    Leaderboard(LeaderboardArgs),
    /// Recompute a technician's wallet balance with its audit trail
    Wallet(WalletArgs),
}

/// CSV snapshots that override the configured `APP_TICKETS_CSV` / `APP_TRANSACTIONS_CSV`.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct SnapshotArgs {
    /// Ticket snapshot CSV export
    #[arg(long)]
    pub(crate) tickets: Option<PathBuf>,
    /// Ledger transaction snapshot CSV export
    #[arg(long)]
    pub(crate) transactions: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) snapshots: SnapshotArgs,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Points(args) => run_points(args),
        Command::Leaderboard(args) => run_leaderboard(args),
        Command::Wallet(args) => run_wallet(args),
    }
}
