use crate::cli::SnapshotArgs;
use crate::infra::{apply_snapshot_overrides, load_dashboard};
use clap::Args;
use fieldops::config::AppConfig;
use fieldops::dashboard::TicketScope;
use fieldops::error::AppError;
use fieldops::tickets::{AdminSummary, LeaderboardEntry, ScoredTicket};
use fieldops::wallet::{EntryKind, EntrySource, Technician, WalletFormula, WalletReport};

#[derive(Args, Debug)]
pub(crate) struct PointsArgs {
    /// Admin email or name to attribute tickets to
    pub(crate) identity: String,
    /// Restrict to one owning collection
    #[arg(long)]
    pub(crate) collection: Option<String>,
    /// List every resolved ticket with its points
    #[arg(long)]
    pub(crate) list_tickets: bool,
    #[command(flatten)]
    pub(crate) snapshots: SnapshotArgs,
}

#[derive(Args, Debug)]
pub(crate) struct LeaderboardArgs {
    /// Admin identities to rank
    #[arg(required = true)]
    pub(crate) identities: Vec<String>,
    /// Restrict to one owning collection
    #[arg(long)]
    pub(crate) collection: Option<String>,
    #[command(flatten)]
    pub(crate) snapshots: SnapshotArgs,
}

#[derive(Args, Debug)]
pub(crate) struct WalletArgs {
    /// Technician id as stored on tickets and ledger entries
    pub(crate) technician_id: String,
    /// Technician display name, also matched against ticket assignment
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// Override the configured balance formula (category_asymmetric | flat_net)
    #[arg(long, value_parser = crate::infra::parse_wallet_formula)]
    pub(crate) formula: Option<WalletFormula>,
    /// Apply the ledger even when the technician has no resolved tickets
    #[arg(long)]
    pub(crate) keep_ledger: bool,
    #[command(flatten)]
    pub(crate) snapshots: SnapshotArgs,
}

pub(crate) fn run_points(args: PointsArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    apply_snapshot_overrides(&mut config, args.snapshots);
    let dashboard = load_dashboard(&config)?;
    let scope = TicketScope::from(args.collection);

    let summary = dashboard.admin_summary(&args.identity, &scope)?;
    let tickets = if args.list_tickets {
        Some(dashboard.admin_tickets(&args.identity, &scope)?)
    } else {
        None
    };

    print_lines(&render_points(&summary, tickets.as_deref()));
    Ok(())
}

pub(crate) fn run_leaderboard(args: LeaderboardArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    apply_snapshot_overrides(&mut config, args.snapshots);
    let dashboard = load_dashboard(&config)?;

    let board = dashboard.leaderboard(&args.identities, &TicketScope::from(args.collection))?;

    print_lines(&render_leaderboard(&board));
    Ok(())
}

pub(crate) fn run_wallet(args: WalletArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    apply_snapshot_overrides(&mut config, args.snapshots);
    if let Some(formula) = args.formula {
        config.scoring.wallet.formula = formula;
    }
    if args.keep_ledger {
        config.scoring.wallet.zero_if_no_resolved_tickets = false;
    }
    let dashboard = load_dashboard(&config)?;

    let mut technician = Technician::new(args.technician_id);
    if let Some(name) = args.name {
        technician = technician.with_name(name);
    }
    let report = dashboard.technician_wallet(&technician)?;

    print_lines(&render_wallet(&report));
    Ok(())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

fn render_points(summary: &AdminSummary, tickets: Option<&[ScoredTicket]>) -> Vec<String> {
    let mut lines = vec![
        format!("Points for {}", summary.identity),
        format!(
            "- {} points from {} resolved of {} tickets ({} pending)",
            summary.total_points,
            summary.resolved_count,
            summary.total_tickets,
            summary.pending_tickets
        ),
    ];

    if let Some(tickets) = tickets {
        if tickets.is_empty() {
            lines.push("No resolved tickets.".to_string());
        }
        lines.extend(tickets.iter().map(|ticket| {
            format!(
                "  - {} [{}] {:>3} pts | {}",
                ticket.ticket_id, ticket.status, ticket.points, ticket.note
            )
        }));
    }

    lines
}

fn render_leaderboard(board: &[LeaderboardEntry]) -> Vec<String> {
    std::iter::once("Admin leaderboard".to_string())
        .chain(board.iter().map(|entry| {
            format!(
                "{:>3}. {} | {} pts | {}/{} resolved",
                entry.rank,
                entry.summary.identity,
                entry.summary.total_points,
                entry.summary.resolved_count,
                entry.summary.total_tickets
            )
        }))
        .collect()
}

fn render_wallet(report: &WalletReport) -> Vec<String> {
    let breakdown = &report.breakdown;
    let mut lines = vec![
        format!("Wallet for {} ({})", report.technician_id, report.formula),
        format!("- balance {}", report.balance),
        format!(
            "- {} resolved tickets ({} outside wallet categories)",
            breakdown.resolved_tickets, breakdown.excluded_tickets
        ),
        format!(
            "- third party: service {} | commission {}",
            breakdown.third_party_service_total, breakdown.third_party_commission_total
        ),
        format!(
            "- in store: service {} | commission {}",
            breakdown.in_store_service_total, breakdown.in_store_commission_total
        ),
        format!(
            "- ledger: credits {} | debits {}",
            breakdown.credit_total, breakdown.debit_total
        ),
    ];

    if !breakdown.entries.is_empty() {
        lines.push("Entries (newest first):".to_string());
    }
    for entry in &breakdown.entries {
        let date = entry
            .date
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "undated".to_string());
        let sign = match entry.kind {
            EntryKind::Credit => '+',
            EntryKind::Debit => '-',
        };
        let source = match &entry.source {
            EntrySource::Ticket { ticket_id, .. } => format!("ticket {ticket_id}"),
            EntrySource::Ledger { transaction_id } => format!("ledger {transaction_id}"),
        };
        lines.push(format!(
            "  {date} {sign}{} {source} | {}",
            entry.amount, entry.description
        ));
    }

    lines
}
