use super::attribution::{AttributionModes, AttributionStrategy};
use super::domain::{Ticket, TicketStatus};
use super::scoring::{ScoreVerdict, TicketScorer};
use serde::Serialize;
use std::cmp::Ordering;

/// Points and ticket counts for one admin identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminSummary {
    pub identity: String,
    pub total_points: u32,
    pub resolved_count: usize,
    pub total_tickets: usize,
    pub pending_tickets: usize,
}

/// Audit row for a resolved ticket and the points it earned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredTicket {
    pub ticket_id: String,
    pub status: TicketStatus,
    pub points: u8,
    pub verdict: ScoreVerdict,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    #[serde(flatten)]
    pub summary: AdminSummary,
}

/// Sums ticket points over the tickets attributed to an admin.
#[derive(Debug, Clone, Default)]
pub struct AdminAggregator<S = AttributionModes> {
    strategy: S,
}

impl<S: AttributionStrategy> AdminAggregator<S> {
    pub fn new(strategy: S) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn aggregate(&self, tickets: &[Ticket], identity: &str) -> AdminSummary {
        let mut total_tickets = 0;
        let mut resolved_count = 0;
        let mut total_points: u32 = 0;

        for ticket in self.attributed(tickets, identity) {
            total_tickets += 1;
            if ticket.status.is_resolved() {
                resolved_count += 1;
                total_points += u32::from(TicketScorer::score_ticket(ticket).points);
            }
        }

        AdminSummary {
            identity: identity.trim().to_string(),
            total_points,
            resolved_count,
            total_tickets,
            pending_tickets: total_tickets - resolved_count,
        }
    }

    /// Per-ticket points for the identity's resolved tickets, in input order.
    pub fn scored_tickets(&self, tickets: &[Ticket], identity: &str) -> Vec<ScoredTicket> {
        self.attributed(tickets, identity)
            .filter(|ticket| ticket.status.is_resolved())
            .map(|ticket| {
                let score = TicketScorer::score_ticket(ticket);
                ScoredTicket {
                    ticket_id: ticket.id.clone(),
                    status: ticket.status.clone(),
                    points: score.points,
                    verdict: score.verdict,
                    note: score.note(),
                }
            })
            .collect()
    }

    /// Ranks identities by points, then resolved count, then identity.
    pub fn leaderboard<I: AsRef<str>>(
        &self,
        tickets: &[Ticket],
        identities: &[I],
    ) -> Vec<LeaderboardEntry> {
        let mut unique: Vec<&str> = identities
            .iter()
            .map(|identity| identity.as_ref().trim())
            .filter(|identity| !identity.is_empty())
            .collect();
        unique.sort_unstable();
        unique.dedup();

        let mut summaries: Vec<AdminSummary> = unique
            .into_iter()
            .map(|identity| self.aggregate(tickets, identity))
            .collect();
        summaries.sort_by(compare_standing);

        summaries
            .into_iter()
            .enumerate()
            .map(|(index, summary)| LeaderboardEntry {
                rank: index + 1,
                summary,
            })
            .collect()
    }

    fn attributed<'a>(
        &'a self,
        tickets: &'a [Ticket],
        identity: &'a str,
    ) -> impl Iterator<Item = &'a Ticket> + 'a {
        tickets
            .iter()
            .filter(move |ticket| self.strategy.attributes(ticket, identity))
    }
}

fn compare_standing(left: &AdminSummary, right: &AdminSummary) -> Ordering {
    right
        .total_points
        .cmp(&left.total_points)
        .then_with(|| right.resolved_count.cmp(&left.resolved_count))
        .then_with(|| left.identity.cmp(&right.identity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tickets::attribution::AttributionMode;
    use crate::tickets::timestamp::Timestamp;

    fn ticket(id: &str, creator: &str, status: &str, resolved_hours: i64) -> Ticket {
        Ticket {
            status: TicketStatus::parse(status),
            created_by: Some(creator.to_string()),
            assigned_at: Some(Timestamp::text("2025-06-02T08:00:00Z")),
            resolved_at: Some(Timestamp::Millis(
                1_748_851_200_000 + resolved_hours * 3_600_000,
            )),
            end_date: Some(Timestamp::text("2025-06-09T08:00:00Z")),
            ..Ticket::new(id)
        }
    }

    #[test]
    fn only_resolved_tickets_earn_points() {
        let tickets = vec![
            ticket("a", "ana@ops.example", "Resolved", 10),
            ticket("b", "ana@ops.example", "completed", 30),
            ticket("c", "ana@ops.example", "Pending", 1),
            ticket("d", "ana@ops.example", "In Progress", 1),
            ticket("e", "bo@ops.example", "Resolved", 1),
        ];
        let aggregator = AdminAggregator::new(AttributionMode::ExactEmail);

        let summary = aggregator.aggregate(&tickets, "ana@ops.example");

        assert_eq!(summary.total_tickets, 4);
        assert_eq!(summary.resolved_count, 2);
        assert_eq!(summary.pending_tickets, 2);
        assert_eq!(summary.total_points, 190);
    }

    #[test]
    fn scored_tickets_explain_each_resolved_ticket() {
        let tickets = vec![
            ticket("a", "ana@ops.example", "Resolved", 10),
            ticket("b", "ana@ops.example", "Pending", 10),
        ];
        let aggregator = AdminAggregator::<AttributionModes>::default();

        let scored = aggregator.scored_tickets(&tickets, "ana@ops.example");

        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].ticket_id, "a");
        assert_eq!(scored[0].points, 100);
        assert_eq!(scored[0].verdict, ScoreVerdict::OnTime);
    }

    #[test]
    fn leaderboard_orders_by_points_then_resolved_then_identity() {
        let tickets = vec![
            ticket("a", "ana@ops.example", "Resolved", 10),
            ticket("b", "bo@ops.example", "Resolved", 10),
            ticket("c", "cy@ops.example", "Resolved", 30),
            ticket("d", "cy@ops.example", "Resolved", 200),
        ];
        let aggregator = AdminAggregator::<AttributionModes>::default();

        let board = aggregator.leaderboard(
            &tickets,
            &["cy@ops.example", "bo@ops.example", "ana@ops.example", "bo@ops.example"],
        );

        let order: Vec<_> = board
            .iter()
            .map(|entry| (entry.rank, entry.summary.identity.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                (1, "ana@ops.example"),
                (2, "bo@ops.example"),
                (3, "cy@ops.example"),
            ]
        );
        assert_eq!(board[2].summary.total_points, 90);
        assert_eq!(board[2].summary.resolved_count, 2);
    }
}
