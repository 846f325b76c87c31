use chrono::{DateTime, Duration, TimeZone, Utc};
use fieldops::tickets::{
    AdminAggregator, AttributionMode, AttributionModes, ScoreVerdict, Ticket, TicketScorer,
    TicketStatus, Timestamp,
};

fn assigned() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 8, 30, 0)
        .single()
        .expect("valid assignment instant")
}

fn score_hours(resolved_after: i64, deadline_after: i64) -> u8 {
    let start = Timestamp::from(assigned());
    let end = Timestamp::from(assigned() + Duration::hours(resolved_after));
    let due = Timestamp::from(assigned() + Duration::hours(deadline_after));
    TicketScorer::score(Some(&start), Some(&end), Some(&due))
}

#[test]
fn worked_scenarios_score_as_documented() {
    assert_eq!(score_hours(23, 48), 100, "resolved inside the first day");
    assert_eq!(score_hours(30, 72), 90, "six hours over costs a full day");
    assert_eq!(score_hours(100, 96), 0, "past the deadline always scores zero");
}

#[test]
fn points_never_increase_as_resolution_slips() {
    let deadline = 24 * 20;
    let mut previous = u8::MAX;
    for hours in 0..deadline {
        let points = score_hours(hours, deadline);
        assert!(points <= 100);
        assert!(points <= previous, "score rose at {hours}h");
        previous = points;
    }
    assert_eq!(score_hours(deadline - 1, deadline), 0);
}

#[test]
fn penalty_matches_the_ceiling_formula() {
    for hours in 25..=24 * 12 {
        let extra_days = (hours - 24 + 23) / 24;
        let expected = (100 - 10 * extra_days).max(0) as u8;
        assert_eq!(score_hours(hours, 24 * 13), expected, "at {hours}h");
    }
}

#[test]
fn document_tickets_use_their_fallback_chains() {
    let ticket: Ticket = serde_json::from_value(serde_json::json!({
        "id": "T-100",
        "status": "completed",
        "createdAt": { "_seconds": 1_741_595_400, "_nanoseconds": 0 },
        "resolvedDate": "2025-03-11 12:00:00",
        "expectedEndDate": "2025-03-15",
        "createdBy": "mo@depot.example"
    }))
    .expect("ticket document parses");

    let score = TicketScorer::score_ticket(&ticket);

    assert_eq!(ticket.status, TicketStatus::Completed);
    assert_eq!(score.points, 90);
    assert_eq!(score.verdict, ScoreVerdict::LatePenalty { extra_days: 1 });
}

#[test]
fn malformed_first_choice_does_not_fall_through() {
    let ticket = Ticket {
        status: TicketStatus::Resolved,
        assigned_at: Some(Timestamp::text("next tuesday")),
        created_at: Some(Timestamp::from(assigned())),
        resolved_at: Some(Timestamp::from(assigned() + Duration::hours(2))),
        end_date: Some(Timestamp::from(assigned() + Duration::hours(48))),
        ..Ticket::new("T-101")
    };

    let score = TicketScorer::score_ticket(&ticket);

    assert_eq!(score.points, 0);
    assert_eq!(score.verdict, ScoreVerdict::MissingTimestamps);
}

#[test]
fn aggregate_points_cover_only_resolved_tickets() {
    let resolved_in = |id: &str, status: &str, hours: i64| Ticket {
        status: TicketStatus::parse(status),
        admin_email: Some("Desk.Lead@Depot.example".to_string()),
        assigned_at: Some(Timestamp::from(assigned())),
        resolved_at: Some(Timestamp::from(assigned() + Duration::hours(hours))),
        end_date: Some(Timestamp::from(assigned() + Duration::days(30))),
        ..Ticket::new(id)
    };
    let tickets = vec![
        resolved_in("a", "Resolved", 5),
        resolved_in("b", "RESOLVED", 50),
        resolved_in("c", "In Progress", 1),
        resolved_in("d", "", 1),
    ];

    let substring = AdminAggregator::new(AttributionModes::only(
        AttributionMode::SubstringCaseInsensitive,
    ));
    let summary = substring.aggregate(&tickets, "desk.lead@depot.example");
    assert_eq!(summary.total_tickets, 4);
    assert_eq!(summary.resolved_count, 2);
    assert_eq!(summary.pending_tickets, 2);
    assert_eq!(summary.total_points, 180);

    let exact = AdminAggregator::new(AttributionModes::only(AttributionMode::ExactEmail));
    assert_eq!(
        exact
            .aggregate(&tickets, "desk.lead@depot.example")
            .total_tickets,
        0
    );
}
