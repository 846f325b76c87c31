use super::domain::Ticket;
use super::timestamp::Timestamp;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Points awarded for a ticket closed within the grace window.
pub const MAX_POINTS: u8 = 100;

/// Points lost per started day beyond the grace window.
pub const PENALTY_PER_DAY: u8 = 10;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Why a ticket earned the points it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreVerdict {
    OnTime,
    LatePenalty { extra_days: i64 },
    PastDeadline,
    MissingTimestamps,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TicketScore {
    pub points: u8,
    pub verdict: ScoreVerdict,
}

impl TicketScore {
    const fn zero(verdict: ScoreVerdict) -> Self {
        Self { points: 0, verdict }
    }

    pub fn note(&self) -> String {
        match self.verdict {
            ScoreVerdict::OnTime => "resolved within 24 hours".to_string(),
            ScoreVerdict::LatePenalty { extra_days } => {
                format!("{extra_days} day(s) past the 24 hour window")
            }
            ScoreVerdict::PastDeadline => "resolved after the deadline".to_string(),
            ScoreVerdict::MissingTimestamps => {
                "missing or unreadable start, resolution or deadline".to_string()
            }
        }
    }
}

/// Deterministic late-penalty scoring for a single ticket.
///
/// Scoring never consults the current time and never fails: missing or
/// unreadable timestamps produce zero points.
#[derive(Debug, Clone, Copy, Default)]
pub struct TicketScorer;

impl TicketScorer {
    pub fn score(
        assigned_at: Option<&Timestamp>,
        resolved_at: Option<&Timestamp>,
        deadline: Option<&Timestamp>,
    ) -> u8 {
        Self::assess(assigned_at, resolved_at, deadline).points
    }

    pub fn assess(
        assigned_at: Option<&Timestamp>,
        resolved_at: Option<&Timestamp>,
        deadline: Option<&Timestamp>,
    ) -> TicketScore {
        let start = assigned_at.and_then(Timestamp::instant);
        let end = resolved_at.and_then(Timestamp::instant);
        let due = deadline.and_then(Timestamp::instant);

        match (start, end, due) {
            (Some(start), Some(end), Some(due)) => Self::assess_instants(start, end, due),
            _ => TicketScore::zero(ScoreVerdict::MissingTimestamps),
        }
    }

    pub fn assess_instants(
        assigned_at: DateTime<Utc>,
        resolved_at: DateTime<Utc>,
        deadline: DateTime<Utc>,
    ) -> TicketScore {
        if resolved_at > deadline {
            return TicketScore::zero(ScoreVerdict::PastDeadline);
        }

        let elapsed_ms = (resolved_at - assigned_at).num_milliseconds();
        if elapsed_ms <= DAY_MS {
            return TicketScore {
                points: MAX_POINTS,
                verdict: ScoreVerdict::OnTime,
            };
        }

        // Any started day past the window counts in full.
        let overrun_ms = elapsed_ms - DAY_MS;
        let extra_days = overrun_ms / DAY_MS + i64::from(overrun_ms % DAY_MS != 0);
        let penalty = extra_days.saturating_mul(i64::from(PENALTY_PER_DAY));
        let points = (i64::from(MAX_POINTS) - penalty).max(0);

        TicketScore {
            points: u8::try_from(points).unwrap_or(0),
            verdict: ScoreVerdict::LatePenalty { extra_days },
        }
    }

    /// Scores a ticket using its start, resolution and deadline fallback chains.
    pub fn score_ticket(ticket: &Ticket) -> TicketScore {
        Self::assess(ticket.started_at(), ticket.finished_at(), ticket.deadline())
    }
}
