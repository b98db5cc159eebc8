use serde::{Deserialize, Serialize};
use std::fmt;

/// Payload of `GET /api/admin/dashboard`.
/// The service also sends queue stats, advisors, alerts and a timestamp; none of
/// that is needed here and it is ignored during decoding.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DashboardResponse {
    pub summary: DashboardSummary,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Tickets waiting in any queue
    pub tickets_waiting: u32,
    /// Tickets currently assigned to an advisor
    pub tickets_in_progress: u32,
    /// Tickets completed today
    pub tickets_completed: u32,
    #[serde(default)]
    pub total_tickets_today: Option<u32>,
    #[serde(default)]
    pub advisors_available: Option<u32>,
    #[serde(default)]
    pub advisors_busy: Option<u32>,
    /// Average wait in minutes
    #[serde(default)]
    pub average_wait_time: Option<f64>,
}

/// The three counters the driver makes decisions on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueSnapshot {
    pub waiting: u32,
    pub in_progress: u32,
    pub completed: u32,
}

impl QueueSnapshot {
    pub fn new(waiting: u32, in_progress: u32, completed: u32) -> Self {
        Self {
            waiting,
            in_progress,
            completed,
        }
    }

    /// Nothing left waiting or being attended.
    pub fn is_drained(&self) -> bool {
        self.waiting == 0 && self.in_progress == 0
    }
}

impl From<&DashboardSummary> for QueueSnapshot {
    fn from(summary: &DashboardSummary) -> Self {
        Self::new(
            summary.tickets_waiting,
            summary.tickets_in_progress,
            summary.tickets_completed,
        )
    }
}

impl fmt::Display for QueueSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} waiting, {} in progress, {} completed",
            self.waiting, self.in_progress, self.completed
        )
    }
}
