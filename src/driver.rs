//! Sequential run against the Ticketero service: activate advisors, submit the
//! ticket batch, then alternate assignment processing with completion sweeps
//! until the dashboard reports nothing pending or the cycle budget runs out.

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::client::{CompletionOutcome, TicketeroApi};
use crate::config::Config;
use crate::models::{advisor::AdvisorStatus, dashboard::QueueSnapshot};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every creation request failed; nothing else was attempted
    NoTicketsCreated,
    /// The first dashboard poll showed no waiting tickets
    NothingWaiting,
    /// A poll after `cycles` cycles showed nothing waiting or in progress
    Drained { cycles: u32 },
    BudgetExhausted { cycles: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub tickets_created: usize,
    /// Tickets the completion sweeps reported as completed, over all cycles
    pub completed_by_sweep: usize,
    pub final_status: QueueSnapshot,
}

pub struct Driver<A> {
    api: A,
    config: Config,
}

impl<A: TicketeroApi> Driver<A> {
    pub fn new(api: A, config: Config) -> Self {
        Self { api, config }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Mark every configured advisor available. Responses are not checked.
    pub async fn activate_advisors(&self) {
        for &advisor_id in &self.config.advisor_ids {
            if let Err(error) = self.api.set_advisor_status(advisor_id, AdvisorStatus::Available).await {
                debug!(advisor_id, %error, "advisor status update failed");
            }
        }
        info!(advisors = self.config.advisor_ids.len(), "all advisors set to available");
    }

    /// Submit the ticket batch in order and return how many were created.
    pub async fn create_tickets(&self) -> usize {
        let mut created = 0;

        for (index, request) in self.config.tickets.iter().enumerate() {
            let position = index + 1;
            match self.api.create_ticket(request).await {
                Ok(ticket) => {
                    info!(
                        ticket_number = %ticket.ticket_number,
                        queue = request.queue_type.display_name(),
                        queue_priority = request.queue_type.priority(),
                        queue_average_minutes = request.queue_type.average_minutes(),
                        "ticket {} created {}",
                        position,
                        ticket.details()
                    );
                    created += 1;
                }
                Err(error) => {
                    warn!(%error, "error creating ticket {}", position);
                }
            }
        }

        created
    }

    /// Trigger assignment processing a few times, then sweep ticket ids
    /// forcing completion. Returns the number of tickets completed.
    pub async fn process_cycle(&self) -> usize {
        for round in 1..=self.config.assignment_rounds {
            if let Err(error) = self.api.process_assignments().await {
                debug!(round, %error, "assignment processing failed");
            }
            sleep(self.config.assignment_interval()).await;
        }

        self.sweep_completions().await
    }

    /// Probe ids in increasing order. Stops at the first id the service does
    /// not know; every other failure is skipped.
    async fn sweep_completions(&self) -> usize {
        let mut completed = 0;

        for ticket_id in self.config.completion_first_id..=self.config.completion_last_id {
            match self.api.complete_ticket(ticket_id).await {
                Ok(CompletionOutcome::Completed) => completed += 1,
                Ok(CompletionOutcome::NotFound) => {
                    debug!(ticket_id, "no ticket with this id, ending sweep");
                    break;
                }
                Ok(CompletionOutcome::Rejected(status)) => {
                    debug!(ticket_id, %status, "completion rejected");
                }
                Err(error) => {
                    debug!(ticket_id, %error, "completion request failed");
                }
            }
        }

        completed
    }

    /// Current counters, or all zeros if the dashboard cannot be read.
    pub async fn poll_status(&self) -> QueueSnapshot {
        match self.api.dashboard().await {
            Ok(dashboard) => {
                let summary = &dashboard.summary;
                debug!(
                    total_today = ?summary.total_tickets_today,
                    advisors_available = ?summary.advisors_available,
                    advisors_busy = ?summary.advisors_busy,
                    average_wait = ?summary.average_wait_time,
                    "dashboard details"
                );
                QueueSnapshot::from(summary)
            }
            Err(error) => {
                debug!(%error, "dashboard unavailable, reporting zeros");
                QueueSnapshot::default()
            }
        }
    }

    #[tracing::instrument(skip_all, fields(base_url = %self.config.base_url))]
    pub async fn run(&self) -> RunReport {
        info!("=== starting ticket flow automation ===");

        self.activate_advisors().await;
        sleep(self.config.advisor_settle()).await;

        info!("creating {} tickets...", self.config.tickets.len());
        let tickets_created = self.create_tickets().await;
        if tickets_created == 0 {
            warn!("no tickets could be created, stopping");
            return RunReport {
                outcome: RunOutcome::NoTicketsCreated,
                tickets_created,
                completed_by_sweep: 0,
                final_status: QueueSnapshot::default(),
            };
        }
        info!("created {} tickets", tickets_created);
        sleep(self.config.creation_settle()).await;

        let initial = self.poll_status().await;
        info!("initial status: {}", initial);
        if initial.waiting == 0 {
            info!("no tickets waiting, nothing to process");
            return RunReport {
                outcome: RunOutcome::NothingWaiting,
                tickets_created,
                completed_by_sweep: 0,
                final_status: initial,
            };
        }

        let max_cycles = self.config.max_cycles;
        let mut completed_by_sweep = 0;
        let mut outcome = RunOutcome::BudgetExhausted { cycles: max_cycles };

        for cycle in 1..=max_cycles {
            info!("--- cycle {} of {} ---", cycle, max_cycles);

            let completed_this_cycle = self.process_cycle().await;
            completed_by_sweep += completed_this_cycle;
            info!("completed {} tickets this cycle", completed_this_cycle);

            sleep(self.config.post_cycle_settle()).await;

            let status = self.poll_status().await;
            info!("status: {}", status);

            if status.is_drained() {
                info!(total_completed = status.completed, "all tickets processed");
                outcome = RunOutcome::Drained { cycles: cycle };
                break;
            }

            // Sparse or non-sequential ids end the sweep early and leave work behind.
            if completed_this_cycle == 0 {
                warn!(
                    pending = status.waiting + status.in_progress,
                    "sweep completed nothing while tickets are still pending"
                );
            }

            if cycle < max_cycles {
                info!(
                    "waiting {}s for the next cycle...",
                    self.config.cycle_interval().as_secs()
                );
                sleep(self.config.cycle_interval()).await;
            }
        }

        let final_status = self.poll_status().await;
        info!("=== final status ===");
        info!(
            waiting = final_status.waiting,
            in_progress = final_status.in_progress,
            completed = final_status.completed,
            ?outcome,
            "run finished"
        );

        RunReport {
            outcome,
            tickets_created,
            completed_by_sweep,
            final_status,
        }
    }
}
