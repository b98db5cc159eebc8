use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::models::ticket::{CreateTicketRequest, default_tickets};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Everything a run needs: where the service lives, what to submit and how
/// long to wait between steps. Defaults reproduce the stock automation run;
/// a YAML file may override any subset of fields.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub advisor_ids: Vec<u64>,
    pub tickets: Vec<CreateTicketRequest>,
    /// Calls to the assignment endpoint per cycle
    pub assignment_rounds: u32,
    /// First and last ticket id probed by the completion sweep (inclusive)
    pub completion_first_id: u64,
    pub completion_last_id: u64,
    pub max_cycles: u32,
    pub advisor_settle_secs: u64,
    pub creation_settle_secs: u64,
    pub assignment_interval_secs: u64,
    pub post_cycle_settle_secs: u64,
    pub cycle_interval_secs: u64,
    /// Unset keeps the HTTP client's default
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            advisor_ids: (1..=6).collect(),
            tickets: default_tickets(),
            assignment_rounds: 5,
            completion_first_id: 1,
            completion_last_id: 199,
            max_cycles: 10,
            advisor_settle_secs: 2,
            creation_settle_secs: 3,
            assignment_interval_secs: 1,
            post_cycle_settle_secs: 3,
            cycle_interval_secs: 30,
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Read a YAML config file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&config_str)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_yaml(config_str: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(config_str)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            bail!("base_url must not be empty");
        }
        if self.max_cycles == 0 {
            bail!("max_cycles must be at least 1");
        }
        if self.completion_first_id > self.completion_last_id {
            bail!(
                "completion_first_id ({}) is greater than completion_last_id ({})",
                self.completion_first_id,
                self.completion_last_id
            );
        }
        if self.tickets.is_empty() {
            bail!("at least one ticket is required");
        }
        Ok(())
    }

    /// Zero every delay, for running against local fakes.
    pub fn without_delays(mut self) -> Self {
        self.advisor_settle_secs = 0;
        self.creation_settle_secs = 0;
        self.assignment_interval_secs = 0;
        self.post_cycle_settle_secs = 0;
        self.cycle_interval_secs = 0;
        self
    }

    pub fn advisor_settle(&self) -> Duration {
        Duration::from_secs(self.advisor_settle_secs)
    }

    pub fn creation_settle(&self) -> Duration {
        Duration::from_secs(self.creation_settle_secs)
    }

    pub fn assignment_interval(&self) -> Duration {
        Duration::from_secs(self.assignment_interval_secs)
    }

    pub fn post_cycle_settle(&self) -> Duration {
        Duration::from_secs(self.post_cycle_settle_secs)
    }

    pub fn cycle_interval(&self) -> Duration {
        Duration::from_secs(self.cycle_interval_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
