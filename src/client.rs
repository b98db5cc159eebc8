use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{
    advisor::AdvisorStatus,
    dashboard::DashboardResponse,
    ticket::{CreateTicketRequest, TicketResponse},
};

/// Result of asking the service to complete a ticket by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    Completed,
    /// No ticket with this id; the sweep treats it as the end of the id space
    NotFound,
    Rejected(StatusCode),
}

/// Operations of the Ticketero REST API used by the driver
#[async_trait]
pub trait TicketeroApi: Send + Sync {
    async fn create_ticket(&self, request: &CreateTicketRequest) -> Result<TicketResponse, ApiError>;
    async fn set_advisor_status(&self, advisor_id: u64, status: AdvisorStatus) -> Result<(), ApiError>;
    async fn process_assignments(&self) -> Result<(), ApiError>;
    async fn complete_ticket(&self, ticket_id: u64) -> Result<CompletionOutcome, ApiError>;
    async fn dashboard(&self) -> Result<DashboardResponse, ApiError>;
}

pub struct TicketeroClient {
    client: Client,
    base_url: String,
}

impl TicketeroClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl TicketeroApi for TicketeroClient {
    #[tracing::instrument(skip_all, fields(queue = ?request.queue_type))]
    async fn create_ticket(&self, request: &CreateTicketRequest) -> Result<TicketResponse, ApiError> {
        let url = self.url("/api/tickets");
        debug!("Ticketero Request: {:?}", request);

        let resp = self.client.post(&url).json(request).send().await?;
        if resp.status() != StatusCode::CREATED {
            return Err(ApiError::UnexpectedStatus {
                status: resp.status(),
                url,
            });
        }

        decode(resp, url).await
    }

    async fn set_advisor_status(&self, advisor_id: u64, status: AdvisorStatus) -> Result<(), ApiError> {
        let url = self.url(&format!("/api/admin/advisors/{}/status", advisor_id));

        let resp = self
            .client
            .put(&url)
            .query(&[("status", status.as_query_value())])
            .send()
            .await?;

        debug!(advisor_id, status = %resp.status(), "advisor status updated");
        Ok(())
    }

    async fn process_assignments(&self) -> Result<(), ApiError> {
        let url = self.url("/api/admin/assignments/process");
        let resp = self.client.post(&url).send().await?;

        debug!(status = %resp.status(), "assignment processing triggered");
        Ok(())
    }

    async fn complete_ticket(&self, ticket_id: u64) -> Result<CompletionOutcome, ApiError> {
        let url = self.url(&format!("/api/admin/tickets/{}/complete", ticket_id));
        let resp = self.client.post(&url).send().await?;

        let outcome = match resp.status() {
            StatusCode::OK => CompletionOutcome::Completed,
            StatusCode::NOT_FOUND => CompletionOutcome::NotFound,
            other => CompletionOutcome::Rejected(other),
        };
        debug!(ticket_id, ?outcome, "completion probed");
        Ok(outcome)
    }

    async fn dashboard(&self) -> Result<DashboardResponse, ApiError> {
        let url = self.url("/api/admin/dashboard");
        let resp = self.client.get(&url).send().await?;

        if resp.status() != StatusCode::OK {
            return Err(ApiError::UnexpectedStatus {
                status: resp.status(),
                url,
            });
        }

        let dashboard: DashboardResponse = decode(resp, url).await?;
        debug!(
            waiting = dashboard.summary.tickets_waiting,
            in_progress = dashboard.summary.tickets_in_progress,
            completed = dashboard.summary.tickets_completed,
            "Ticketero dashboard fetched"
        );
        Ok(dashboard)
    }
}

/// Read the body once and decode it, keeping the JSON path of any mismatch.
async fn decode<T: DeserializeOwned>(resp: Response, url: String) -> Result<T, ApiError> {
    let body = resp.text().await?;
    let mut deserializer = serde_json::Deserializer::from_str(&body);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|source| ApiError::Decode { url, source })
}
