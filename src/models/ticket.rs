use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Service queue a ticket is filed under.
/// The service ranks queues by priority and uses the prefix for ticket numbers
/// (e.g. "C01" for the first Caja ticket of the day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueueType {
    Caja,
    PersonalBanker,
    Empresas,
    Gerencia,
}

impl QueueType {
    /// Human-readable name as shown on the service's dashboard
    pub fn display_name(&self) -> &'static str {
        match self {
            QueueType::Caja => "Caja",
            QueueType::PersonalBanker => "Personal Banker",
            QueueType::Empresas => "Empresas",
            QueueType::Gerencia => "Gerencia",
        }
    }

    /// Average attention time the service assumes for this queue
    pub fn average_minutes(&self) -> u32 {
        match self {
            QueueType::Caja => 5,
            QueueType::PersonalBanker => 15,
            QueueType::Empresas => 20,
            QueueType::Gerencia => 30,
        }
    }

    pub fn priority(&self) -> u8 {
        match self {
            QueueType::Caja => 1,
            QueueType::PersonalBanker => 2,
            QueueType::Empresas => 3,
            QueueType::Gerencia => 4,
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            QueueType::Caja => "C",
            QueueType::PersonalBanker => "P",
            QueueType::Empresas => "E",
            QueueType::Gerencia => "G",
        }
    }
}

/// Body of `POST /api/tickets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketRequest {
    /// Chilean RUT of the customer (e.g. "12345678-9")
    pub customer_rut: String,
    /// Phone number in E.164 format, used by the service for notifications
    pub customer_phone: String,
    pub queue_type: QueueType,
}

impl CreateTicketRequest {
    pub fn new(customer_rut: &str, customer_phone: &str, queue_type: QueueType) -> Self {
        Self {
            customer_rut: customer_rut.to_string(),
            customer_phone: customer_phone.to_string(),
            queue_type,
        }
    }
}

/// Ticket as returned by the service after creation.
/// Only `ticket_number` is relied upon; the rest is informational.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketResponse {
    pub ticket_number: String,
    #[serde(default)]
    pub uuid: Option<Uuid>,
    #[serde(default)]
    pub queue_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub queue_position: Option<i32>,
    #[serde(default)]
    pub estimated_wait_minutes: Option<i32>,
    #[serde(default)]
    pub advisor_name: Option<String>,
    #[serde(default)]
    pub module_number: Option<i32>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl TicketResponse {
    /// `key=value` pairs for every optional field the service filled in.
    pub fn details(&self) -> String {
        let mut parts = Vec::new();
        if let Some(uuid) = &self.uuid {
            parts.push(format!("uuid={}", uuid));
        }
        if let Some(queue_type) = &self.queue_type {
            parts.push(format!("queue_type={}", queue_type));
        }
        if let Some(status) = &self.status {
            parts.push(format!("status={}", status));
        }
        if let Some(position) = self.queue_position {
            parts.push(format!("position={}", position));
        }
        if let Some(wait) = self.estimated_wait_minutes {
            parts.push(format!("estimated_wait={}min", wait));
        }
        if let Some(advisor) = &self.advisor_name {
            parts.push(format!("advisor={}", advisor));
        }
        if let Some(module) = self.module_number {
            parts.push(format!("module={}", module));
        }
        if let Some(created_at) = &self.created_at {
            parts.push(format!("created_at={}", created_at.format("%Y-%m-%d %H:%M:%S")));
        }
        parts.join(" ")
    }
}

/// The four tickets every run submits, one per queue.
pub fn default_tickets() -> Vec<CreateTicketRequest> {
    vec![
        CreateTicketRequest::new("12345678-9", "+56912345678", QueueType::Caja),
        CreateTicketRequest::new("87654321-0", "+56987654321", QueueType::PersonalBanker),
        CreateTicketRequest::new("11111111-1", "+56911111111", QueueType::Empresas),
        CreateTicketRequest::new("22222222-2", "+56922222222", QueueType::Gerencia),
    ]
}
