//! In-process stand-in for the Ticketero service.
//!
//! Tickets get dense ids starting at 1. Assignment processing moves every
//! waiting ticket to in-progress once at least one advisor is available;
//! completion accepts any known id and answers 404 beyond the last one.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketState {
    Waiting,
    InProgress,
    Completed,
}

#[derive(Debug, Default)]
pub struct MockState {
    pub tickets: Vec<(String, TicketState)>,
    pub created_bodies: Vec<Value>,
    pub available_advisors: Vec<u64>,
    pub assignment_calls: usize,
    pub completion_probes: Vec<u64>,
    pub dashboard_calls: usize,
    /// Status returned for ticket creation instead of 201
    pub reject_creation: Option<StatusCode>,
    pub dashboard_status: Option<StatusCode>,
    /// Answer ticket creation with a 201 lacking `ticketNumber`
    pub malformed_ticket: bool,
    /// Answer the dashboard with a 200 whose counters are strings
    pub malformed_dashboard: bool,
}

pub type Shared = Arc<Mutex<MockState>>;

pub struct MockTicketero {
    pub base_url: String,
    pub state: Shared,
}

impl MockTicketero {
    pub async fn start() -> Self {
        Self::start_with(MockState::default()).await
    }

    pub async fn start_with(initial: MockState) -> Self {
        let state: Shared = Arc::new(Mutex::new(initial));

        let app = Router::new()
            .route("/api/tickets", post(create_ticket))
            .route("/api/admin/advisors/:id/status", put(advisor_status))
            .route("/api/admin/assignments/process", post(process_assignments))
            .route("/api/admin/tickets/:id/complete", post(complete_ticket))
            .route("/api/admin/dashboard", get(dashboard))
            .with_state(state.clone());

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }
}

/// A base URL nothing listens on.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

async fn create_ticket(State(state): State<Shared>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    state.created_bodies.push(body.clone());

    if let Some(status) = state.reject_creation {
        return (status, Json(json!({ "message": "rejected", "status": status.as_u16() })));
    }
    if state.malformed_ticket {
        return (StatusCode::CREATED, Json(json!({ "uuid": uuid::Uuid::new_v4() })));
    }

    let prefix = match body["queueType"].as_str() {
        Some("CAJA") => "C",
        Some("PERSONAL_BANKER") => "P",
        Some("EMPRESAS") => "E",
        _ => "G",
    };
    let number = format!("{}{:02}", prefix, state.tickets.len() + 1);
    state.tickets.push((number.clone(), TicketState::Waiting));

    (
        StatusCode::CREATED,
        Json(json!({
            "uuid": uuid::Uuid::new_v4(),
            "ticketNumber": number,
            "queueType": body["queueType"],
            "status": "EN_ESPERA",
            "queuePosition": state.tickets.len(),
            "estimatedWaitMinutes": 5,
            "advisorName": null,
            "moduleNumber": null,
            "createdAt": "2025-01-15T10:30:00"
        })),
    )
}

#[derive(Deserialize)]
struct StatusQuery {
    status: String,
}

async fn advisor_status(
    State(state): State<Shared>,
    Path(id): Path<u64>,
    Query(query): Query<StatusQuery>,
) -> StatusCode {
    let mut state = state.lock().unwrap();
    if query.status == "AVAILABLE" && !state.available_advisors.contains(&id) {
        state.available_advisors.push(id);
    }
    StatusCode::OK
}

async fn process_assignments(State(state): State<Shared>) -> StatusCode {
    let mut state = state.lock().unwrap();
    state.assignment_calls += 1;
    if !state.available_advisors.is_empty() {
        for (_, ticket_state) in state.tickets.iter_mut() {
            if *ticket_state == TicketState::Waiting {
                *ticket_state = TicketState::InProgress;
            }
        }
    }
    StatusCode::OK
}

async fn complete_ticket(State(state): State<Shared>, Path(id): Path<u64>) -> StatusCode {
    let mut state = state.lock().unwrap();
    state.completion_probes.push(id);

    let index = (id as usize).wrapping_sub(1);
    match state.tickets.get_mut(index) {
        Some((_, ticket_state)) if *ticket_state == TicketState::InProgress => {
            *ticket_state = TicketState::Completed;
            StatusCode::OK
        }
        Some(_) => StatusCode::BAD_REQUEST,
        None => StatusCode::NOT_FOUND,
    }
}

async fn dashboard(State(state): State<Shared>) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    state.dashboard_calls += 1;

    if let Some(status) = state.dashboard_status {
        return (status, Json(json!({ "message": "unavailable" })));
    }
    if state.malformed_dashboard {
        return (
            StatusCode::OK,
            Json(json!({
                "summary": { "ticketsWaiting": "x", "ticketsInProgress": 0, "ticketsCompleted": 0 }
            })),
        );
    }

    let count = |wanted: TicketState| state.tickets.iter().filter(|(_, s)| *s == wanted).count();
    (
        StatusCode::OK,
        Json(json!({
            "summary": {
                "totalTicketsToday": state.tickets.len(),
                "ticketsWaiting": count(TicketState::Waiting),
                "ticketsInProgress": count(TicketState::InProgress),
                "ticketsCompleted": count(TicketState::Completed),
                "advisorsAvailable": state.available_advisors.len(),
                "advisorsBusy": 0,
                "averageWaitTime": 0.0
            },
            "queueStats": [],
            "advisors": [],
            "alerts": [],
            "lastUpdated": "2025-01-15T10:30:00"
        })),
    )
}
