pub mod client;
pub mod config;
pub mod driver;
pub mod error;
pub mod models;

pub use client::{CompletionOutcome, TicketeroApi, TicketeroClient};
pub use config::Config;
pub use driver::{Driver, RunOutcome, RunReport};
pub use error::ApiError;
