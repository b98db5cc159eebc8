use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdvisorStatus {
    Available,
    Busy,
    Offline,
}

impl AdvisorStatus {
    /// Value expected by the `status` query parameter
    pub fn as_query_value(&self) -> &'static str {
        match self {
            AdvisorStatus::Available => "AVAILABLE",
            AdvisorStatus::Busy => "BUSY",
            AdvisorStatus::Offline => "OFFLINE",
        }
    }
}
