use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsDto {
    pub users: u64,
    pub roles: u64,
    pub channels: u64,
    pub messages: u64,
    pub upcoming_events: u64,
}
