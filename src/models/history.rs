use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub calculator: String,
    pub timestamp: String, // RFC 3339
    pub data: serde_json::Value,
}

/// History keys used by calculators that save on the caller's behalf
pub const DEBT_PAYOFF_KEY: &str = "debtPayoff";

/// Default retention per calculator
pub const DEFAULT_HISTORY_LIMIT: usize = 50;
