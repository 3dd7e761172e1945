//! Command history.

use chrono::{DateTime, Utc};

use rust_decimal::Decimal;

use serde::{Deserialize, Serialize};

use crate::query::{Direction, Query, Scope};

/// A command a user ran, with its parsed fields.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    /// The name of the user that ran the command.
    pub username: String,
    /// The raw command text.
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    pub scope: Scope,
    /// The requested count, for ranked commands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<u32>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_low: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_high: Option<Decimal>,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Creates a new `HistoryEntry` for a command run just now.
    pub fn new(username: impl Into<String>, command: impl Into<String>, query: &Query) -> Self {
        HistoryEntry {
            username: username.into(),
            command: command.into(),
            direction: query.direction,
            scope: query.scope,
            amount: query.direction.map(|_| query.limit),
            name: query.name.clone(),
            price_low: query.price_range.map(|range| range.low()),
            price_high: query.price_range.map(|range| range.high()),
            timestamp: Utc::now(),
        }
    }
}
