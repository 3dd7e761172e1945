//! Scryfall API request models.

use serde::{Deserialize, Serialize};

/// Query string of the `GET /cards/search` endpoint.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SearchCardsQuery {
    /// The full-text search expression.
    pub q: String,
    /// The field results are sorted by, server side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
    /// The direction results are sorted in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<SortDir>,
    /// How duplicate printings are collapsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<Unique>,
}

impl SearchCardsQuery {
    /// Creates a new `SearchCardsQuery` with server defaults.
    pub fn new(q: impl Into<String>) -> SearchCardsQuery {
        SearchCardsQuery {
            q: q.into(),
            order: None,
            dir: None,
            unique: None,
        }
    }
}

/// Search sort fields.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Usd,
    Eur,
    Tix,
}

/// Search sort directions.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    Asc,
    Desc,
}

/// Search duplicate collapsing strategies.
///
/// The server default collapses results to one per card design.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unique {
    /// Every printing.
    Prints,
}
