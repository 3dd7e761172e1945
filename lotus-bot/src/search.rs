//! Card searches.
//!
//! A search is ordered by the configured market's price and walks result
//! pages until it has what it needs. A card search matching exactly one card
//! is widened to every printing of that card, so cards like `Sol Ring` show
//! their full price spread instead of a single printing.

use lotus_model::{
    card::CardRecord,
    query::{Direction, Query},
    request::{SortDir, Unique},
    response::{Card, List},
};

use tracing::instrument;

use crate::{
    error::Error,
    http::{Client, RequestError},
    resolve::SetCode,
};

/// What a search looks for.
#[derive(Clone, Copy, Debug)]
pub enum Target<'a> {
    /// Cards with exactly this name.
    Card(&'a str),
    /// Every card in a set.
    Set(&'a SetCode),
}

impl Target<'_> {
    /// The Scryfall search expression for the target.
    pub fn expression(&self) -> String {
        match self {
            Target::Card(name) => {
                let name = name.replace('\\', "\\\\").replace('"', "\\\"");
                format!("!\"{}\"", name)
            }
            Target::Set(code) => format!("set:{}", code),
        }
    }
}

/// How a query's search is sorted and paged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Plan {
    /// The direction Scryfall sorts prices in.
    pub dir: SortDir,
    /// How many records are needed before pagination may stop early.
    ///
    /// Ranked queries are sorted by Scryfall the way they will be shown, so
    /// their first pages are the answer. Range queries need every page.
    pub wanted: Option<usize>,
}

impl Plan {
    /// Plans the search for a query.
    pub fn for_query(query: &Query) -> Plan {
        let dir = match query.direction {
            Some(Direction::High) => SortDir::Desc,
            Some(Direction::Low) | None => SortDir::Asc,
        };

        Plan {
            dir,
            wanted: query.truncate_to(),
        }
    }
}

/// Searches for the target's cards.
///
/// A search that matches nothing comes back empty.
#[instrument(skip(client))]
pub async fn search(
    client: &Client,
    target: Target<'_>,
    plan: Plan,
) -> Result<Vec<CardRecord>, Error> {
    let Some(first) = search_page(client, target.expression(), plan.dir, None).await? else {
        return Ok(Vec::new());
    };

    let first = if matches!(target, Target::Card(_)) && first.data.len() == 1 {
        let card = &first.data[0];
        let oracle_id = card
            .oracle_id()
            .ok_or_else(|| Error::MissingOracleId(card.name.clone()))?;

        tracing::debug!(oracle_id, "single match, expanding to every printing");

        let expression = format!("oracleid:{}", oracle_id);
        match search_page(client, expression, plan.dir, Some(Unique::Prints)).await? {
            Some(page) => page,
            None => return Ok(Vec::new()),
        }
    } else {
        first
    };

    let cards = collect_pages(client, first, plan.wanted).await;
    let currency = client.currency();

    tracing::debug!(count = cards.len(), "search finished");

    Ok(cards
        .iter()
        .map(|card| CardRecord::from_card(card, currency))
        .collect())
}

/// Fetches the first page of a search, or `None` if nothing matched.
async fn search_page(
    client: &Client,
    expression: String,
    dir: SortDir,
    unique: Option<Unique>,
) -> Result<Option<List<Card>>, RequestError> {
    let mut request = client
        .search_cards(expression)
        .order(client.currency().sort_order())
        .dir(dir);
    if let Some(unique) = unique {
        request = request.unique(unique);
    }

    match request.await {
        Ok(page) => Ok(Some(page)),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => Err(err),
    }
}

/// Follows `next_page` links from the first page.
///
/// Stops once `wanted` cards are collected, the pages run out, or the page
/// cap is hit. A failing follow-up page ends the walk with what was already
/// collected.
async fn collect_pages(client: &Client, first: List<Card>, wanted: Option<usize>) -> Vec<Card> {
    let mut cards = first.data;
    let mut next_page = first.next_page.filter(|_| first.has_more);
    let mut pages = 1;

    while let Some(url) = next_page.take() {
        if wanted.is_some_and(|wanted| cards.len() >= wanted) {
            break;
        }

        if pages >= client.max_pages() {
            tracing::warn!(
                pages,
                collected = cards.len(),
                "page cap reached, results are partial"
            );
            break;
        }

        match client.fetch_page::<Card>(url).await {
            Ok(page) => {
                cards.extend(page.data);
                next_page = page.next_page.filter(|_| page.has_more);
                pages += 1;
            }
            Err(err) => {
                tracing::warn!(%err, pages, "failed to fetch page, results are partial");
            }
        }
    }

    cards
}
