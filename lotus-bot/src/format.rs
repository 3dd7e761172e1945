//! Plain text rendering of card records.

use lotus_model::{
    card::{CardRecord, Currency},
    history::HistoryEntry,
};

/// Shown in place of a price or image the card does not have.
pub const UNAVAILABLE: &str = "unavailable";

/// Renders records as paragraphs separated by blank lines.
pub fn cards(records: &[CardRecord], currency: Currency) -> String {
    records
        .iter()
        .map(|record| card(record, currency))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Renders a single record.
pub fn card(record: &CardRecord, currency: Currency) -> String {
    let price = record
        .price
        .map(|price| currency.format(price))
        .unwrap_or_else(|| UNAVAILABLE.to_owned());

    format!(
        "Name: {}\nSet: {}\nType: {}\nVersion: {}\nPrice: {}\nImage: {}",
        record.name,
        record.collection_name,
        record.type_line,
        record.variant,
        price,
        record.image.as_deref().unwrap_or(UNAVAILABLE),
    )
}

/// Renders command history, one command per line.
pub fn history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "No commands yet.".to_owned();
    }

    entries
        .iter()
        .map(|entry| {
            format!(
                "{} `{}`",
                entry.timestamp.format("%Y-%m-%d %H:%M"),
                entry.command
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
