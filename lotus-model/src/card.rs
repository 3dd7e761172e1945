//! Card data models.

use rust_decimal::Decimal;

use serde::{Deserialize, Serialize};

use crate::{
    request::SortOrder,
    response::{Card, Prices},
};

/// The variant label of printings without special frame effects.
pub const REGULAR_VARIANT: &str = "Regular";

/// A snapshot of one printing, as shown to users.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct CardRecord {
    /// The card's name.
    pub name: String,
    /// The display name of the set the printing belongs to.
    pub collection_name: String,
    /// The card's type line.
    pub type_line: String,
    /// The printing's frame treatment, or [`REGULAR_VARIANT`].
    pub variant: String,
    /// The market price, if the market has one.
    pub price: Option<Decimal>,
    /// A link to an image of the printing.
    pub image: Option<String>,
}

impl CardRecord {
    /// Creates a `CardRecord` from a Scryfall card, reading the price in the
    /// given currency.
    pub fn from_card(card: &Card, currency: Currency) -> CardRecord {
        let variant = if card.frame_effects.is_empty() {
            REGULAR_VARIANT.to_owned()
        } else {
            card.frame_effects.join(", ")
        };

        CardRecord {
            name: card.name.clone(),
            collection_name: card.set_name.clone(),
            type_line: card.type_line().unwrap_or_default().to_owned(),
            variant,
            price: currency.price(&card.prices),
            image: card.image().map(ToOwned::to_owned),
        }
    }
}

/// The market a price is read from.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    /// TCGplayer market price in US dollars.
    #[default]
    Usd,
    /// Cardmarket price in euros.
    Eur,
    /// Magic Online price in event tickets.
    Tix,
}

impl Currency {
    /// Reads this currency's price out of a price table.
    pub fn price(&self, prices: &Prices) -> Option<Decimal> {
        match self {
            Currency::Usd => prices.usd,
            Currency::Eur => prices.eur,
            Currency::Tix => prices.tix,
        }
    }

    /// The search order that sorts by this currency's price.
    pub fn sort_order(&self) -> SortOrder {
        match self {
            Currency::Usd => SortOrder::Usd,
            Currency::Eur => SortOrder::Eur,
            Currency::Tix => SortOrder::Tix,
        }
    }

    /// Formats an amount of this currency.
    pub fn format(&self, amount: Decimal) -> String {
        match self {
            Currency::Usd => format!("${}", amount),
            Currency::Eur => format!("€{}", amount),
            Currency::Tix => format!("{} tix", amount),
        }
    }
}
