//! Scryfall API responses.

use rust_decimal::Decimal;

use serde::{Deserialize, Serialize};

/// A page of a Scryfall list object.
///
/// Searches that match more objects than fit on a page set `has_more` and
/// link the next page through `next_page`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct List<T> {
    /// The objects on this page.
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    /// Whether there are pages after this one.
    #[serde(default)]
    pub has_more: bool,
    /// The absolute URL of the next page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,
}

/// A single card printing.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Card {
    /// Identifies the card design, shared by every printing of it.
    ///
    /// Missing for reversible cards, whose faces carry it instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oracle_id: Option<String>,
    pub name: String,
    /// The display name of the set this printing belongs to.
    pub set_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_line: Option<String>,
    /// Special frame treatments of this printing, like `showcase`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frame_effects: Vec<String>,
    #[serde(default)]
    pub prices: Prices,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uris: Option<ImageUris>,
    /// The faces of multi-faced cards.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub card_faces: Vec<CardFace>,
}

impl Card {
    /// The oracle id of the card, falling back to its first face.
    pub fn oracle_id(&self) -> Option<&str> {
        self.oracle_id
            .as_deref()
            .or_else(|| self.card_faces.iter().find_map(|face| face.oracle_id.as_deref()))
    }

    /// The type line of the card, falling back to its first face.
    pub fn type_line(&self) -> Option<&str> {
        self.type_line
            .as_deref()
            .or_else(|| self.card_faces.iter().find_map(|face| face.type_line.as_deref()))
    }

    /// The normal-sized image of the card, falling back to its first face.
    pub fn image(&self) -> Option<&str> {
        self.image_uris
            .as_ref()
            .and_then(|uris| uris.normal.as_deref())
            .or_else(|| {
                self.card_faces
                    .iter()
                    .find_map(|face| face.image_uris.as_ref()?.normal.as_deref())
            })
    }
}

/// One face of a multi-faced card.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CardFace {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oracle_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uris: Option<ImageUris>,
}

/// Market prices of a printing.
///
/// A price is `None` when the market has no price for the printing.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Prices {
    #[serde(default)]
    pub usd: Option<Decimal>,
    #[serde(default)]
    pub eur: Option<Decimal>,
    #[serde(default)]
    pub tix: Option<Decimal>,
}

/// Image links of a card.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ImageUris {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal: Option<String>,
}

/// A set.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Set {
    /// The short code used to search for the set's cards.
    pub code: String,
    /// The display name of the set.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    use rust_decimal_macros::dec;

    #[test]
    fn decodes_search_page() {
        let page: List<Card> = serde_json::from_str(
            r#"{
                "object": "list",
                "total_cards": 2,
                "has_more": true,
                "next_page": "https://api.scryfall.com/cards/search?page=2",
                "data": [
                    {
                        "oracle_id": "5089ec1a",
                        "name": "Black Lotus",
                        "set_name": "Limited Edition Alpha",
                        "type_line": "Artifact",
                        "prices": { "usd": "27500.00", "usd_foil": null, "eur": null, "tix": null },
                        "image_uris": { "normal": "https://cards.scryfall.io/normal/lotus.jpg" }
                    },
                    {
                        "name": "Black Lotus",
                        "set_name": "30th Anniversary Edition",
                        "type_line": "Artifact",
                        "frame_effects": ["legendary"],
                        "prices": { "usd": null }
                    }
                ]
            }"#,
        )
        .unwrap();

        assert!(page.has_more);
        assert_eq!(page.data.len(), 2);

        let first = &page.data[0];
        assert_eq!(first.oracle_id(), Some("5089ec1a"));
        assert_eq!(first.prices.usd, Some(dec!(27500.00)));
        assert_eq!(first.image(), Some("https://cards.scryfall.io/normal/lotus.jpg"));

        let second = &page.data[1];
        assert_eq!(second.prices.usd, None);
        assert_eq!(second.image(), None);
        assert_eq!(second.frame_effects, ["legendary"]);
    }

    #[test]
    fn multi_faced_cards_fall_back_to_faces() {
        let card: Card = serde_json::from_str(
            r#"{
                "name": "Delver of Secrets // Insectile Aberration",
                "set_name": "Innistrad",
                "prices": { "usd": "0.42" },
                "card_faces": [
                    {
                        "oracle_id": "1e4e3a0f",
                        "type_line": "Creature — Human Wizard",
                        "image_uris": { "normal": "https://cards.scryfall.io/normal/front.jpg" }
                    },
                    {
                        "type_line": "Creature — Human Insect",
                        "image_uris": { "normal": "https://cards.scryfall.io/normal/back.jpg" }
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(card.oracle_id(), Some("1e4e3a0f"));
        assert_eq!(card.type_line(), Some("Creature — Human Wizard"));
        assert_eq!(card.image(), Some("https://cards.scryfall.io/normal/front.jpg"));
    }

    #[test]
    fn last_page_has_no_link() {
        let page: List<Set> = serde_json::from_str(
            r#"{ "object": "list", "has_more": false, "data": [
                { "code": "lea", "name": "Limited Edition Alpha", "set_type": "core" }
            ] }"#,
        )
        .unwrap();

        assert!(!page.has_more);
        assert_eq!(page.next_page, None);
        assert_eq!(page.data[0].code, "lea");
    }
}
