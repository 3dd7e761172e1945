//! Price filtering and ranking.

use std::cmp::Ordering;

use lotus_model::{
    card::CardRecord,
    query::{Direction, Query},
};

/// Narrows raw search results down to what a query asked for.
///
/// Records outside the query's price range are dropped, along with records
/// that have no price at all. Ranked queries are then sorted by price and
/// truncated; range queries keep the order the search returned.
pub fn apply(mut records: Vec<CardRecord>, query: &Query) -> Vec<CardRecord> {
    if let Some(range) = query.price_range {
        records.retain(|record| record.price.is_some_and(|price| range.contains(price)));
    }

    if let Some(direction) = query.direction {
        records.sort_by(|a, b| match direction {
            Direction::Low => cheapest_first(a, b),
            // `None` orders below every price, so reversing puts it last
            Direction::High => b.price.cmp(&a.price),
        });
    }

    if let Some(limit) = query.truncate_to() {
        records.truncate(limit);
    }

    records
}

fn cheapest_first(a: &CardRecord, b: &CardRecord) -> Ordering {
    match (a.price, b.price) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn record(name: &str, price: Option<Decimal>) -> CardRecord {
        CardRecord {
            name: name.to_owned(),
            collection_name: "Battle for Zendikar".to_owned(),
            type_line: "Land".to_owned(),
            variant: "Regular".to_owned(),
            price,
            image: None,
        }
    }

    fn names(records: &[CardRecord]) -> Vec<&str> {
        records.iter().map(|record| record.name.as_str()).collect()
    }

    fn records() -> Vec<CardRecord> {
        vec![
            record("a", Some(dec!(5.00))),
            record("b", None),
            record("c", Some(dec!(0.25))),
            record("d", Some(dec!(5.00))),
            record("e", Some(dec!(12.50))),
        ]
    }

    #[test]
    fn low_puts_unpriced_last() {
        let query = "/low set 5 Battle for Zendikar".parse::<Query>().unwrap();

        assert_eq!(names(&apply(records(), &query)), ["c", "a", "d", "e", "b"]);
    }

    #[test]
    fn high_puts_unpriced_last() {
        let query = "/high set 5 Battle for Zendikar".parse::<Query>().unwrap();

        assert_eq!(names(&apply(records(), &query)), ["e", "a", "d", "c", "b"]);
    }

    #[test]
    fn ranked_queries_are_truncated() {
        let query = "/high set 2 Battle for Zendikar".parse::<Query>().unwrap();

        assert_eq!(names(&apply(records(), &query)), ["e", "a"]);
    }

    #[test]
    fn truncation_never_drops_a_cheaper_priced_record() {
        let query = "/low set 3 Battle for Zendikar".parse::<Query>().unwrap();
        let result = apply(records(), &query);
        let worst = result.iter().filter_map(|record| record.price).max().unwrap();

        assert!(
            records()
                .iter()
                .filter(|record| !result.contains(record))
                .filter_map(|record| record.price)
                .all(|price| price >= worst)
        );
    }

    #[test]
    fn range_is_inclusive_and_unsorted() {
        let query = "/custom set 0.25 5 Battle for Zendikar"
            .parse::<Query>()
            .unwrap();

        assert_eq!(names(&apply(records(), &query)), ["a", "c", "d"]);
    }

    #[test]
    fn range_can_filter_everything() {
        let query = "/custom set 100 200 Battle for Zendikar"
            .parse::<Query>()
            .unwrap();

        assert!(apply(records(), &query).is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let query = "/custom set 0.25 5 Battle for Zendikar"
            .parse::<Query>()
            .unwrap();

        let once = apply(records(), &query);
        assert_eq!(apply(once.clone(), &query), once);
    }

    #[test]
    fn ranking_is_idempotent() {
        for command in [
            "/low set 3 Battle for Zendikar",
            "/high set 3 Battle for Zendikar",
        ] {
            let query = command.parse::<Query>().unwrap();

            let once = apply(records(), &query);
            assert_eq!(apply(once.clone(), &query), once);
        }
    }
}
