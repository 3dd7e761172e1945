//! User command queries.
//!
//! Two command shapes are understood:
//!
//! * the ranked form, `/<low|high> <card|set> <count> <name...>`, which asks
//!   for the `count` cheapest or most expensive printings;
//! * the range form, `/custom <card|set> <low> <high> <name...>`, which asks
//!   for every printing priced within `[low, high]`.
//!
//! Parsing is a pure function of the command text; see [`Query`]'s
//! [`FromStr`] implementation.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use derive_more::{Display, Error};

use rust_decimal::Decimal;

use serde::{Deserialize, Serialize};

/// A validated price query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    /// How results are ordered, or `None` for the range form.
    pub direction: Option<Direction>,
    /// Whether the name refers to a single card or a whole set.
    pub scope: Scope,
    /// How many records the ranked form asks for.
    ///
    /// Always `0` for the range form, which is not truncated.
    pub limit: u32,
    /// The card or set name. Never empty.
    pub name: String,
    /// Inclusive price bounds for the range form.
    pub price_range: Option<PriceRange>,
}

impl Query {
    /// The record count the final result is truncated to, if any.
    pub fn truncate_to(&self) -> Option<usize> {
        self.direction.map(|_| self.limit as usize)
    }

    /// The shape of command this query was parsed from.
    pub fn form(&self) -> Form {
        match self.direction {
            Some(_) => Form::Ranked,
            None => Form::Range,
        }
    }
}

impl FromStr for Query {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = s.split_whitespace().collect::<Vec<_>>();

        match tokens.first().map(|token| command_name(token)) {
            Some("custom") => parse_range(&tokens),
            _ => parse_ranked(&tokens),
        }
    }
}

/// Strips the leading slash and any `@botname` suffix off a command token.
fn command_name(token: &str) -> &str {
    let token = token.strip_prefix('/').unwrap_or(token);
    token.split_once('@').map_or(token, |(name, _)| name)
}

fn parse_ranked(tokens: &[&str]) -> Result<Query, ParseError> {
    if tokens.len() < 4 {
        return Err(ParseError::MalformedCommand(Form::Ranked));
    }

    let direction = command_name(tokens[0]).parse::<Direction>()?;
    let scope = tokens[1].parse::<Scope>()?;
    let limit = tokens[2]
        .parse::<u32>()
        .ok()
        .filter(|&limit| limit > 0)
        .ok_or_else(|| ParseError::InvalidAmount(tokens[2].to_owned()))?;

    Ok(Query {
        direction: Some(direction),
        scope,
        limit,
        name: tokens[3..].join(" "),
        price_range: None,
    })
}

fn parse_range(tokens: &[&str]) -> Result<Query, ParseError> {
    if tokens.len() < 5 {
        return Err(ParseError::MalformedCommand(Form::Range));
    }

    let scope = tokens[1].parse::<Scope>()?;
    let low = parse_price(tokens[2])?;
    let high = parse_price(tokens[3])?;

    Ok(Query {
        direction: None,
        scope,
        limit: 0,
        name: tokens[4..].join(" "),
        price_range: Some(PriceRange::new(low, high)?),
    })
}

fn parse_price(token: &str) -> Result<Decimal, ParseError> {
    token
        .parse::<Decimal>()
        .ok()
        .filter(|price| !price.is_sign_negative())
        .ok_or_else(|| ParseError::InvalidPriceBound(token.to_owned()))
}

/// The order results are ranked in.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Cheapest first.
    Low,
    /// Most expensive first.
    High,
}

impl Direction {
    /// Creates a string representation of the direction that can be used to
    /// get back the direction with [`FromStr`].
    pub fn to_str(&self) -> &'static str {
        match self {
            Direction::Low => "low",
            Direction::High => "high",
        }
    }
}

impl FromStr for Direction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Direction::Low),
            "high" => Ok(Direction::High),
            _ => Err(ParseError::InvalidDirection(s.to_owned())),
        }
    }
}

impl TryFrom<String> for Direction {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// What a query's name refers to.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scope {
    /// A single card, matched by its exact name.
    Card,
    /// A whole set, matched by its display name.
    Set,
}

impl Scope {
    /// Creates a string representation of the scope that can be used to get
    /// back the scope with [`FromStr`].
    pub fn to_str(&self) -> &'static str {
        match self {
            Scope::Card => "card",
            Scope::Set => "set",
        }
    }
}

impl FromStr for Scope {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Scope::Card),
            "set" => Ok(Scope::Set),
            _ => Err(ParseError::InvalidScope(s.to_owned())),
        }
    }
}

impl TryFrom<String> for Scope {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// An inclusive, non-negative price range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriceRange {
    low: Decimal,
    high: Decimal,
}

impl PriceRange {
    /// Creates a new `PriceRange`.
    ///
    /// Fails if `low` is greater than `high`.
    pub fn new(low: Decimal, high: Decimal) -> Result<PriceRange, ParseError> {
        if low > high {
            Err(ParseError::InvertedPriceRange { low, high })
        } else {
            Ok(PriceRange { low, high })
        }
    }

    pub fn low(&self) -> Decimal {
        self.low
    }

    pub fn high(&self) -> Decimal {
        self.high
    }

    /// Checks if a price falls within the range, bounds included.
    pub fn contains(&self, price: Decimal) -> bool {
        self.low <= price && price <= self.high
    }
}

/// The two command shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Form {
    /// `/low` and `/high`.
    Ranked,
    /// `/custom`.
    Range,
}

impl Form {
    /// The usage line of the form.
    pub fn usage(&self) -> &'static str {
        match self {
            Form::Ranked => "/low|high card|set <count> <name>",
            Form::Range => "/custom card|set <low price> <high price> <name>",
        }
    }
}

impl Display for Form {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.usage())
    }
}

/// A command failed to parse.
#[derive(Clone, Debug, Display, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Too few arguments for the command's shape.
    #[display("malformed command, expected `{_0}`")]
    MalformedCommand(#[error(not(source))] Form),
    /// The command is neither `/low`, `/high` nor `/custom`.
    #[display("no such direction \"{_0}\" exists")]
    InvalidDirection(#[error(not(source))] String),
    /// The scope is neither `card` nor `set`.
    #[display("no such scope \"{_0}\" exists")]
    InvalidScope(#[error(not(source))] String),
    /// The count is not a positive whole number.
    #[display("\"{_0}\" is not a positive whole number")]
    InvalidAmount(#[error(not(source))] String),
    /// A price bound is not a non-negative number.
    #[display("\"{_0}\" is not a valid price")]
    InvalidPriceBound(#[error(not(source))] String),
    /// The lower price bound is greater than the upper one.
    #[display("lower price {low} is greater than upper price {high}")]
    InvertedPriceRange { low: Decimal, high: Decimal },
}
