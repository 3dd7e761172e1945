//! Pipeline failures.

use derive_more::{Display, Error};

use lotus_model::query::ParseError;

use crate::http::RequestError;

/// A command could not be answered.
#[derive(Debug, Display, Error)]
pub enum Error {
    /// The command text is invalid.
    #[display("invalid command: {_0}")]
    Parse(#[error(not(source))] ParseError),
    /// No set has the requested name.
    #[display("no set named `{_0}` exists")]
    UnknownCollection(#[error(not(source))] String),
    /// The search matched no cards.
    #[display("no cards found")]
    NotFound,
    /// Cards were found, but none within the requested price range.
    #[display("no cards found in price range")]
    EmptyResult,
    /// Scryfall could not be reached, or refused the request.
    #[display("scryfall unavailable: {_0}")]
    Upstream(#[error(not(source))] RequestError),
    /// A single search match has no oracle id to expand on.
    #[display("card `{_0}` has no oracle id")]
    MissingOracleId(#[error(not(source))] String),
}

impl From<ParseError> for Error {
    fn from(value: ParseError) -> Self {
        Error::Parse(value)
    }
}

impl From<RequestError> for Error {
    fn from(value: RequestError) -> Self {
        Error::Upstream(value)
    }
}

/// The classification of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedCommand,
    InvalidDirection,
    InvalidScope,
    InvalidAmount,
    InvalidPriceBound,
    NotFound,
    UpstreamUnavailable,
    EmptyResult,
    /// Scryfall sent something that makes no sense.
    Unexpected,
}

impl Error {
    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Parse(ParseError::MalformedCommand(_)) => ErrorKind::MalformedCommand,
            Error::Parse(ParseError::InvalidDirection(_)) => ErrorKind::InvalidDirection,
            Error::Parse(ParseError::InvalidScope(_)) => ErrorKind::InvalidScope,
            Error::Parse(ParseError::InvalidAmount(_)) => ErrorKind::InvalidAmount,
            Error::Parse(
                ParseError::InvalidPriceBound(_) | ParseError::InvertedPriceRange { .. },
            ) => ErrorKind::InvalidPriceBound,
            Error::UnknownCollection(_) | Error::NotFound => ErrorKind::NotFound,
            Error::EmptyResult => ErrorKind::EmptyResult,
            Error::Upstream(RequestError::Decode(_) | RequestError::Encode(_))
            | Error::MissingOracleId(_) => ErrorKind::Unexpected,
            Error::Upstream(_) => ErrorKind::UpstreamUnavailable,
        }
    }

    /// The message shown to the user that ran the command.
    pub fn user_message(&self) -> String {
        match self {
            Error::Parse(ParseError::MalformedCommand(form)) => format!(
                "Invalid command format. Please follow the format: {}",
                form.usage()
            ),
            Error::Parse(ParseError::InvalidDirection(direction)) => format!(
                "Invalid choice `{}`. Please enter /low, /high or /custom.",
                direction
            ),
            Error::Parse(ParseError::InvalidScope(scope)) => {
                format!("Invalid choice `{}`. Please enter card or set.", scope)
            }
            Error::Parse(ParseError::InvalidAmount(amount)) => format!(
                "Invalid amount `{}`. Please enter a positive whole number.",
                amount
            ),
            Error::Parse(ParseError::InvalidPriceBound(price)) => format!(
                "Invalid price `{}`. Please enter a number like 5 or 0.50.",
                price
            ),
            Error::Parse(ParseError::InvertedPriceRange { low, high }) => format!(
                "The lower price {} is greater than the upper price {}.",
                low, high
            ),
            Error::UnknownCollection(name) => {
                format!("No cards found. There is no set named `{}`.", name)
            }
            Error::NotFound => "No cards found.".to_owned(),
            Error::EmptyResult => "No cards found in the given price range.".to_owned(),
            error => match error.kind() {
                ErrorKind::UpstreamUnavailable => {
                    "Failed to fetch data from Scryfall. Please try again later.".to_owned()
                }
                _ => "An unexpected error occurred.".to_owned(),
            },
        }
    }
}
