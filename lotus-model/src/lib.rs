//! Lotus data representations.
//!
//! Everything here is plain data: the parsed [`Query`](query::Query) a user
//! command turns into, the [`CardRecord`](card::CardRecord) snapshots shown
//! back to the user, and the Scryfall wire types they are built from.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use derive_more::Error;

pub mod card;
pub mod history;
pub mod query;
pub mod request;
pub mod response;

/// Scryfall API error.
///
/// Every non-success response from Scryfall carries one of these instead of
/// the requested object.
#[derive(Clone, Debug, Deserialize, Serialize, Error)]
pub struct Error {
    /// An API error code.
    pub code: ErrorCode,
    /// The HTTP status the error was sent with.
    #[serde(default)]
    pub status: u16,
    /// A human-readable explanation of the error.
    #[serde(default)]
    pub details: String,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.details.is_empty() {
            write!(f, "scryfall responded with `{}`", self.code)
        } else {
            self.details.fmt(f)
        }
    }
}

/// An API error code.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum ErrorCode {
    /// Nothing matched the request.
    ///
    /// For searches this means the query was fine but no card matched it.
    NotFound,
    /// The request was malformed, e.g. an unparseable search expression.
    BadRequest,
    /// Any other error code.
    Other(String),
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::NotFound => f.write_str("not_found"),
            ErrorCode::BadRequest => f.write_str("bad_request"),
            ErrorCode::Other(other) => f.write_str(other),
        }
    }
}

impl From<String> for ErrorCode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "not_found" => ErrorCode::NotFound,
            "bad_request" => ErrorCode::BadRequest,
            _ => ErrorCode::Other(value),
        }
    }
}

impl From<ErrorCode> for String {
    fn from(value: ErrorCode) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_scryfall_error_object() {
        let error: Error = serde_json::from_str(
            r#"{
                "object": "error",
                "code": "not_found",
                "status": 404,
                "details": "Your query didn't match any cards."
            }"#,
        )
        .unwrap();

        assert_eq!(error.code, ErrorCode::NotFound);
        assert_eq!(error.status, 404);
        assert_eq!(error.to_string(), "Your query didn't match any cards.");
    }

    #[test]
    fn unknown_codes_are_kept() {
        let error: Error =
            serde_json::from_str(r#"{"code": "rate_limited", "status": 429}"#).unwrap();

        assert_eq!(error.code, ErrorCode::Other("rate_limited".into()));
        assert_eq!(error.to_string(), "scryfall responded with `rate_limited`");
    }
}
