//! Set name resolution.

use derive_more::{Deref, Display};

use tracing::instrument;

use crate::{error::Error, http::Client};

/// The short code Scryfall identifies a set by, like `lea`.
#[derive(Clone, Debug, Deref, Display, PartialEq, Eq)]
pub struct SetCode(String);

impl SetCode {
    /// Creates a new `SetCode`.
    pub fn new(code: impl Into<String>) -> SetCode {
        SetCode(code.into())
    }
}

/// Finds the code of the set with the given display name.
///
/// Names are compared case-insensitively and must match exactly. The set
/// list is fetched anew on every call.
#[instrument(skip(client))]
pub async fn resolve_set(client: &Client, name: &str) -> Result<SetCode, Error> {
    let sets = client.list_sets().await?;
    let wanted = name.to_lowercase();

    sets.data
        .into_iter()
        .find(|set| set.name.to_lowercase() == wanted)
        .map(|set| SetCode::new(set.code))
        .ok_or_else(|| Error::UnknownCollection(name.to_owned()))
}
