//! Card and set queries.

use std::marker::PhantomData;

use futures_util::future::BoxFuture;

use lotus_model::{
    request::{SearchCardsQuery, SortDir, SortOrder, Unique},
    response::{Card, List, Set},
};

use serde::de::DeserializeOwned;

use crate::http::{Client, RequestError};

/// Searches for cards.
#[derive(Debug)]
pub struct SearchCards {
    client: Client,
    query: SearchCardsQuery,
}

impl SearchCards {
    /// Creates a new `SearchCards`.
    pub fn new(client: Client, q: String) -> SearchCards {
        SearchCards {
            client,
            query: SearchCardsQuery::new(q),
        }
    }

    /// Sorts results by a field.
    pub fn order(self, order: SortOrder) -> SearchCards {
        SearchCards {
            query: SearchCardsQuery {
                order: Some(order),
                ..self.query
            },
            ..self
        }
    }

    /// Sets the direction results are sorted in.
    pub fn dir(self, dir: SortDir) -> SearchCards {
        SearchCards {
            query: SearchCardsQuery {
                dir: Some(dir),
                ..self.query
            },
            ..self
        }
    }

    /// Sets how duplicate printings are collapsed.
    pub fn unique(self, unique: Unique) -> SearchCards {
        SearchCards {
            query: SearchCardsQuery {
                unique: Some(unique),
                ..self.query
            },
            ..self
        }
    }
}

impl IntoFuture for SearchCards {
    type Output = Result<List<Card>, RequestError>;
    type IntoFuture = BoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move {
            let query = serde_urlencoded::to_string(&self.query)?;

            self.client
                .request(format!("/cards/search?{}", query))
                .json()
                .await
        })
    }
}

/// Lists all sets.
#[derive(Debug)]
pub struct ListSets {
    client: Client,
}

impl ListSets {
    /// Creates a new `ListSets`.
    pub fn new(client: Client) -> ListSets {
        ListSets { client }
    }
}

impl IntoFuture for ListSets {
    type Output = Result<List<Set>, RequestError>;
    type IntoFuture = BoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move { self.client.request("/sets").json().await })
    }
}

/// Fetches a follow-up page of a list.
#[derive(Debug)]
pub struct FetchPage<T> {
    client: Client,
    url: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> FetchPage<T> {
    /// Creates a new `FetchPage`.
    pub fn new(client: Client, url: String) -> FetchPage<T> {
        FetchPage {
            client,
            url,
            _marker: PhantomData,
        }
    }
}

impl<T> IntoFuture for FetchPage<T>
where
    T: DeserializeOwned + Send + 'static,
{
    type Output = Result<List<T>, RequestError>;
    type IntoFuture = BoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move { self.client.request(&self.url).json().await })
    }
}
