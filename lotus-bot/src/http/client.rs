//! Scryfall API client.

use std::sync::Arc;

use derive_more::{Display, Error, From};

use http::StatusCode;

use lotus_model::{Error as ApiError, ErrorCode, card::Currency};

use serde::de::DeserializeOwned;

use crate::config::ApiConfig;

use super::backend::{HttpBackend, ReqwestBackend, Response};
use super::request::{FetchPage, ListSets, SearchCards};

/// A client used to access the Scryfall API.
///
/// Cheaply cloneable, as it uses an `Arc` to track internal state and manage
/// connections.
#[derive(Clone, Debug)]
pub struct Client {
    backend: Arc<dyn HttpBackend>,
    state: Arc<ClientState>,
}

#[derive(Debug)]
struct ClientState {
    endpoint: String,
    currency: Currency,
    max_pages: u32,
}

impl Client {
    /// Creates a new client.
    pub fn new(config: &ApiConfig) -> Result<Client, RequestError> {
        let backend = ReqwestBackend::new(config)?;

        Ok(Client::with_backend(config, Arc::new(backend)))
    }

    /// Creates a new client on top of an existing backend.
    pub fn with_backend(config: &ApiConfig, backend: Arc<dyn HttpBackend>) -> Client {
        let state = ClientState {
            endpoint: config.endpoint.trim_end_matches('/').to_owned(),
            currency: config.currency,
            max_pages: config.max_pages,
        };

        Client {
            backend,
            state: Arc::new(state),
        }
    }

    /// The market prices are read from.
    pub fn currency(&self) -> Currency {
        self.state.currency
    }

    /// The most pages a single search may fetch.
    pub fn max_pages(&self) -> u32 {
        self.state.max_pages
    }

    /// Searches for cards with a full-text search expression.
    pub fn search_cards(&self, q: impl Into<String>) -> SearchCards {
        SearchCards::new(self.clone(), q.into())
    }

    /// Lists every set.
    pub fn list_sets(&self) -> ListSets {
        ListSets::new(self.clone())
    }

    /// Fetches a follow-up page of a list, by the `next_page` link of the
    /// page before it.
    pub fn fetch_page<T>(&self, next_page: impl Into<String>) -> FetchPage<T> {
        FetchPage::new(self.clone(), next_page.into())
    }

    /// Makes a generic request to the API.
    pub(super) fn request(&self, url: impl AsRef<str>) -> Request {
        Request::new(self.clone(), url)
    }
}

/// A HTTP client request.
#[derive(Debug)]
pub struct Request {
    client: Client,
    url: String,
}

impl Request {
    /// Creates a new `Request`.
    ///
    /// Relative urls are appended to the API endpoint; absolute urls, like
    /// `next_page` links, are requested as they are.
    pub fn new(client: Client, url: impl AsRef<str>) -> Request {
        let url = url.as_ref();
        let url = if url.starts_with("http://") || url.starts_with("https://") {
            url.to_owned()
        } else {
            format!("{}{}", client.state.endpoint, url)
        };

        Request { client, url }
    }

    /// Makes the request.
    ///
    /// Non-success responses are turned into the Scryfall error they carry.
    pub async fn send(self) -> Result<Response, RequestError> {
        tracing::debug!(url = %self.url, "requesting");

        let res = self.client.backend.get(&self.url).await?;

        if res.status.is_success() {
            Ok(res)
        } else {
            match serde_json::from_slice::<ApiError>(&res.body) {
                Ok(error) => Err(error.into()),
                Err(_) => Err(RequestError::Status(res.status)),
            }
        }
    }

    /// Makes the request and deserializes the response body.
    pub async fn json<T>(self) -> Result<T, RequestError>
    where
        T: DeserializeOwned,
    {
        let res = self.send().await?;

        serde_json::from_slice(&res.body).map_err(From::from)
    }
}

/// A request to Scryfall failed.
#[derive(Debug, Display, Error, From)]
pub enum RequestError {
    /// The request never got a response.
    #[display("request failed: {_0}")]
    Transport(reqwest::Error),
    /// Scryfall answered with an error object.
    #[display("scryfall error: {_0}")]
    Api(ApiError),
    /// Scryfall answered with a non-success status and no error object.
    #[display("unexpected status {_0}")]
    Status(#[error(not(source))] StatusCode),
    /// The response body was not what was expected.
    #[display("malformed response: {_0}")]
    Decode(serde_json::Error),
    /// The query string could not be encoded.
    #[display("malformed query: {_0}")]
    Encode(serde_urlencoded::ser::Error),
}

impl RequestError {
    /// Checks if Scryfall reported that nothing matched.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RequestError::Api(error) if error.code == ErrorCode::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::backend::testing::{CannedResponse, FakeBackend};

    use serde_json::json;

    fn client(backend: FakeBackend) -> (Client, Arc<FakeBackend>) {
        let backend = Arc::new(backend);
        let config = ApiConfig {
            endpoint: "https://api.scryfall.test/".into(),
            ..Default::default()
        };

        (Client::with_backend(&config, backend.clone()), backend)
    }

    #[tokio::test]
    async fn prefixes_relative_urls() {
        let (client, backend) = client(
            FakeBackend::new().with_response("/sets", CannedResponse::ok(json!({"data": []}))),
        );

        client.request("/sets").send().await.unwrap();
        client
            .request("https://elsewhere.test/sets")
            .send()
            .await
            .unwrap();

        assert_eq!(
            backend.requests(),
            ["https://api.scryfall.test/sets", "https://elsewhere.test/sets"]
        );
    }

    #[tokio::test]
    async fn decodes_error_objects() {
        let (client, _) = client(FakeBackend::new().with_response(
            "/sets",
            CannedResponse::error(StatusCode::BAD_REQUEST, "bad_request"),
        ));

        let err = client.request("/sets").send().await.unwrap_err();

        assert!(matches!(err, RequestError::Api(ref error) if error.status == 400));
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn keeps_status_without_error_object() {
        let (client, _) = client(FakeBackend::new().with_response(
            "/sets",
            CannedResponse {
                status: StatusCode::BAD_GATEWAY,
                json: json!("upstream exploded"),
            },
        ));

        let err = client.request("/sets").send().await.unwrap_err();

        assert!(matches!(err, RequestError::Status(StatusCode::BAD_GATEWAY)));
    }

    #[tokio::test]
    async fn not_found_is_recognized() {
        let (client, _) = client(FakeBackend::new());

        let err = client.request("/cards/search").send().await.unwrap_err();

        assert!(err.is_not_found());
    }
}
