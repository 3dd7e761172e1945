//! HTTP transports.
//!
//! [`Client`](super::Client) never talks to the network itself; it goes
//! through an [`HttpBackend`], so the search logic can be exercised against
//! canned responses.

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;

use http::{HeaderMap, HeaderValue, StatusCode, header};

use crate::config::ApiConfig;

use super::RequestError;

/// A raw HTTP response.
#[derive(Clone, Debug)]
pub struct Response {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

/// Something that can perform `GET` requests.
#[async_trait]
pub trait HttpBackend: Debug + Send + Sync {
    /// Fetches an absolute URL.
    ///
    /// Only transport failures are errors; any status is returned as is.
    async fn get(&self, url: &str) -> Result<Response, RequestError>;
}

/// The production backend.
///
/// Every request is bounded by the configured timeout and never retried.
#[derive(Debug)]
pub struct ReqwestBackend {
    http: reqwest::Client,
}

impl ReqwestBackend {
    /// Creates a new `ReqwestBackend`.
    pub fn new(config: &ApiConfig) -> Result<ReqwestBackend, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .deflate(true)
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(ReqwestBackend { http })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get(&self, url: &str) -> Result<Response, RequestError> {
        let res = self.http.get(url).send().await?;
        let status = res.status();
        let body = res.bytes().await?.to_vec();

        Ok(Response { status, body })
    }
}

#[cfg(test)]
pub mod testing {
    //! A backend serving canned responses.

    use std::sync::Mutex;

    use serde_json::{Value, json};

    use super::*;

    /// A canned response.
    #[derive(Clone, Debug)]
    pub struct CannedResponse {
        pub status: StatusCode,
        pub json: Value,
    }

    impl CannedResponse {
        /// A `200 OK` response.
        pub fn ok(json: Value) -> CannedResponse {
            CannedResponse {
                status: StatusCode::OK,
                json,
            }
        }

        /// A Scryfall error object.
        pub fn error(status: StatusCode, code: &str) -> CannedResponse {
            CannedResponse {
                status,
                json: json!({
                    "object": "error",
                    "code": code,
                    "status": status.as_u16(),
                    "details": format!("canned {} error", code),
                }),
            }
        }
    }

    /// A fake backend.
    ///
    /// Responses are picked by the longest registered fragment contained in
    /// the requested URL. URLs matching nothing get a Scryfall `not_found`.
    #[derive(Debug, Default)]
    pub struct FakeBackend {
        responses: Vec<(String, CannedResponse)>,
        requests: Mutex<Vec<String>>,
    }

    impl FakeBackend {
        /// Creates a new, empty `FakeBackend`.
        pub fn new() -> FakeBackend {
            FakeBackend::default()
        }

        /// Serves `response` for URLs containing `fragment`.
        pub fn with_response(mut self, fragment: &str, response: CannedResponse) -> FakeBackend {
            self.responses.push((fragment.to_owned(), response));
            self
        }

        /// Every URL requested so far, in order.
        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpBackend for FakeBackend {
        async fn get(&self, url: &str) -> Result<Response, RequestError> {
            self.requests.lock().unwrap().push(url.to_owned());

            let response = self
                .responses
                .iter()
                .filter(|(fragment, _)| url.contains(fragment.as_str()))
                .max_by_key(|(fragment, _)| fragment.len())
                .map(|(_, response)| response.clone())
                .unwrap_or_else(|| CannedResponse::error(StatusCode::NOT_FOUND, "not_found"));

            Ok(Response {
                status: response.status,
                body: serde_json::to_vec(&response.json).unwrap(),
            })
        }
    }
}
