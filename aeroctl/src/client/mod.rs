//! Typed client for the console API.
//!
//! Every call maps to one [`Endpoint`](crate::endpoints::Endpoint): the method and path template
//! come from there and path parameters are substituted positionally. Responses arrive in the
//! console envelope; `success: false` becomes a [`ClientError`].
//!
//! The pilot calls in [`pilot`] never touch the network. They run over a fixed fixture set and
//! resolve immediately.
//!
//! ```no_run
//! use aeroctl::api::models::certification::RealnameListQuery;
//! use aeroctl::client::ConsoleClient;
//! use url::Url;
//!
//! # async fn run() -> Result<(), aeroctl::client::ClientError> {
//! let client = ConsoleClient::new(Url::parse("http://localhost:3001").unwrap())?;
//! let page = client.realname_list(&RealnameListQuery::default()).await?;
//! println!("{} records", page.total);
//! # Ok(())
//! # }
//! ```

pub mod pilot;
pub mod realname;

use crate::endpoints::{Endpoint, PathParamsError};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Display;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    PathParams(#[from] PathParamsError),

    /// The server answered `success: false` with a 404
    #[error("not found: {message}")]
    NotFound { message: String },

    /// The server answered `success: false` for any other reason
    #[error("request rejected ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    /// The body wasn't the expected envelope
    #[error("unexpected response ({status}): {detail}")]
    Decode { status: StatusCode, detail: String },
}

/// The console's response envelope as seen by a client: either `data` or `message` is set.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    data: Option<T>,
    message: Option<String>,
}

/// Client for one console backend.
#[derive(Debug, Clone)]
pub struct ConsoleClient {
    http: Client,
    base_url: Url,
}

/// Makes sure a url has a trailing slash, so that joining keeps the base path.
fn ensure_slash(url: &Url) -> Url {
    if url.path().ends_with('/') {
        url.clone()
    } else {
        let mut new_url = url.clone();
        let path = format!("{}/", url.path());
        new_url.set_path(&path);
        new_url
    }
}

impl ConsoleClient {
    const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(base_url: Url) -> Result<Self, ClientError> {
        // reqwest is built without a bundled crypto provider; a second install is a no-op error
        let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

        let http = Client::builder().timeout(Self::DEFAULT_REQUEST_TIMEOUT).build()?;
        Ok(Self::with_http_client(http, base_url))
    }

    /// Use a preconfigured reqwest client.
    pub fn with_http_client(http: Client, base_url: Url) -> Self {
        Self {
            http,
            base_url: ensure_slash(&base_url),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, endpoint: &Endpoint, params: &[&dyn Display]) -> Result<Url, ClientError> {
        let path = endpoint.path_with(params)?;
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Send a request and decode the envelope.
    async fn send<B, T>(&self, endpoint: &Endpoint, url: Url, body: Option<&B>) -> Result<Envelope<T>, ClientError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        debug!(method = %endpoint.method, %url, "Sending console request");

        let mut request = self.http.request(endpoint.method.clone(), url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        let envelope: Envelope<T> = serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode {
            status,
            detail: if status.is_success() {
                e.to_string()
            } else {
                String::from_utf8_lossy(&bytes).into_owned()
            },
        })?;

        if !envelope.success {
            let message = envelope.message.unwrap_or_default();
            return Err(if status == StatusCode::NOT_FOUND {
                ClientError::NotFound { message }
            } else {
                ClientError::Rejected { status, message }
            });
        }
        Ok(envelope)
    }

    /// Call an endpoint answering `{ success, data }`.
    #[instrument(skip_all, fields(path = endpoint.path))]
    async fn fetch_data<B, T>(&self, endpoint: &Endpoint, url: Url, body: Option<&B>) -> Result<T, ClientError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let envelope = self.send::<B, T>(endpoint, url, body).await?;
        envelope.data.ok_or_else(|| ClientError::Decode {
            status: StatusCode::OK,
            detail: "missing data".to_string(),
        })
    }

    /// Call an endpoint answering `{ success, message }`.
    #[instrument(skip_all, fields(path = endpoint.path))]
    async fn fetch_message<B>(&self, endpoint: &Endpoint, url: Url, body: Option<&B>) -> Result<String, ClientError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let envelope = self.send::<B, serde_json::Value>(endpoint, url, body).await?;
        Ok(envelope.message.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_path_is_kept() {
        let client = ConsoleClient::new(Url::parse("http://console.local/mock").unwrap()).unwrap();
        let url = client.url(&crate::endpoints::REALNAME_DETAIL, &[&7]).unwrap();
        assert_eq!(url.as_str(), "http://console.local/mock/certification/realname/detail/7");
    }

    #[test]
    fn test_wrong_param_count_is_an_error() {
        let client = ConsoleClient::new(Url::parse("http://console.local").unwrap()).unwrap();
        let err = client.url(&crate::endpoints::REALNAME_DETAIL, &[]).unwrap_err();
        assert!(matches!(err, ClientError::PathParams(_)));
    }
}
