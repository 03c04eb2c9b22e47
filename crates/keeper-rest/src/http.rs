//! HTTP transport for the REST resource client.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument, trace};

use keeper_core::error::{Error, RemoteError, TransportError};
use keeper_core::ServiceUrl;

/// Error body shape the service may send on non-success responses.
#[derive(Debug, serde::Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Map a reqwest failure onto the transport error taxonomy.
fn map_transport(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}

/// Thin JSON-over-HTTP client for a record service.
#[derive(Debug, Clone)]
pub struct RestTransport {
    client: reqwest::Client,
    base: ServiceUrl,
}

impl RestTransport {
    /// Create a new transport for the given service base URL.
    pub fn new(base: ServiceUrl) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("keeper/", env!("CARGO_PKG_VERSION")))
            .default_headers(default_headers())
            .build()
            .expect("failed to build HTTP client");

        Self { client, base }
    }

    /// Returns the service URL this transport is configured for.
    pub fn base(&self) -> &ServiceUrl {
        &self.base
    }

    /// GET a resource path, expecting a JSON body.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn get<R>(&self, path: &str) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let url = self.base.endpoint(path);
        debug!(path, "GET");

        let response = self.client.get(&url).send().await.map_err(map_transport)?;

        self.handle_response(response).await
    }

    /// POST a JSON body to a resource path.
    #[instrument(skip(self, body), fields(base = %self.base))]
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, Error>
    where
        B: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        let url = self.base.endpoint(path);
        debug!(path, "POST");
        trace!(?body, "request body");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(map_transport)?;

        self.handle_response(response).await
    }

    /// PATCH a resource path with a partial JSON body.
    #[instrument(skip(self, body), fields(base = %self.base))]
    pub async fn patch<B, R>(&self, path: &str, body: &B) -> Result<R, Error>
    where
        B: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        let url = self.base.endpoint(path);
        debug!(path, "PATCH");
        trace!(?body, "request body");

        let response = self
            .client
            .patch(&url)
            .json(body)
            .send()
            .await
            .map_err(map_transport)?;

        self.handle_response(response).await
    }

    /// DELETE a resource path; no response body is required.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.base.endpoint(path);
        debug!(path, "DELETE");

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(map_transport)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::Remote(parse_error_response(response).await))
        }
    }

    /// Handle a response, parsing the body or the error.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, Error> {
        let status = response.status();
        trace!(status = %status, "response");

        if status.is_success() {
            let body = response.json::<R>().await.map_err(map_transport)?;
            Ok(body)
        } else {
            Err(Error::Remote(parse_error_response(response).await))
        }
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Parse a non-success response into a remote error.
async fn parse_error_response(response: reqwest::Response) -> RemoteError {
    let status = response.status().as_u16();

    // Try the service's JSON error format; tolerate anything else.
    match response.json::<ApiErrorBody>().await {
        Ok(body) => RemoteError::new(status, body.error, body.message),
        Err(_) => RemoteError::new(status, None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_creation() {
        let base = ServiceUrl::new("https://records.example.com").unwrap();
        let transport = RestTransport::new(base.clone());
        assert_eq!(transport.base().as_str(), base.as_str());
    }
}
