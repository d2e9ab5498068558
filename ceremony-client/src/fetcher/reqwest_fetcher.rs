use ceremony_types::options::OptionsResponse;
use reqwest::{header::ACCEPT, Client};
use url::Url;

use super::{OptionsFetcher, TransportError};

/// An [`OptionsFetcher`] backed by a [`reqwest::Client`].
///
/// Relative options URLs, such as the default `/webauthn/options`, are resolved against `origin`.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
    origin: Url,
}

impl ReqwestFetcher {
    /// Fetch relative URLs from `origin` with a default client.
    pub fn new(origin: Url) -> Self {
        Self {
            client: Client::new(),
            origin,
        }
    }

    /// Use a preconfigured client, e.g. one with timeouts and a redirect policy.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// The origin relative URLs are resolved against.
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    fn resolve(&self, url: &str) -> Result<Url, TransportError> {
        self.origin
            .join(url)
            .map_err(|_| TransportError::InvalidUrl(url.to_owned()))
    }
}

impl OptionsFetcher for ReqwestFetcher {
    async fn fetch_options(&self, url: &str) -> Result<OptionsResponse, TransportError> {
        let url = self.resolve(url)?;

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Options resource answered with {status}");
            return Err(TransportError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| TransportError::Body(e.to_string()))
    }
}
