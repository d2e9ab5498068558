use std::fmt;

use ceremony_types::options::OptionsResponse;
use typeshare::typeshare;

#[cfg(feature = "reqwest")]
mod reqwest_fetcher;

#[cfg(feature = "reqwest")]
pub use self::reqwest_fetcher::ReqwestFetcher;

/// Failures while retrieving the options resource.
#[typeshare]
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "type", content = "content")]
pub enum TransportError {
    /// The request could not be sent or the connection broke.
    Network(String),
    /// The server answered with a non-success status code.
    Status(u16),
    /// The body is not a valid options document.
    Body(String),
    /// The options URL could not be resolved into an absolute URL.
    InvalidUrl(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Network(msg) => write!(f, "network error: {msg}"),
            TransportError::Status(code) => write!(f, "unexpected HTTP status {code}"),
            TransportError::Body(msg) => write!(f, "malformed options body: {msg}"),
            TransportError::InvalidUrl(url) => write!(f, "invalid options URL `{url}`"),
        }
    }
}

impl std::error::Error for TransportError {}

/// A trait to implement fetching the Relying Party's options resource.
///
/// The implementer should take the following into consideration:
/// * Ensure an appropriate timeout is set
/// * Set the `Accept` header to `application/json`
/// * A relative `url` may be resolved against an origin of the implementer's choosing
#[expect(async_fn_in_trait)]
pub trait OptionsFetcher {
    /// Fetch and deserialize the options resource found at `url`.
    async fn fetch_options(&self, url: &str) -> Result<OptionsResponse, TransportError>;
}

impl OptionsFetcher for () {
    async fn fetch_options(&self, url: &str) -> Result<OptionsResponse, TransportError> {
        Err(TransportError::Network(format!(
            "no fetcher configured to retrieve {url}"
        )))
    }
}
