//! # Ceremony Client
//!
//! This crate defines a [`WebauthnService`] which negotiates the options of a [Webauthn] ceremony
//! before handing them to the platform. The Relying Party publishes its options at a single HTTP
//! resource, the caller may override any of them, and the service merges both into the fully
//! resolved options that the platform's [`CredentialsContainer`] expects.
//!
//! The service does not perform any cryptographic operation itself and does not interpret the
//! platform's answer, it only marshals data between the Relying Party and the platform.
//!
//! [Webauthn]: https://w3c.github.io/webauthn/
use std::fmt;

use ceremony_types::options::{
    CallerCreationOptions, CallerRequestOptions, DecodeError, ServerOptions,
};
use typeshare::typeshare;

mod availability;
mod container;
mod fetcher;
mod negotiation;
mod submission;

#[cfg(test)]
mod tests;

pub use self::{
    availability::{
        is_resident_key_login_available, is_webauthn_available, Browser, CompatibilityRule,
        Comparison, Environment, InvalidVersion, Platform, ResidentKeyPolicy, StaticEnvironment,
        UserAgent, Version, VersionRequirement,
    },
    container::{CredentialsContainer, PlatformError},
    fetcher::{OptionsFetcher, TransportError},
    negotiation::{negotiate_creation, negotiate_request},
    submission::AssertionSubmission,
};

#[cfg(feature = "reqwest")]
pub use self::fetcher::ReqwestFetcher;

#[cfg(any(test, feature = "testable"))]
pub use self::container::MockCredentialsContainer;

/// Where the Relying Party's options resource lives unless configured otherwise.
pub const DEFAULT_OPTIONS_URL: &str = "/webauthn/options";

#[typeshare]
#[derive(Debug, Clone, serde::Serialize, PartialEq, Eq)]
#[serde(tag = "type", content = "content")]
/// Errors produced by Webauthn negotiations. All of them are surfaced to the caller as is, the
/// service never retries.
pub enum WebauthnError {
    /// Fetching the options resource failed.
    Transport(TransportError),
    /// The options resource carried a binary field that is not base64url.
    Decode(DecodeError),
    /// The platform rejected, cancelled or timed out the ceremony.
    Ceremony(PlatformError),
    /// Neither the caller nor the Relying Party named a user to register a credential for.
    MissingUser,
}

impl fmt::Display for WebauthnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WebauthnError::Transport(err) => write!(f, "could not fetch ceremony options: {err}"),
            WebauthnError::Decode(err) => write!(f, "could not decode ceremony options: {err}"),
            WebauthnError::Ceremony(err) => write!(f, "ceremony failed: {err}"),
            WebauthnError::MissingUser => f.write_str("no user entity to register a credential for"),
        }
    }
}

impl std::error::Error for WebauthnError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WebauthnError::Transport(err) => Some(err),
            WebauthnError::Decode(err) => Some(err),
            WebauthnError::Ceremony(err) => Some(err),
            WebauthnError::MissingUser => None,
        }
    }
}

impl From<TransportError> for WebauthnError {
    fn from(value: TransportError) -> Self {
        WebauthnError::Transport(value)
    }
}

impl From<DecodeError> for WebauthnError {
    fn from(value: DecodeError) -> Self {
        WebauthnError::Decode(value)
    }
}

impl From<PlatformError> for WebauthnError {
    fn from(value: PlatformError) -> Self {
        WebauthnError::Ceremony(value)
    }
}

/// A `WebauthnService` drives registration and authentication ceremonies. Users of this struct
/// supply a [`CredentialsContainer`], the platform's native ceremony API, and an
/// [`OptionsFetcher`] used to retrieve the Relying Party's options when the caller did not already
/// provide them.
///
/// Every ceremony is a pure merge of the caller's options over the server's options followed by a
/// single call into the platform. Nothing is cached between calls.
pub struct WebauthnService<C, F> {
    container: C,
    fetcher: F,
    options_url: String,
}

impl<C, F> WebauthnService<C, F>
where
    C: CredentialsContainer + Sync,
    F: OptionsFetcher + Sync,
{
    /// Create a service fetching its options from [`DEFAULT_OPTIONS_URL`].
    pub fn new(container: C, fetcher: F) -> Self {
        Self {
            container,
            fetcher,
            options_url: DEFAULT_OPTIONS_URL.to_owned(),
        }
    }

    /// Fetch the options from `url` instead of [`DEFAULT_OPTIONS_URL`].
    pub fn with_options_url(mut self, url: impl Into<String>) -> Self {
        self.options_url = url.into();
        self
    }

    /// The URL the next options fetch will use.
    pub fn options_url(&self) -> &str {
        &self.options_url
    }

    /// Change the URL of the options resource. Takes effect on the next fetch.
    pub fn set_options_url(&mut self, url: impl Into<String>) {
        self.options_url = url.into();
    }

    /// Read access to the platform's ceremony API.
    pub fn container(&self) -> &C {
        &self.container
    }

    /// Read access to the options fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetch the Relying Party's options and decode their binary fields.
    ///
    /// Either every field decodes or an error is returned, a partially decoded value is never
    /// produced.
    pub async fn fetch_server_options(&self) -> Result<ServerOptions, WebauthnError> {
        log::debug!("Fetching ceremony options from {}", self.options_url);
        let response = self.fetcher.fetch_options(&self.options_url).await?;
        ServerOptions::try_from(response).map_err(|err| {
            log::warn!("Ceremony options from {} are malformed: {err}", self.options_url);
            WebauthnError::from(err)
        })
    }

    /// Use the `server` options when given, otherwise fetch them.
    async fn resolve_server_options(
        &self,
        server: Option<ServerOptions>,
    ) -> Result<ServerOptions, WebauthnError> {
        match server {
            Some(server) => Ok(server),
            None => self.fetch_server_options().await,
        }
    }

    /// Register a new credential.
    ///
    /// The `caller` options take precedence over the `server` options field by field, see
    /// [`negotiate_creation`]. When `server` is `None` the options are fetched from
    /// [`Self::options_url`] first.
    ///
    /// Returns the platform's credential on success or some [`WebauthnError`].
    pub async fn create_credential(
        &self,
        caller: CallerCreationOptions,
        server: Option<ServerOptions>,
    ) -> Result<C::CreatedCredential, WebauthnError> {
        let server = self.resolve_server_options(server).await?;
        let options = negotiate_creation(&caller, &server)?;
        log::debug!(
            "Creating credential for relying party {:?}",
            options.public_key.rp.id
        );

        self.container.create(options).await.map_err(Into::into)
    }

    /// Get an assertion from an existing credential.
    ///
    /// The `caller` options take precedence over the `server` options field by field, see
    /// [`negotiate_request`]. When `server` is `None` the options are fetched from
    /// [`Self::options_url`] first.
    ///
    /// Returns the platform's credential on success or some [`WebauthnError`].
    pub async fn get_credential(
        &self,
        caller: CallerRequestOptions,
        server: Option<ServerOptions>,
    ) -> Result<C::AuthenticatedCredential, WebauthnError> {
        let server = self.resolve_server_options(server).await?;
        let options = negotiate_request(&caller, &server);
        log::debug!(
            "Requesting assertion for relying party {:?}",
            options.public_key.rp_id
        );

        self.container.get(options).await.map_err(Into::into)
    }
}
