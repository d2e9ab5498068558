use std::fmt;

use ceremony_types::webauthn::{CredentialCreationOptions, CredentialRequestOptions};
use typeshare::typeshare;

/// An exception raised by the platform during a ceremony, for example a `NotAllowedError` when the
/// user cancels or the ceremony times out.
#[typeshare]
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlatformError {
    /// The platform's name for the failure, e.g. `NotAllowedError` or `InvalidStateError`.
    pub name: String,
    /// Human readable details.
    pub message: String,
}

impl PlatformError {
    /// Build an error from the platform's exception name and message.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

impl std::error::Error for PlatformError {}

/// The platform's native ceremony API, `navigator.credentials` in a browser.
///
/// Implementations run the actual ceremony with an authenticator. The options handed to them are
/// fully resolved and are consumed by the call.
#[cfg_attr(
    any(test, feature = "testable"),
    mockall::automock(
        type CreatedCredential = ceremony_types::webauthn::CreatedPublicKeyCredential;
        type AuthenticatedCredential = ceremony_types::webauthn::AuthenticatedPublicKeyCredential;
    )
)]
#[async_trait::async_trait]
pub trait CredentialsContainer {
    /// What a successful registration ceremony resolves to, usually a
    /// [`CreatedPublicKeyCredential`](ceremony_types::webauthn::CreatedPublicKeyCredential).
    type CreatedCredential: Send;

    /// What a successful authentication ceremony resolves to, usually an
    /// [`AuthenticatedPublicKeyCredential`](ceremony_types::webauthn::AuthenticatedPublicKeyCredential).
    type AuthenticatedCredential: Send;

    /// Run a registration ceremony.
    async fn create(
        &self,
        options: CredentialCreationOptions,
    ) -> Result<Self::CreatedCredential, PlatformError>;

    /// Run an authentication ceremony.
    async fn get(
        &self,
        options: CredentialRequestOptions,
    ) -> Result<Self::AuthenticatedCredential, PlatformError>;
}
