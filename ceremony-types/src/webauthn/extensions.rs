use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use typeshare::typeshare;

#[cfg(doc)]
use crate::webauthn::PublicKeyCredential;

/// Client extension inputs for zero or more [WebAuthn Extensions].
///
/// Only `credProps` is modelled, every other extension input is carried through untouched in
/// [`Self::unknown_keys`].
///
/// <https://w3c.github.io/webauthn/#dictdef-authenticationextensionsclientinputs>
///
/// [WebAuthn Extensions]: https://w3c.github.io/webauthn/#webauthn-extensions
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct AuthenticationExtensionsClientInputs {
    /// Request the [`CredentialPropertiesOutput`] for a newly created credential.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cred_props: Option<bool>,

    /// Extension inputs this library does not know about, in the order they were given.
    #[serde(flatten)]
    #[typeshare(skip)]
    pub unknown_keys: IndexMap<String, serde_json::Value>,
}

/// Client extension outputs for zero or more [WebAuthn Extensions].
///
/// <https://w3c.github.io/webauthn/#dictdef-authenticationextensionsclientoutputs>
///
/// [WebAuthn Extensions]: https://w3c.github.io/webauthn/#webauthn-extensions
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct AuthenticationExtensionsClientOutputs {
    /// Contains properties of the given [`PublicKeyCredential`] when it is included.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cred_props: Option<CredentialPropertiesOutput>,

    /// Extension outputs this library does not know about, in the order they were given.
    #[serde(flatten)]
    #[typeshare(skip)]
    pub unknown_keys: IndexMap<String, serde_json::Value>,
}

/// Credential properties reported by the client upon creation of a [`PublicKeyCredential`].
///
/// <https://w3c.github.io/webauthn/#sctn-authenticator-credential-properties-extension>
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct CredentialPropertiesOutput {
    /// Whether the created credential is a client-side [discoverable credential], or unknown when
    /// absent.
    ///
    /// [discoverable credential]: https://w3c.github.io/webauthn/#discoverable-credential
    #[serde(rename = "rk", default, skip_serializing_if = "Option::is_none")]
    pub discoverable: Option<bool>,
}
