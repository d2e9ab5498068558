//! Types used for public key authentication

use serde::{Deserialize, Serialize};
use typeshare::typeshare;

use crate::{
    utils::serde::{ignore_unknown, ignore_unknown_vec_or_null, maybe_stringified},
    webauthn::{
        AuthenticationExtensionsClientInputs, PublicKeyCredential, PublicKeyCredentialDescriptor,
        UserVerificationRequirement,
    },
    Bytes,
};

/// The response to the successful authentication of a [`PublicKeyCredential`]
#[typeshare]
pub type AuthenticatedPublicKeyCredential = PublicKeyCredential<AuthenticatorAssertionResponse>;

/// The fully resolved request handed to a `get()` ceremony.
///
/// <https://w3c.github.io/webauthn/#dictdef-publickeycredentialrequestoptions>
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct PublicKeyCredentialRequestOptions {
    /// The challenge the authenticator signs when producing the assertion.
    ///
    /// See the [Cryptographic Challenges] security consideration.
    ///
    /// [Cryptographic Challenges]: https://w3c.github.io/webauthn/#sctn-cryptographic-challenges
    pub challenge: Bytes,

    /// Time, in milliseconds, that the Relying Party is willing to wait for the call to complete.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "maybe_stringified"
    )]
    pub timeout: Option<u32>,

    /// The [RP ID] claimed by the Relying Party. If omitted, the platform uses the requesting
    /// origin's effective domain.
    ///
    /// [RP ID]: https://w3c.github.io/webauthn/#rp-id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rp_id: Option<String>,

    /// The credentials eligible for this assertion, most preferred first. An empty list lets the
    /// authenticator offer any discoverable credential scoped to the Relying Party.
    #[serde(default, deserialize_with = "ignore_unknown_vec_or_null")]
    pub allow_credentials: Vec<PublicKeyCredentialDescriptor>,

    /// User verification requirement for the `get()` operation.
    #[serde(default, deserialize_with = "ignore_unknown")]
    pub user_verification: UserVerificationRequirement,

    /// Client extension inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<AuthenticationExtensionsClientInputs>,
}

/// This is the expected input to [`navigator.credentials.get`] when wanting to authenticate using a
/// webauthn credential.
///
/// <https://w3c.github.io/webauthn/#sctn-credentialrequestoptions-extension>
///
/// [`navigator.credentials.get`]: https://developer.mozilla.org/en-US/docs/Web/API/CredentialsContainer/get
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct CredentialRequestOptions {
    /// The key defining that this is a request for a webauthn credential.
    pub public_key: PublicKeyCredentialRequestOptions,
}

/// The authenticator's response to a `get()` ceremony.
///
/// <https://w3c.github.io/webauthn/#iface-authenticatorassertionresponse>
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct AuthenticatorAssertionResponse {
    /// The exact JSON serialization of the client data that was signed.
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: Bytes,

    /// The authenticator data returned by the authenticator.
    pub authenticator_data: Bytes,

    /// The raw signature returned from the authenticator.
    pub signature: Bytes,

    /// The user handle returned from the authenticator, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_handle: Option<Bytes>,
}
