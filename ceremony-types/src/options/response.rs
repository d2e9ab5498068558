use serde::{Deserialize, Serialize};
use typeshare::typeshare;

use crate::{
    options::Parameters,
    utils::serde::{ignore_unknown, ignore_unknown_opt_vec, ignore_unknown_vec, maybe_stringified},
    webauthn::{
        AuthenticatorTransport, PublicKeyCredentialParameters, PublicKeyCredentialRpEntity,
        PublicKeyCredentialType,
    },
};

#[cfg(doc)]
use crate::options::ServerOptions;

/// The options resource exactly as the Relying Party serves it.
///
/// ```json
/// {
///   "relyingParty": { "id": "example.com", "name": "Example" },
///   "user": { "id": "dXNlcg", "name": "alex", "displayName": "Alex" },
///   "challenge": "AAEC",
///   "pubKeyCredParams": [{ "type": "public-key", "alg": -7 }],
///   "registrationTimeout": 60000,
///   "authenticationTimeout": 60000,
///   "credentials": [{ "type": "public-key", "id": "Y3JlZA" }],
///   "parameters": { "username": "username", "credentialId": "credentialId" }
/// }
/// ```
///
/// Convert it into [`ServerOptions`] with `TryFrom` to decode the binary fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct OptionsResponse {
    /// The Relying Party entity.
    pub relying_party: PublicKeyCredentialRpEntity,

    /// The user entity, when the server knows who is signing in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserEntityResponse>,

    /// The base64url encoded challenge.
    pub challenge: String,

    /// Acceptable credential algorithms in the server's order, unregistered identifiers included.
    /// Entries that are not a `type` and integer `alg` pair are dropped.
    #[serde(default, deserialize_with = "ignore_unknown_vec")]
    pub pub_key_cred_params: Vec<PublicKeyCredentialParameters>,

    /// Timeout for a registration ceremony in milliseconds.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "maybe_stringified"
    )]
    pub registration_timeout: Option<u32>,

    /// Timeout for an authentication ceremony in milliseconds.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "maybe_stringified"
    )]
    pub authentication_timeout: Option<u32>,

    /// The user's registered credentials with base64url encoded ids.
    #[serde(default)]
    pub credentials: Vec<CredentialDescriptorResponse>,

    /// Opaque parameters, passed through verbatim.
    #[serde(default)]
    #[typeshare(serialized_as = "HashMap<String, String>")]
    pub parameters: Parameters,
}

/// A user entity whose handle is still base64url encoded.
///
/// Older servers send `userHandle` and `username` instead of `id` and `name`, both spellings are
/// accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct UserEntityResponse {
    /// The base64url encoded user handle.
    #[serde(alias = "userHandle")]
    pub id: String,

    /// Identifier of the user account.
    #[serde(alias = "username")]
    pub name: String,

    /// Display name, [`Self::name`] is used in its place when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// A credential descriptor whose id is still base64url encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[typeshare]
pub struct CredentialDescriptorResponse {
    /// The credential type.
    #[serde(rename = "type", default, deserialize_with = "ignore_unknown")]
    pub ty: PublicKeyCredentialType,

    /// The base64url encoded credential id.
    pub id: String,

    /// Transport hints, if the server stored any.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "ignore_unknown_opt_vec"
    )]
    pub transports: Option<Vec<AuthenticatorTransport>>,
}
