//! Implementation of the types defined in [WebAuthn Level 3] that take part in a ceremony: the
//! options handed to the platform and the credentials it hands back.
//!
//! [WebAuthn Level 3]: https://w3c.github.io/webauthn

use serde::{Deserialize, Serialize};
use typeshare::typeshare;

use crate::{utils::serde::ignore_unknown, Bytes};

mod assertion;
mod attestation;
mod common;
mod extensions;

// re-export types
pub use self::{assertion::*, attestation::*, common::*, extensions::*};

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::AuthenticatorAssertionResponse {}
    impl Sealed for super::AuthenticatorAttestationResponse {}
}

/// Marker trait for response types
pub trait AuthenticatorResponse: sealed::Sealed {}

impl AuthenticatorResponse for AuthenticatorAssertionResponse {}
impl AuthenticatorResponse for AuthenticatorAttestationResponse {}

/// The credential a platform returns from a successful `create()` or `get()` ceremony.
///
/// Use the aliases depending on which ceremony produced it:
/// * Credential Creation: [CreatedPublicKeyCredential]
/// * Credential assertion: [AuthenticatedPublicKeyCredential]
///
/// <https://w3c.github.io/webauthn/#iface-pkcredential>
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct PublicKeyCredential<R: AuthenticatorResponse> {
    /// The base64url encoding of [Self::raw_id].
    pub id: String,

    /// The credential ID chosen by the authenticator.
    pub raw_id: Bytes,

    /// Always [PublicKeyCredentialType::PublicKey]
    #[serde(rename = "type", deserialize_with = "ignore_unknown")]
    pub ty: PublicKeyCredentialType,

    /// The authenticator's response, either an [AuthenticatorAttestationResponse] for `create()`
    /// or an [AuthenticatorAssertionResponse] for `get()`.
    pub response: R,

    /// This reports the modality of the communication between the client and authenticator.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "ignore_unknown"
    )]
    pub authenticator_attachment: Option<AuthenticatorAttachment>,

    /// Client extension outputs, keyed by extension identifier.
    #[serde(default)]
    pub client_extension_results: AuthenticationExtensionsClientOutputs,
}
