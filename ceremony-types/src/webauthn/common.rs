//! Common types used in both Attestation (registration) and Assertion (authentication).
//!
use serde::{Deserialize, Serialize};
use typeshare::typeshare;

use crate::{
    utils::serde::{ignore_unknown, ignore_unknown_opt_vec},
    Bytes,
};

#[cfg(doc)]
use crate::webauthn::{PublicKeyCredentialCreationOptions, PublicKeyCredentialRequestOptions};

/// The valid credential types. Values can be added to it in the future, as more credential types
/// are defined.
///
/// <https://w3c.github.io/webauthn/#enumdef-publickeycredentialtype>
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
#[typeshare(serialized_as = "String")]
pub enum PublicKeyCredentialType {
    /// The public counterpart of an asymmetric key pair, currently the only defined type.
    PublicKey,
    /// This is the default as it will be ignored if the value is unknown during deserialization
    #[default]
    Unknown,
}

/// References a previously registered credential. It is used in
/// [`PublicKeyCredentialCreationOptions::exclude_credentials`] to avoid registering the same
/// authenticator twice, and in [`PublicKeyCredentialRequestOptions::allow_credentials`] to restrict
/// which credentials may answer an assertion.
///
/// <https://w3c.github.io/webauthn/#dictdef-publickeycredentialdescriptor>
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[typeshare]
pub struct PublicKeyCredentialDescriptor {
    /// The type of the referenced credential. Client platforms MUST ignore descriptors of an
    /// [`PublicKeyCredentialType::Unknown`] type.
    #[serde(rename = "type", deserialize_with = "ignore_unknown")]
    pub ty: PublicKeyCredentialType,

    /// The credential ID of the referenced credential.
    pub id: Bytes,

    /// Hints as to how the client might reach the authenticator managing this credential.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "ignore_unknown_opt_vec"
    )]
    pub transports: Option<Vec<AuthenticatorTransport>>,
}

impl PublicKeyCredentialDescriptor {
    /// Create a descriptor for a public key credential with the given `id` and no transport hints.
    pub fn public_key(id: impl Into<Bytes>) -> Self {
        Self {
            ty: PublicKeyCredentialType::PublicKey,
            id: id.into(),
            transports: None,
        }
    }
}

/// A Relying Party may require [user verification] for some of its operations but not for others,
/// and may use this type to express its needs.
///
/// <https://w3c.github.io/webauthn/#enumdef-userverificationrequirement>
///
/// [user verification]: https://w3c.github.io/webauthn/#user-verification
#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[typeshare(serialized_as = "String")]
pub enum UserVerificationRequirement {
    /// The ceremony fails if the user cannot be verified.
    Required,

    /// Verify the user if possible, without failing the ceremony otherwise. This is the value used
    /// when neither the caller nor the Relying Party states a preference.
    #[default]
    Preferred,

    /// The Relying Party does not want user verification employed during the operation.
    Discouraged,
}

/// Hints as to how clients might communicate with a particular authenticator.
///
/// <https://w3c.github.io/webauthn/#enum-transport>
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[typeshare(serialized_as = "String")]
pub enum AuthenticatorTransport {
    /// Removable USB.
    Usb,

    /// Near Field Communication (NFC).
    Nfc,

    /// Bluetooth Low Energy.
    Ble,

    /// A combination of data-transport and proximity mechanisms, such as signing in on a desktop
    /// with a phone.
    #[serde(alias = "cable")]
    Hybrid,

    /// A platform authenticator built into the client device.
    Internal,
}

/// The attachment modality of an authenticator.
///
/// <https://w3c.github.io/webauthn/#enumdef-authenticatorattachment>
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
#[typeshare(serialized_as = "String")]
pub enum AuthenticatorAttachment {
    /// Attached through a client device-specific transport and usually not removable.
    Platform,

    /// Removable authenticators that can roam between client devices.
    CrossPlatform,
}
