//! Types specific to public key credential creation
use coset::iana::{self, EnumI64};
use serde::{Deserialize, Serialize};
use typeshare::typeshare;

use crate::{
    utils::serde::{
        ignore_unknown, ignore_unknown_opt_vec, ignore_unknown_vec_or_null, maybe_stringified,
    },
    webauthn::{
        AuthenticationExtensionsClientInputs, AuthenticatorAttachment, AuthenticatorTransport,
        PublicKeyCredential, PublicKeyCredentialDescriptor, PublicKeyCredentialType,
        UserVerificationRequirement,
    },
    Bytes,
};

/// The response to the successful creation of a PublicKeyCredential
#[typeshare]
pub type CreatedPublicKeyCredential = PublicKeyCredential<AuthenticatorAttestationResponse>;

/// This is the expected input to [`navigator.credentials.create`] when wanting to create a webauthn
/// credential.
///
/// <https://w3c.github.io/webauthn/#sctn-credentialcreationoptions-extension>
///
/// [`navigator.credentials.create`]: https://developer.mozilla.org/en-US/docs/Web/API/CredentialsContainer/create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct CredentialCreationOptions {
    /// The key defining that this is a request for a webauthn credential.
    pub public_key: PublicKeyCredentialCreationOptions,
}

/// The fully resolved request for creating a [`PublicKeyCredential`].
///
/// <https://w3c.github.io/webauthn/#dictdef-publickeycredentialcreationoptions>
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct PublicKeyCredentialCreationOptions {
    /// The [Relying Party] responsible for the request.
    ///
    /// [Relying Party]: https://w3c.github.io/webauthn/#relying-party
    pub rp: PublicKeyCredentialRpEntity,

    /// The user account performing the registration.
    pub user: PublicKeyCredentialUserEntity,

    /// The challenge the authenticator signs when producing the attestation for the new credential.
    ///
    /// See the [Cryptographic Challenges] security consideration.
    ///
    /// [Cryptographic Challenges]: https://w3c.github.io/webauthn/#sctn-cryptographic-challenges
    pub challenge: Bytes,

    /// Key types and signature algorithms the Relying Party supports, from most to least preferred.
    pub pub_key_cred_params: Vec<PublicKeyCredentialParameters>,

    /// Time, in milliseconds, that the Relying Party is willing to wait for the call to complete.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "maybe_stringified"
    )]
    pub timeout: Option<u32>,

    /// Credentials already registered for this user account, so that the new credential is not
    /// created on an authenticator that already holds one of them.
    #[serde(default, deserialize_with = "ignore_unknown_vec_or_null")]
    pub exclude_credentials: Vec<PublicKeyCredentialDescriptor>,

    /// Capabilities and settings the authenticator must or should satisfy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authenticator_selection: Option<AuthenticatorSelectionCriteria>,

    /// The Relying Party's preference regarding attestation conveyance. Absent means the
    /// platform default, [`AttestationConveyancePreference::None`].
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "ignore_unknown"
    )]
    pub attestation: Option<AttestationConveyancePreference>,

    /// Client extension inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<AuthenticationExtensionsClientInputs>,
}

/// The Relying Party attributes of a ceremony.
///
/// <https://w3c.github.io/webauthn/#dictdef-publickeycredentialrpentity>
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[typeshare]
pub struct PublicKeyCredentialRpEntity {
    /// A unique identifier for the [Relying Party] entity, which sets the [RP ID].
    ///
    /// If omitted, the platform uses the requesting origin's [effective domain].
    ///
    /// [Relying Party]: https://w3c.github.io/webauthn/#relying-party
    /// [RP ID]: https://w3c.github.io/webauthn/#rp-id
    /// [effective domain]: https://html.spec.whatwg.org/multipage/browsers.html#concept-origin-effective-domain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// A human palatable identifier for the Relying Party, intended only for display.
    pub name: String,

    /// A URL to an icon for the Relying Party. Removed in WebAuthn Level 2 but still sent by some
    /// servers, it is carried along untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// The user account attributes of a registration ceremony.
///
/// <https://w3c.github.io/webauthn/#dictdef-publickeycredentialuserentity>
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct PublicKeyCredentialUserEntity {
    /// The user handle: an opaque byte sequence of at most 64 bytes, never shown to the user.
    pub id: Bytes,

    /// A human-palatable name for the user account, intended only for display.
    pub display_name: String,

    /// A human-palatable identifier for the user account, such as `alex.mueller@example.com`.
    pub name: String,
}

/// A key type and signature algorithm acceptable for a new credential.
///
/// <https://w3c.github.io/webauthn/#dictdef-publickeycredentialparameters>
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[typeshare]
pub struct PublicKeyCredentialParameters {
    /// The type of credential to be created.
    #[serde(rename = "type", deserialize_with = "ignore_unknown")]
    pub ty: PublicKeyCredentialType,

    /// The algorithm the new credential will be used with.
    pub alg: CoseAlgorithmIdentifier,
}

/// A [COSEAlgorithmIdentifier] as the Relying Party wrote it.
///
/// Identifiers without an IANA registration are kept as is, the platform decides whether it
/// supports them.
///
/// [COSEAlgorithmIdentifier]: https://w3c.github.io/webauthn/#typedefdef-cosealgorithmidentifier
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(transparent)]
#[typeshare(serialized_as = "I54")] // because i64 fails for js
pub struct CoseAlgorithmIdentifier(pub i64);

impl CoseAlgorithmIdentifier {
    /// The registered algorithm, if this identifier has one.
    pub fn algorithm(self) -> Option<iana::Algorithm> {
        iana::Algorithm::from_i64(self.0)
    }
}

impl From<iana::Algorithm> for CoseAlgorithmIdentifier {
    fn from(value: iana::Algorithm) -> Self {
        Self(value.to_i64())
    }
}

impl PartialEq<iana::Algorithm> for CoseAlgorithmIdentifier {
    fn eq(&self, other: &iana::Algorithm) -> bool {
        self.0 == other.to_i64()
    }
}

impl PublicKeyCredentialParameters {
    /// The algorithms a client should ask for when neither the caller nor the Relying Party
    /// listed any:
    /// * [`iana::Algorithm::ES256`]
    /// * [`iana::Algorithm::RS256`]
    ///
    /// <https://w3c.github.io/webauthn/#ref-for-list-size>
    pub fn default_algorithms() -> Vec<Self> {
        vec![
            Self {
                ty: PublicKeyCredentialType::PublicKey,
                alg: iana::Algorithm::ES256.into(),
            },
            Self {
                ty: PublicKeyCredentialType::PublicKey,
                alg: iana::Algorithm::RS256.into(),
            },
        ]
    }
}

/// Requirements regarding authenticator attributes.
///
/// <https://w3c.github.io/webauthn/#dictdef-authenticatorselectioncriteria>
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct AuthenticatorSelectionCriteria {
    /// Restrict eligible authenticators to the given attachment modality.
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "ignore_unknown",
        default
    )]
    pub authenticator_attachment: Option<AuthenticatorAttachment>,

    /// The extent to which a client-side [discoverable credential] is wanted.
    ///
    /// [discoverable credential]: https://w3c.github.io/webauthn/#client-side-discoverable-credential
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "ignore_unknown",
        default
    )]
    pub resident_key: Option<ResidentKeyRequirement>,

    /// Level 1 spelling of [`Self::resident_key`] being [`ResidentKeyRequirement::Required`].
    #[serde(default)]
    pub require_resident_key: bool,

    /// User verification requirement for the `create()` operation.
    #[serde(default, deserialize_with = "ignore_unknown")]
    pub user_verification: UserVerificationRequirement,
}

/// Requirements for client-side [discoverable credentials], formerly known as resident keys.
///
/// <https://w3c.github.io/webauthn/#enumdef-residentkeyrequirement>
///
/// [discoverable credentials]: https://w3c.github.io/webauthn/#client-side-discoverable-credential
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[typeshare(serialized_as = "String")]
pub enum ResidentKeyRequirement {
    /// Prefer a server-side credential, accept a discoverable one.
    Discouraged,

    /// Prefer a discoverable credential, accept a server-side one.
    Preferred,

    /// A discoverable credential is required.
    Required,
}

/// Preference regarding [attestation conveyance] during credential generation.
///
/// <https://w3c.github.io/webauthn/#enumdef-attestationconveyancepreference>
///
/// [attestation conveyance]: https://w3c.github.io/webauthn/#attestation-conveyance
#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[typeshare(serialized_as = "String")]
pub enum AttestationConveyancePreference {
    /// Not interested in authenticator attestation.
    #[default]
    None,

    /// A verifiable attestation statement is wanted, but the client may decide how to obtain it.
    Indirect,

    /// The attestation statement as generated by the authenticator is wanted.
    Direct,

    /// An attestation that may include uniquely identifying information, for controlled
    /// enterprise deployments.
    Enterprise,
}

/// The authenticator's response to a `create()` ceremony.
///
/// <https://w3c.github.io/webauthn/#iface-authenticatorattestationresponse>
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct AuthenticatorAttestationResponse {
    /// The exact JSON serialization of the client data that was hashed for this credential.
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: Bytes,

    /// The attestation object, opaque to the client.
    pub attestation_object: Bytes,

    /// The transports the authenticator is believed to support.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "ignore_unknown_opt_vec"
    )]
    pub transports: Option<Vec<AuthenticatorTransport>>,
}
