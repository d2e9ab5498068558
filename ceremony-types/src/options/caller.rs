use serde::{Deserialize, Serialize};
use typeshare::typeshare;

use crate::{
    webauthn::{
        AttestationConveyancePreference, AuthenticationExtensionsClientInputs,
        AuthenticatorSelectionCriteria, PublicKeyCredentialDescriptor,
        PublicKeyCredentialParameters, PublicKeyCredentialRpEntity, PublicKeyCredentialUserEntity,
        UserVerificationRequirement,
    },
    Bytes,
};

/// Caller supplied values for a registration ceremony. Every field that is set takes precedence
/// over what the Relying Party's options say.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct CallerCreationOptions {
    /// Overrides the server's relying party.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rp: Option<PublicKeyCredentialRpEntity>,

    /// Overrides the server's user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<PublicKeyCredentialUserEntity>,

    /// Overrides the server's challenge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge: Option<Bytes>,

    /// Overrides the server's credential parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pub_key_cred_params: Option<Vec<PublicKeyCredentialParameters>>,

    /// Overrides the server's registration timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,

    /// Overrides the server's credential list as the exclusion list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_credentials: Option<Vec<PublicKeyCredentialDescriptor>>,

    /// Only ever comes from the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authenticator_selection: Option<AuthenticatorSelectionCriteria>,

    /// Only ever comes from the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attestation: Option<AttestationConveyancePreference>,

    /// Only ever comes from the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<AuthenticationExtensionsClientInputs>,
}

/// Caller supplied values for an authentication ceremony.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct CallerRequestOptions {
    /// Overrides the server's challenge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge: Option<Bytes>,

    /// Overrides the server's authentication timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,

    /// Overrides the id of the server's relying party.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rp_id: Option<String>,

    /// Overrides the server's credential list as the allow list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_credentials: Option<Vec<PublicKeyCredentialDescriptor>>,

    /// Defaults to [`UserVerificationRequirement::Preferred`] when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_verification: Option<UserVerificationRequirement>,

    /// Only ever comes from the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<AuthenticationExtensionsClientInputs>,
}
