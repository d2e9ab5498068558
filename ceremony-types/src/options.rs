//! The Relying Party's ceremony options, both as they travel over HTTP and once decoded.
//!
//! A Relying Party serves a single options resource describing both ceremonies. Its binary fields
//! are base64url strings on the wire ([`OptionsResponse`]) and become [`Bytes`] once decoded into
//! [`ServerOptions`]. Callers may override any of those values through [`CallerCreationOptions`]
//! and [`CallerRequestOptions`].

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use typeshare::typeshare;

use crate::{
    encoding,
    webauthn::{
        PublicKeyCredentialDescriptor, PublicKeyCredentialParameters, PublicKeyCredentialRpEntity,
        PublicKeyCredentialUserEntity,
    },
    Bytes,
};

mod caller;
mod response;


pub use self::{caller::*, response::*};

/// Opaque server-defined key/value pairs echoed back through a ceremony.
///
/// Servers use it to name the form fields they expect the resulting credential under, with keys
/// such as `username`, `credentialId` or `clientDataJSON`. Order is preserved.
pub type Parameters = IndexMap<String, String>;

/// The Relying Party's ceremony options with every binary field decoded.
///
/// A value lives for a single fetch, decode and use cycle, nothing in the ceremony crates caches it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[typeshare]
pub struct ServerOptions {
    /// The Relying Party as described by the server.
    pub relying_party: PublicKeyCredentialRpEntity,

    /// The user account the options were generated for, absent when the session is anonymous.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<PublicKeyCredentialUserEntity>,

    /// The challenge for the next ceremony.
    pub challenge: Bytes,

    /// Acceptable credential algorithms, most preferred first.
    pub pub_key_cred_params: Vec<PublicKeyCredentialParameters>,

    /// Timeout for a registration ceremony in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_timeout: Option<u32>,

    /// Timeout for an authentication ceremony in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication_timeout: Option<u32>,

    /// Credentials already registered for the user. They become the exclusion list of a
    /// registration and the allow list of an authentication.
    #[serde(default)]
    pub credentials: Vec<PublicKeyCredentialDescriptor>,

    /// See [`Parameters`].
    #[serde(default)]
    #[typeshare(serialized_as = "HashMap<String, String>")]
    pub parameters: Parameters,
}

/// A binary field of an [`OptionsResponse`] is not valid base64url.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodeError {
    /// Path of the offending field, e.g. `challenge` or `credentials[1].id`.
    pub field: String,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field `{}` is not base64url encoded", self.field)
    }
}

impl std::error::Error for DecodeError {}

fn decode(value: &str, field: impl FnOnce() -> String) -> Result<Bytes, DecodeError> {
    encoding::try_from_base64url(value)
        .map(Bytes::from)
        .ok_or_else(|| DecodeError { field: field() })
}

impl TryFrom<OptionsResponse> for ServerOptions {
    type Error = DecodeError;

    /// Decode the wire representation, failing on the first binary field that is not base64url.
    fn try_from(response: OptionsResponse) -> Result<Self, Self::Error> {
        let OptionsResponse {
            relying_party,
            user,
            challenge,
            pub_key_cred_params,
            registration_timeout,
            authentication_timeout,
            credentials,
            parameters,
        } = response;

        let challenge = decode(&challenge, || "challenge".to_owned())?;

        let user = user
            .map(|user| {
                Ok::<_, DecodeError>(PublicKeyCredentialUserEntity {
                    id: decode(&user.id, || "user.id".to_owned())?,
                    display_name: user.display_name.unwrap_or_else(|| user.name.clone()),
                    name: user.name,
                })
            })
            .transpose()?;

        let credentials = credentials
            .into_iter()
            .enumerate()
            .map(|(index, credential)| {
                Ok(PublicKeyCredentialDescriptor {
                    ty: credential.ty,
                    id: decode(&credential.id, || format!("credentials[{index}].id"))?,
                    transports: credential.transports,
                })
            })
            .collect::<Result<Vec<_>, DecodeError>>()?;

        Ok(ServerOptions {
            relying_party,
            user,
            challenge,
            pub_key_cred_params,
            registration_timeout,
            authentication_timeout,
            credentials,
            parameters,
        })
    }
}
