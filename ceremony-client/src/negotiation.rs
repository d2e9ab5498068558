//! Field by field merges of caller options over the Relying Party's options.
//!
//! Both merges only read their inputs and build a fresh value, so the same [`ServerOptions`] can
//! back any number of ceremonies.

use ceremony_types::{
    options::{CallerCreationOptions, CallerRequestOptions, ServerOptions},
    webauthn::{
        CredentialCreationOptions, CredentialRequestOptions, PublicKeyCredentialCreationOptions,
        PublicKeyCredentialParameters, PublicKeyCredentialRequestOptions,
        UserVerificationRequirement,
    },
};

use crate::WebauthnError;

/// Resolve the options of a registration ceremony.
///
/// | field                     | source                                          |
/// |---------------------------|-------------------------------------------------|
/// | `rp`                      | caller, else `server.relying_party`             |
/// | `user`                    | caller, else `server.user`, else an error       |
/// | `challenge`               | caller, else server                             |
/// | `pub_key_cred_params`     | caller, else server, ES256 and RS256 if empty   |
/// | `timeout`                 | caller, else `server.registration_timeout`      |
/// | `exclude_credentials`     | caller, else `server.credentials`               |
/// | `authenticator_selection` | caller only                                     |
/// | `attestation`             | caller only                                     |
/// | `extensions`              | caller only                                     |
///
/// Fails with [`WebauthnError::MissingUser`] when neither side names a user.
pub fn negotiate_creation(
    caller: &CallerCreationOptions,
    server: &ServerOptions,
) -> Result<CredentialCreationOptions, WebauthnError> {
    let user = caller
        .user
        .as_ref()
        .or(server.user.as_ref())
        .cloned()
        .ok_or(WebauthnError::MissingUser)?;

    let mut pub_key_cred_params = caller
        .pub_key_cred_params
        .clone()
        .unwrap_or_else(|| server.pub_key_cred_params.clone());
    if pub_key_cred_params.is_empty() {
        pub_key_cred_params = PublicKeyCredentialParameters::default_algorithms();
    }

    let public_key = PublicKeyCredentialCreationOptions {
        rp: caller
            .rp
            .clone()
            .unwrap_or_else(|| server.relying_party.clone()),
        user,
        challenge: caller
            .challenge
            .clone()
            .unwrap_or_else(|| server.challenge.clone()),
        pub_key_cred_params,
        timeout: caller.timeout.or(server.registration_timeout),
        exclude_credentials: caller
            .exclude_credentials
            .clone()
            .unwrap_or_else(|| server.credentials.clone()),
        authenticator_selection: caller.authenticator_selection.clone(),
        attestation: caller.attestation,
        extensions: caller.extensions.clone(),
    };

    Ok(CredentialCreationOptions { public_key })
}

/// Resolve the options of an authentication ceremony.
///
/// | field               | source                                       |
/// |---------------------|----------------------------------------------|
/// | `challenge`         | caller, else server                          |
/// | `timeout`           | caller, else `server.authentication_timeout` |
/// | `rp_id`             | caller, else `server.relying_party.id`       |
/// | `allow_credentials` | caller, else `server.credentials`            |
/// | `user_verification` | caller, else `preferred`                     |
/// | `extensions`        | caller only                                  |
pub fn negotiate_request(
    caller: &CallerRequestOptions,
    server: &ServerOptions,
) -> CredentialRequestOptions {
    let public_key = PublicKeyCredentialRequestOptions {
        challenge: caller
            .challenge
            .clone()
            .unwrap_or_else(|| server.challenge.clone()),
        timeout: caller.timeout.or(server.authentication_timeout),
        rp_id: caller
            .rp_id
            .clone()
            .or_else(|| server.relying_party.id.clone()),
        allow_credentials: caller
            .allow_credentials
            .clone()
            .unwrap_or_else(|| server.credentials.clone()),
        user_verification: caller
            .user_verification
            .unwrap_or(UserVerificationRequirement::Preferred),
        extensions: caller.extensions.clone(),
    };

    CredentialRequestOptions { public_key }
}
