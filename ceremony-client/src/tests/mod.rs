use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};

use super::*;
use ceremony_types::{
    options::OptionsResponse,
    webauthn::{
        self, AuthenticatedPublicKeyCredential, AuthenticatorAssertionResponse,
        AuthenticatorAttestationResponse, CreatedPublicKeyCredential, CredentialCreationOptions,
        CredentialRequestOptions, PublicKeyCredential, PublicKeyCredentialDescriptor,
        PublicKeyCredentialType, UserVerificationRequirement,
    },
    Bytes,
};


const RESPONSE: &str = r#"{
    "relyingParty": { "id": "example.com", "name": "Example" },
    "user": { "id": "dXNlcg", "name": "alex", "displayName": "Alex" },
    "challenge": "AAEC",
    "pubKeyCredParams": [
        { "type": "public-key", "alg": -7 },
        { "type": "public-key", "alg": -257 }
    ],
    "registrationTimeout": 9000,
    "authenticationTimeout": 4000,
    "credentials": [
        { "type": "public-key", "id": "Y3JlZC0x" },
        { "type": "public-key", "id": "Y3JlZC0y", "transports": ["internal"] }
    ],
    "parameters": { "username": "user", "credentialId": "credential_id" }
}"#;

fn options_response() -> OptionsResponse {
    serde_json::from_str(RESPONSE).expect("failed to parse options response")
}

fn server_options() -> ServerOptions {
    ServerOptions::try_from(options_response()).expect("failed to decode options response")
}

/// Serves a fixed options document and remembers every URL it was asked for.
struct TestFetcher {
    response: Result<OptionsResponse, TransportError>,
    calls: AtomicUsize,
    urls: Mutex<Vec<String>>,
}

impl TestFetcher {
    fn serving(response: OptionsResponse) -> Self {
        Self {
            response: Ok(response),
            calls: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
        }
    }

    fn failing(error: TransportError) -> Self {
        Self {
            response: Err(error),
            calls: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

impl OptionsFetcher for TestFetcher {
    async fn fetch_options(&self, url: &str) -> Result<OptionsResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(url.to_owned());
        self.response.clone()
    }
}

/// A platform that resolves every ceremony to the options it was given.
struct EchoContainer;

#[async_trait::async_trait]
impl CredentialsContainer for EchoContainer {
    type CreatedCredential = CredentialCreationOptions;
    type AuthenticatedCredential = CredentialRequestOptions;

    async fn create(
        &self,
        options: CredentialCreationOptions,
    ) -> Result<Self::CreatedCredential, PlatformError> {
        Ok(options)
    }

    async fn get(
        &self,
        options: CredentialRequestOptions,
    ) -> Result<Self::AuthenticatedCredential, PlatformError> {
        Ok(options)
    }
}

fn created_credential() -> CreatedPublicKeyCredential {
    PublicKeyCredential {
        id: "AQID".into(),
        raw_id: vec![1, 2, 3].into(),
        ty: PublicKeyCredentialType::PublicKey,
        response: AuthenticatorAttestationResponse {
            client_data_json: b"{}".to_vec().into(),
            attestation_object: vec![0xa0].into(),
            transports: None,
        },
        authenticator_attachment: None,
        client_extension_results: Default::default(),
    }
}

fn authenticated_credential() -> AuthenticatedPublicKeyCredential {
    PublicKeyCredential {
        id: "AQID".into(),
        raw_id: vec![1, 2, 3].into(),
        ty: PublicKeyCredentialType::PublicKey,
        response: AuthenticatorAssertionResponse {
            client_data_json: b"{}".to_vec().into(),
            authenticator_data: vec![0; 37].into(),
            signature: vec![0x30].into(),
            user_handle: Some(b"user".to_vec().into()),
        },
        authenticator_attachment: None,
        client_extension_results: Default::default(),
    }
}

#[tokio::test]
async fn explicit_server_options_skip_fetch() {
    let service = WebauthnService::new(EchoContainer, TestFetcher::serving(options_response()));

    let explicit = service
        .create_credential(Default::default(), Some(server_options()))
        .await
        .expect("create with explicit options failed");
    service
        .get_credential(Default::default(), Some(server_options()))
        .await
        .expect("get with explicit options failed");

    assert_eq!(service.fetcher().calls(), 0);
    assert_eq!(explicit.public_key.challenge, Bytes::from(vec![0, 1, 2]));
}

#[tokio::test]
async fn explicit_and_fetched_options_negotiate_identically() {
    let service = WebauthnService::new(EchoContainer, TestFetcher::serving(options_response()));
    let caller = CallerCreationOptions {
        timeout: Some(5000),
        ..Default::default()
    };

    let fetched = service.create_credential(caller.clone(), None).await.unwrap();
    let explicit = service
        .create_credential(caller, Some(server_options()))
        .await
        .unwrap();
    assert_eq!(fetched, explicit);

    let fetched = service.get_credential(Default::default(), None).await.unwrap();
    let explicit = service
        .get_credential(Default::default(), Some(server_options()))
        .await
        .unwrap();
    assert_eq!(fetched, explicit);

    assert_eq!(service.fetcher().calls(), 2);
}

#[tokio::test]
async fn fetch_uses_default_url() {
    let service = WebauthnService::new(EchoContainer, TestFetcher::serving(options_response()));

    assert_eq!(service.options_url(), DEFAULT_OPTIONS_URL);
    service.fetch_server_options().await.unwrap();

    assert_eq!(service.fetcher().urls(), ["/webauthn/options"]);
}

#[tokio::test]
async fn set_options_url_applies_to_next_fetch() {
    let mut service =
        WebauthnService::new(EchoContainer, TestFetcher::serving(options_response()));
    service.fetch_server_options().await.unwrap();

    service.set_options_url("/api/passkeys/options");
    assert_eq!(service.options_url(), "/api/passkeys/options");
    service
        .get_credential(Default::default(), None)
        .await
        .unwrap();

    assert_eq!(
        service.fetcher().urls(),
        ["/webauthn/options", "/api/passkeys/options"]
    );
}

#[tokio::test]
async fn with_options_url_configures_service() {
    let service = WebauthnService::new(EchoContainer, TestFetcher::serving(options_response()))
        .with_options_url("https://rp.example/options");

    service.fetch_server_options().await.unwrap();

    assert_eq!(service.fetcher().urls(), ["https://rp.example/options"]);
}

#[tokio::test]
async fn transport_error_is_propagated() {
    let mut container = MockCredentialsContainer::new();
    container.expect_create().never();
    container.expect_get().never();
    let service = WebauthnService::new(container, TestFetcher::failing(TransportError::Status(503)));

    let create = service.create_credential(Default::default(), None).await;
    assert_eq!(
        create.unwrap_err(),
        WebauthnError::Transport(TransportError::Status(503))
    );

    let get = service.get_credential(Default::default(), None).await;
    assert_eq!(
        get.unwrap_err(),
        WebauthnError::Transport(TransportError::Status(503))
    );
}

#[tokio::test]
async fn malformed_challenge_fails_before_ceremony() {
    let mut response = options_response();
    response.challenge = "not*base64".into();
    let mut container = MockCredentialsContainer::new();
    container.expect_get().never();
    let service = WebauthnService::new(container, TestFetcher::serving(response));

    let err = service
        .get_credential(Default::default(), None)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        WebauthnError::Decode(DecodeError {
            field: "challenge".into()
        })
    );
}

#[tokio::test]
async fn missing_user_fails_before_ceremony() {
    let mut server = server_options();
    server.user = None;
    let mut container = MockCredentialsContainer::new();
    container.expect_create().never();
    let service = WebauthnService::new(container, ());

    let err = service
        .create_credential(Default::default(), Some(server))
        .await
        .unwrap_err();

    assert_eq!(err, WebauthnError::MissingUser);
}

#[tokio::test]
async fn create_calls_platform_once_with_negotiated_options() {
    let mut container = MockCredentialsContainer::new();
    container
        .expect_create()
        .withf(|options| {
            options.public_key.timeout == Some(9000)
                && options.public_key.user.name == "alex"
                && options.public_key.exclude_credentials.len() == 2
        })
        .times(1)
        .returning(|_| Ok(created_credential()));
    let service = WebauthnService::new(container, ());

    let credential = service
        .create_credential(Default::default(), Some(server_options()))
        .await
        .expect("create failed");

    assert_eq!(credential, created_credential());
}

#[tokio::test]
async fn get_calls_platform_once_with_negotiated_options() {
    let mut container = MockCredentialsContainer::new();
    container
        .expect_get()
        .withf(|options| {
            options.public_key.rp_id.as_deref() == Some("example.com")
                && options.public_key.user_verification == UserVerificationRequirement::Preferred
        })
        .times(1)
        .returning(|_| Ok(authenticated_credential()));
    let service = WebauthnService::new(container, ());

    let credential = service
        .get_credential(Default::default(), Some(server_options()))
        .await
        .expect("get failed");

    assert_eq!(credential, authenticated_credential());
}

#[tokio::test]
async fn platform_error_is_propagated_unchanged() {
    let mut container = MockCredentialsContainer::new();
    container
        .expect_get()
        .times(1)
        .returning(|_| Err(PlatformError::new("NotAllowedError", "The operation timed out.")));
    let service = WebauthnService::new(container, ());

    let err = service
        .get_credential(Default::default(), Some(server_options()))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        WebauthnError::Ceremony(PlatformError::new(
            "NotAllowedError",
            "The operation timed out."
        ))
    );
}

#[tokio::test]
async fn unit_fetcher_reports_network_error() {
    let service = WebauthnService::new(EchoContainer, ());

    let err = service.fetch_server_options().await.unwrap_err();

    assert!(matches!(
        err,
        WebauthnError::Transport(TransportError::Network(_))
    ));
}

#[test]
fn errors_serialize_tagged() {
    let err = WebauthnError::Transport(TransportError::Status(404));
    assert_eq!(
        serde_json::to_value(&err).unwrap(),
        serde_json::json!({ "type": "Transport", "content": { "type": "Status", "content": 404 } })
    );

    let err = WebauthnError::MissingUser;
    assert_eq!(
        serde_json::to_value(&err).unwrap(),
        serde_json::json!({ "type": "MissingUser" })
    );
}

#[test]
fn explicit_descriptors_are_binary() {
    let server = server_options();

    assert_eq!(
        server.credentials[0],
        PublicKeyCredentialDescriptor::public_key(b"cred-1".to_vec())
    );
    assert_eq!(
        server.credentials[1].transports,
        Some(vec![webauthn::AuthenticatorTransport::Internal])
    );
}
