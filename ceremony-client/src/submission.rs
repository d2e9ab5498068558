use ceremony_types::{encoding, options::Parameters, webauthn::AuthenticatedPublicKeyCredential};

const USERNAME: &str = "username";
const CREDENTIAL_ID: &str = "credentialId";
const CLIENT_DATA_JSON: &str = "clientDataJSON";
const AUTHENTICATOR_DATA: &str = "authenticatorData";
const SIGNATURE: &str = "signature";
const CLIENT_EXTENSIONS_JSON: &str = "clientExtensionsJSON";

/// The form fields posted back to the Relying Party after an authentication ceremony.
///
/// The Relying Party chooses the field names through the `parameters` of its options, keyed by a
/// fixed set of logical names (`username`, `credentialId`, `clientDataJSON`, `authenticatorData`,
/// `signature` and `clientExtensionsJSON`). A logical name it does not map is used as the field
/// name itself. The `password` entry some servers include is never filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionSubmission {
    fields: Vec<(String, String)>,
}

impl AssertionSubmission {
    /// Encode `credential` into the fields named by `parameters`. Binary values become unpadded
    /// base64url.
    ///
    /// The username field is only present when a `username` is given, which is not the case for
    /// a resident key login.
    pub fn encode(
        parameters: &Parameters,
        credential: &AuthenticatedPublicKeyCredential,
        username: Option<&str>,
    ) -> Result<Self, serde_json::Error> {
        let name = |key: &str| {
            parameters
                .get(key)
                .cloned()
                .unwrap_or_else(|| key.to_owned())
        };
        let response = &credential.response;

        let mut fields = Vec::with_capacity(6);
        if let Some(username) = username {
            fields.push((name(USERNAME), username.to_owned()));
        }
        fields.push((name(CREDENTIAL_ID), encoding::base64url(&credential.raw_id)));
        fields.push((
            name(CLIENT_DATA_JSON),
            encoding::base64url(&response.client_data_json),
        ));
        fields.push((
            name(AUTHENTICATOR_DATA),
            encoding::base64url(&response.authenticator_data),
        ));
        fields.push((name(SIGNATURE), encoding::base64url(&response.signature)));
        fields.push((
            name(CLIENT_EXTENSIONS_JSON),
            serde_json::to_string(&credential.client_extension_results)?,
        ));

        Ok(Self { fields })
    }

    /// The `(name, value)` pairs in submission order.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// The value submitted under the field `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// The fields as an `application/x-www-form-urlencoded` body.
    pub fn to_form_body(&self) -> String {
        let mut body = url::form_urlencoded::Serializer::new(String::new());
        for (name, value) in &self.fields {
            body.append_pair(name, value);
        }
        body.finish()
    }
}

impl IntoIterator for AssertionSubmission {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use ceremony_types::webauthn::{
        AuthenticationExtensionsClientOutputs, AuthenticatorAssertionResponse,
        CredentialPropertiesOutput, PublicKeyCredential, PublicKeyCredentialType,
    };

    use super::*;

    fn credential() -> AuthenticatedPublicKeyCredential {
        PublicKeyCredential {
            id: "AQID".into(),
            raw_id: vec![1, 2, 3].into(),
            ty: PublicKeyCredentialType::PublicKey,
            response: AuthenticatorAssertionResponse {
                client_data_json: br#"{"type":"webauthn.get"}"#.to_vec().into(),
                authenticator_data: vec![0xff; 4].into(),
                signature: vec![0xfb, 0xef].into(),
                user_handle: None,
            },
            authenticator_attachment: None,
            client_extension_results: AuthenticationExtensionsClientOutputs {
                cred_props: Some(CredentialPropertiesOutput {
                    discoverable: Some(true),
                }),
                ..Default::default()
            },
        }
    }

    fn server_parameters() -> Parameters {
        [
            ("username", "user"),
            ("password", "pass"),
            ("credentialId", "credential_id"),
            ("clientDataJSON", "client_data"),
            ("authenticatorData", "authenticator_data"),
            ("signature", "sig"),
            ("clientExtensionsJSON", "extensions"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect()
    }

    #[test]
    fn fields_use_server_chosen_names() {
        let submission =
            AssertionSubmission::encode(&server_parameters(), &credential(), Some("alice"))
                .unwrap();

        let names: Vec<&str> = submission
            .fields()
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(
            names,
            [
                "user",
                "credential_id",
                "client_data",
                "authenticator_data",
                "sig",
                "extensions"
            ]
        );
        assert_eq!(submission.get("user"), Some("alice"));
        assert_eq!(submission.get("credential_id"), Some("AQID"));
        assert_eq!(submission.get("client_data"), Some("eyJ0eXBlIjoid2ViYXV0aG4uZ2V0In0"));
        assert_eq!(submission.get("authenticator_data"), Some("_____w"));
        assert_eq!(submission.get("sig"), Some("--8"));
        assert_eq!(submission.get("extensions"), Some(r#"{"credProps":{"rk":true}}"#));
    }

    #[test]
    fn password_is_never_emitted() {
        let submission =
            AssertionSubmission::encode(&server_parameters(), &credential(), Some("alice"))
                .unwrap();

        assert_eq!(submission.get("pass"), None);
        assert_eq!(submission.get("password"), None);
    }

    #[test]
    fn username_only_when_supplied() {
        let submission =
            AssertionSubmission::encode(&server_parameters(), &credential(), None).unwrap();

        assert_eq!(submission.get("user"), None);
        assert_eq!(submission.fields().len(), 5);
    }

    #[test]
    fn unmapped_keys_fall_back_to_logical_names() {
        let submission =
            AssertionSubmission::encode(&Parameters::new(), &credential(), Some("alice")).unwrap();

        let names: Vec<String> = submission.into_iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            [
                "username",
                "credentialId",
                "clientDataJSON",
                "authenticatorData",
                "signature",
                "clientExtensionsJSON"
            ]
        );
    }

    #[test]
    fn form_body_is_urlencoded() {
        let submission =
            AssertionSubmission::encode(&Parameters::new(), &credential(), Some("a b@example.com"))
                .unwrap();

        let body = submission.to_form_body();
        assert!(body.starts_with("username=a+b%40example.com&credentialId=AQID&"));
        assert!(body.ends_with("clientExtensionsJSON=%7B%22credProps%22%3A%7B%22rk%22%3Atrue%7D%7D"));
    }
}
