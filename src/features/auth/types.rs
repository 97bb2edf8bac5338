//! Types for the WebAuthn ceremony client: decoded server options, platform
//! credential outputs, and the JSON submissions posted back to the server.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::encoding;

/// Server-issued credential creation options with binary fields decoded.
/// `public_key` keeps the original document so non-binary fields pass
/// through to the platform untouched.
#[derive(Clone, Debug)]
pub struct CreationOptions {
    pub public_key: Value,
    pub challenge: Vec<u8>,
    pub user_id: Vec<u8>,
}

/// Server-issued credential request options with binary fields decoded.
#[derive(Clone, Debug)]
pub struct RequestOptions {
    pub public_key: Value,
    pub challenge: Vec<u8>,
    pub allow_credentials: Vec<AllowCredential>,
}

/// One entry of the server's `allowCredentials` list with its id decoded.
#[derive(Clone, Debug)]
pub struct AllowCredential {
    pub id: Vec<u8>,
    pub kind: String,
    pub transports: Vec<String>,
}

/// Attestation produced by the platform during registration.
#[derive(Clone, Debug)]
pub struct CreatedCredential {
    pub id: String,
    pub kind: String,
    pub raw_id: Vec<u8>,
    pub client_data_json: Vec<u8>,
    pub attestation_object: Vec<u8>,
}

/// Assertion produced by the platform during authentication.
#[derive(Clone, Debug)]
pub struct AssertedCredential {
    pub id: String,
    pub kind: String,
    pub raw_id: Vec<u8>,
    pub client_data_json: Vec<u8>,
    pub authenticator_data: Vec<u8>,
    pub signature: Vec<u8>,
    pub user_handle: Option<Vec<u8>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationSubmission {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub raw_id: String,
    pub response: AttestationPayload,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttestationPayload {
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: String,
    pub attestation_object: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationSubmission {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub raw_id: String,
    pub response: AssertionPayload,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssertionPayload {
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: String,
    pub authenticator_data: String,
    pub signature: String,
    pub user_handle: Option<String>,
}

impl RegistrationSubmission {
    pub fn from_credential(credential: &CreatedCredential) -> Self {
        Self {
            id: credential.id.clone(),
            kind: credential.kind.clone(),
            raw_id: encoding::encode(&credential.raw_id),
            response: AttestationPayload {
                client_data_json: encoding::encode(&credential.client_data_json),
                attestation_object: encoding::encode(&credential.attestation_object),
            },
        }
    }
}

impl AuthenticationSubmission {
    pub fn from_credential(credential: &AssertedCredential) -> Self {
        // userHandle is null unless the platform returned a non-empty value.
        let user_handle = credential
            .user_handle
            .as_deref()
            .filter(|handle| !handle.is_empty())
            .map(encoding::encode);

        Self {
            id: credential.id.clone(),
            kind: credential.kind.clone(),
            raw_id: encoding::encode(&credential.raw_id),
            response: AssertionPayload {
                client_data_json: encoding::encode(&credential.client_data_json),
                authenticator_data: encoding::encode(&credential.authenticator_data),
                signature: encoding::encode(&credential.signature),
                user_handle,
            },
        }
    }
}

/// Body of a successful `/authenticate/finish` response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::{
        AssertedCredential, AuthenticationSubmission, CreatedCredential, RegistrationSubmission,
    };

    fn created_credential() -> CreatedCredential {
        CreatedCredential {
            id: "AQID".to_string(),
            kind: "public-key".to_string(),
            raw_id: vec![1, 2, 3],
            client_data_json: b"{\"type\":\"webauthn.create\"}".to_vec(),
            attestation_object: vec![0xa0],
        }
    }

    fn asserted_credential() -> AssertedCredential {
        AssertedCredential {
            id: "AQID".to_string(),
            kind: "public-key".to_string(),
            raw_id: vec![1, 2, 3],
            client_data_json: b"{\"type\":\"webauthn.get\"}".to_vec(),
            authenticator_data: vec![4, 5, 6],
            signature: vec![7, 8, 9],
            user_handle: None,
        }
    }

    #[test]
    fn registration_submission_uses_wire_field_names() {
        let submission = RegistrationSubmission::from_credential(&created_credential());
        let json = serde_json::to_value(&submission).expect("should serialize");

        assert_eq!(json["id"], "AQID");
        assert_eq!(json["type"], "public-key");
        assert_eq!(json["rawId"], "AQID");
        assert!(json["response"]["clientDataJSON"].is_string());
        assert!(json["response"]["attestationObject"].is_string());
    }

    #[test]
    fn assertion_submission_serializes_missing_user_handle_as_null() {
        let submission = AuthenticationSubmission::from_credential(&asserted_credential());
        let json = serde_json::to_value(&submission).expect("should serialize");

        assert_eq!(json["rawId"], "AQID");
        assert!(json["response"]["authenticatorData"].is_string());
        assert!(json["response"]["signature"].is_string());
        assert!(json["response"]["userHandle"].is_null());
    }

    #[test]
    fn assertion_submission_drops_empty_user_handle() {
        let mut credential = asserted_credential();
        credential.user_handle = Some(Vec::new());

        let submission = AuthenticationSubmission::from_credential(&credential);
        let json = serde_json::to_value(&submission).expect("should serialize");
        assert!(json["response"]["userHandle"].is_null());

        credential.user_handle = Some(vec![9, 9]);
        let submission = AuthenticationSubmission::from_credential(&credential);
        let json = serde_json::to_value(&submission).expect("should serialize");
        assert_eq!(json["response"]["userHandle"], "CQk");
    }
}
