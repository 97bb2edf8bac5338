//! Decoding of server-issued WebAuthn option documents.
//!
//! The server sends JSON whose binary fields (challenge, user id, credential
//! ids) are Base64URL text. These constructors unwrap the `publicKey`
//! envelope (documents may arrive wrapped or bare), decode the binary
//! fields, and normalize a missing `allowCredentials` list to empty before
//! anything reaches the platform credential provider.

use serde_json::{Value, json};

use super::types::{AllowCredential, CreationOptions, RequestOptions};
use crate::{encoding, errors::AuthError};

fn public_key(document: &Value) -> &Value {
    document.get("publicKey").unwrap_or(document)
}

impl CreationOptions {
    pub fn from_response(document: &Value) -> Result<Self, AuthError> {
        let options = public_key(document);

        let challenge = options["challenge"]
            .as_str()
            .ok_or_else(|| AuthError::Parse("Missing challenge".to_string()))?;
        let challenge = encoding::decode(challenge)?;

        let user_id = options["user"]["id"]
            .as_str()
            .ok_or_else(|| AuthError::Parse("Missing user id".to_string()))?;
        let user_id = encoding::decode(user_id)?;

        Ok(Self {
            public_key: options.clone(),
            challenge,
            user_id,
        })
    }
}

impl RequestOptions {
    pub fn from_response(document: &Value) -> Result<Self, AuthError> {
        let mut options = public_key(document).clone();

        let challenge = options["challenge"]
            .as_str()
            .ok_or_else(|| AuthError::Parse("Missing challenge".to_string()))?;
        let challenge = encoding::decode(challenge)?;

        if !options["allowCredentials"].is_array() {
            options["allowCredentials"] = json!([]);
        }

        let mut allow_credentials = Vec::new();
        if let Some(entries) = options["allowCredentials"].as_array() {
            for entry in entries {
                let id = entry["id"]
                    .as_str()
                    .ok_or_else(|| AuthError::Parse("Missing credential id".to_string()))?;

                allow_credentials.push(AllowCredential {
                    id: encoding::decode(id)?,
                    kind: entry["type"].as_str().unwrap_or("public-key").to_string(),
                    transports: entry["transports"]
                        .as_array()
                        .map(|transports| {
                            transports
                                .iter()
                                .filter_map(Value::as_str)
                                .map(str::to_string)
                                .collect()
                        })
                        .unwrap_or_default(),
                });
            }
        }

        Ok(Self {
            public_key: options,
            challenge,
            allow_credentials,
        })
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::{CreationOptions, RequestOptions};
    use crate::errors::AuthError;
    use serde_json::json;

    #[test]
    fn creation_options_decode_wrapped_document() {
        let document = json!({
            "publicKey": {
                "challenge": "AQIDBA",
                "user": { "id": "BQYH", "name": "alice", "displayName": "alice" },
                "rp": { "id": "localhost", "name": "doork" },
            }
        });

        let options = CreationOptions::from_response(&document).expect("should decode");
        assert_eq!(options.challenge, vec![1, 2, 3, 4]);
        assert_eq!(options.user_id, vec![5, 6, 7]);
        assert_eq!(options.public_key["rp"]["id"], "localhost");
    }

    #[test]
    fn creation_options_decode_bare_document() {
        let document = json!({
            "challenge": "AQIDBA",
            "user": { "id": "BQYH" },
        });

        let options = CreationOptions::from_response(&document).expect("should decode");
        assert_eq!(options.challenge, vec![1, 2, 3, 4]);
    }

    #[test]
    fn creation_options_require_challenge_and_user_id() {
        let err = CreationOptions::from_response(&json!({ "publicKey": { "user": { "id": "BQYH" } } }))
            .expect_err("should require challenge");
        assert!(matches!(err, AuthError::Parse(_)));

        let err = CreationOptions::from_response(&json!({ "publicKey": { "challenge": "AQIDBA" } }))
            .expect_err("should require user id");
        assert!(matches!(err, AuthError::Parse(_)));
    }

    #[test]
    fn creation_options_reject_malformed_challenge() {
        let document = json!({
            "publicKey": { "challenge": "!!!", "user": { "id": "BQYH" } }
        });

        let err = CreationOptions::from_response(&document).expect_err("should reject base64");
        assert!(matches!(err, AuthError::Decoding(_)));
    }

    #[test]
    fn request_options_default_missing_allow_credentials_to_empty() {
        let document = json!({ "publicKey": { "challenge": "AQIDBA" } });

        let options = RequestOptions::from_response(&document).expect("should decode");
        assert!(options.allow_credentials.is_empty());
        assert!(options.public_key["allowCredentials"].is_array());
        assert_eq!(
            options.public_key["allowCredentials"]
                .as_array()
                .expect("should be array")
                .len(),
            0
        );
    }

    #[test]
    fn request_options_decode_allow_credential_entries() {
        let document = json!({
            "publicKey": {
                "challenge": "AQIDBA",
                "allowCredentials": [
                    { "id": "BQYH", "type": "public-key", "transports": ["usb", "internal"] },
                    { "id": "AQID" },
                ],
            }
        });

        let options = RequestOptions::from_response(&document).expect("should decode");
        assert_eq!(options.allow_credentials.len(), 2);
        assert_eq!(options.allow_credentials[0].id, vec![5, 6, 7]);
        assert_eq!(options.allow_credentials[0].transports, vec!["usb", "internal"]);
        assert_eq!(options.allow_credentials[1].id, vec![1, 2, 3]);
        assert_eq!(options.allow_credentials[1].kind, "public-key");
    }

    #[test]
    fn request_options_reject_malformed_credential_id() {
        let document = json!({
            "publicKey": {
                "challenge": "AQIDBA",
                "allowCredentials": [{ "id": "***" }],
            }
        });

        let err = RequestOptions::from_response(&document).expect_err("should reject base64");
        assert!(matches!(err, AuthError::Decoding(_)));
    }
}
