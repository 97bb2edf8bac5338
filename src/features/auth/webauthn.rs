//! Platform credential provider access.
//!
//! [`Authenticator`] is the capability the ceremony client depends on; the
//! browser implementation drives `navigator.credentials` via `web_sys`,
//! converting between decoded option structures and the browser's
//! binary-oriented WebAuthn types:
//!
//! 1. **Preparation**: builds a `publicKey` JS object from the server's
//!    document, substituting decoded binary buffers (`Uint8Array`) for the
//!    Base64URL text fields.
//! 2. **Interaction**: calls `navigator.credentials.create` (registration)
//!    or `.get` (authentication), triggering the browser's passkey dialog.
//! 3. **Finalization**: captures the binary authenticator response so the
//!    ceremony client can encode it for transport.

use super::types::{AssertedCredential, CreatedCredential, CreationOptions, RequestOptions};
use crate::errors::AuthError;

/// Capability to create and assert platform credentials. Implementations
/// must not reinterpret or validate the binary material they hand back.
#[allow(async_fn_in_trait)]
pub trait Authenticator {
    async fn create(&self, options: &CreationOptions) -> Result<CreatedCredential, AuthError>;
    async fn get(&self, options: &RequestOptions) -> Result<AssertedCredential, AuthError>;
}

impl<A: Authenticator + ?Sized> Authenticator for &A {
    async fn create(&self, options: &CreationOptions) -> Result<CreatedCredential, AuthError> {
        (**self).create(options).await
    }

    async fn get(&self, options: &RequestOptions) -> Result<AssertedCredential, AuthError> {
        (**self).get(options).await
    }
}

/// `navigator.credentials`-backed authenticator.
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserAuthenticator;

#[cfg(target_arch = "wasm32")]
mod browser {
    use js_sys::{Array, Object, Reflect, Uint8Array};
    use serde::Serialize;
    use serde_json::Value;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        AuthenticatorAssertionResponse, AuthenticatorAttestationResponse,
        CredentialCreationOptions, CredentialRequestOptions, CredentialsContainer,
        PublicKeyCredential,
    };

    use super::{
        AssertedCredential, AuthError, Authenticator, BrowserAuthenticator, CreatedCredential,
        CreationOptions, RequestOptions,
    };

    impl Authenticator for BrowserAuthenticator {
        async fn create(
            &self,
            options: &CreationOptions,
        ) -> Result<CreatedCredential, AuthError> {
            let credentials = credentials_container()?;

            let js_options = Object::new();
            set_buffer(&js_options, "challenge", &options.challenge)?;

            // user
            let user = &options.public_key["user"];
            let js_user = Object::new();
            if let Some(name) = user["name"].as_str() {
                Reflect::set(&js_user, &"name".into(), &name.into()).ok();
            }
            if let Some(display_name) = user["displayName"].as_str() {
                Reflect::set(&js_user, &"displayName".into(), &display_name.into()).ok();
            }
            Reflect::set(&js_user, &"id".into(), &Uint8Array::from(&options.user_id[..])).ok();
            Reflect::set(&js_options, &"user".into(), &js_user).ok();

            // rp
            if let Some(rp) = options.public_key.get("rp") {
                let js_rp = Object::new();
                if let Some(name) = rp["name"].as_str() {
                    Reflect::set(&js_rp, &"name".into(), &name.into()).ok();
                }
                if let Some(id) = rp["id"].as_str() {
                    Reflect::set(&js_rp, &"id".into(), &id.into()).ok();
                }
                Reflect::set(&js_options, &"rp".into(), &js_rp).ok();
            }

            // pubKeyCredParams
            if let Some(params) = options.public_key["pubKeyCredParams"].as_array() {
                let js_params = Array::new();
                for param in params {
                    let js_param = Object::new();
                    if let Some(alg) = param["alg"].as_i64() {
                        Reflect::set(&js_param, &"alg".into(), &(alg as f64).into()).ok();
                    }
                    if let Some(kind) = param["type"].as_str() {
                        Reflect::set(&js_param, &"type".into(), &kind.into()).ok();
                    }
                    js_params.push(&js_param);
                }
                Reflect::set(&js_options, &"pubKeyCredParams".into(), &js_params).ok();
            }

            copy_number(&js_options, &options.public_key, "timeout");
            copy_string(&js_options, &options.public_key, "attestation");

            // authenticatorSelection
            if let Some(selection) = options.public_key.get("authenticatorSelection") {
                let js_selection = Object::new();
                copy_string(&js_selection, selection, "authenticatorAttachment");
                copy_string(&js_selection, selection, "residentKey");
                copy_string(&js_selection, selection, "userVerification");
                if let Some(required) = selection["requireResidentKey"].as_bool() {
                    Reflect::set(&js_selection, &"requireResidentKey".into(), &required.into())
                        .ok();
                }
                Reflect::set(&js_options, &"authenticatorSelection".into(), &js_selection).ok();
            }

            // excludeCredentials
            if let Some(excludes) = options.public_key["excludeCredentials"].as_array() {
                let js_excludes = Array::new();
                for entry in excludes {
                    let js_entry = Object::new();
                    copy_string(&js_entry, entry, "type");
                    if let Some(id) = entry["id"].as_str() {
                        let id = crate::encoding::decode(id)?;
                        Reflect::set(&js_entry, &"id".into(), &Uint8Array::from(&id[..])).ok();
                    }
                    copy_transports(&js_entry, entry);
                    js_excludes.push(&js_entry);
                }
                Reflect::set(&js_options, &"excludeCredentials".into(), &js_excludes).ok();
            }

            // extensions
            if let Some(extensions) = options.public_key.get("extensions") {
                let serializer = serde_wasm_bindgen::Serializer::json_compatible();
                if let Ok(js_extensions) = extensions.serialize(&serializer) {
                    Reflect::set(&js_options, &"extensions".into(), &js_extensions).ok();
                }
            }

            let create_options = Object::new();
            Reflect::set(&create_options, &"publicKey".into(), &js_options)
                .map_err(|_| AuthError::Platform("Failed to set publicKey".to_string()))?;
            let create_options = create_options.unchecked_into::<CredentialCreationOptions>();

            let promise = credentials
                .create_with_options(&create_options)
                .map_err(|e| AuthError::Platform(format!("WebAuthn create failed: {e:?}")))?;

            let result = JsFuture::from(promise).await.map_err(|e| {
                let message = format!("{e:?}");
                if message.contains("InvalidStateError") {
                    AuthError::Platform("This passkey is already registered.".to_string())
                } else if message.contains("NotAllowedError") {
                    AuthError::Platform("Operation timed out or was cancelled.".to_string())
                } else {
                    AuthError::Platform("Failed to create credentials".to_string())
                }
            })?;

            let credential = result
                .dyn_into::<PublicKeyCredential>()
                .map_err(|_| AuthError::Platform("Failed to create credentials".to_string()))?;

            let response = credential
                .response()
                .dyn_into::<AuthenticatorAttestationResponse>()
                .map_err(|_| AuthError::Platform("Invalid response type".to_string()))?;

            Ok(CreatedCredential {
                id: credential.id(),
                kind: credential.type_(),
                raw_id: buffer_to_vec(credential.raw_id()),
                client_data_json: buffer_to_vec(response.client_data_json()),
                attestation_object: buffer_to_vec(response.attestation_object()),
            })
        }

        async fn get(&self, options: &RequestOptions) -> Result<AssertedCredential, AuthError> {
            let credentials = credentials_container()?;

            let js_options = Object::new();
            set_buffer(&js_options, "challenge", &options.challenge)?;
            copy_number(&js_options, &options.public_key, "timeout");
            copy_string(&js_options, &options.public_key, "rpId");
            copy_string(&js_options, &options.public_key, "userVerification");

            // allowCredentials, already decoded; an empty list is set
            // explicitly so the platform never sees an absent field.
            let js_allow = Array::new();
            for entry in &options.allow_credentials {
                let js_entry = Object::new();
                Reflect::set(&js_entry, &"type".into(), &entry.kind.as_str().into()).ok();
                Reflect::set(&js_entry, &"id".into(), &Uint8Array::from(&entry.id[..])).ok();
                if !entry.transports.is_empty() {
                    let js_transports = Array::new();
                    for transport in &entry.transports {
                        js_transports.push(&transport.as_str().into());
                    }
                    Reflect::set(&js_entry, &"transports".into(), &js_transports).ok();
                }
                js_allow.push(&js_entry);
            }
            Reflect::set(&js_options, &"allowCredentials".into(), &js_allow).ok();

            let get_options = Object::new();
            Reflect::set(&get_options, &"publicKey".into(), &js_options)
                .map_err(|_| AuthError::Platform("Failed to set publicKey".to_string()))?;
            let get_options = get_options.unchecked_into::<CredentialRequestOptions>();

            let promise = credentials
                .get_with_options(&get_options)
                .map_err(|e| AuthError::Platform(format!("WebAuthn get failed: {e:?}")))?;

            let result = JsFuture::from(promise).await.map_err(|e| {
                let message = format!("{e:?}");
                if message.contains("NotAllowedError") {
                    AuthError::Platform("Operation timed out or was cancelled.".to_string())
                } else {
                    AuthError::Platform("Failed to get credentials".to_string())
                }
            })?;

            let credential = result
                .dyn_into::<PublicKeyCredential>()
                .map_err(|_| AuthError::Platform("Failed to get credentials".to_string()))?;

            let response = credential
                .response()
                .dyn_into::<AuthenticatorAssertionResponse>()
                .map_err(|_| AuthError::Platform("Invalid response type".to_string()))?;

            Ok(AssertedCredential {
                id: credential.id(),
                kind: credential.type_(),
                raw_id: buffer_to_vec(credential.raw_id()),
                client_data_json: buffer_to_vec(response.client_data_json()),
                authenticator_data: buffer_to_vec(response.authenticator_data()),
                signature: buffer_to_vec(response.signature()),
                user_handle: response.user_handle().map(buffer_to_vec),
            })
        }
    }

    fn credentials_container() -> Result<CredentialsContainer, AuthError> {
        let window = web_sys::window()
            .ok_or_else(|| AuthError::Platform("Window not found".to_string()))?;
        Ok(window.navigator().credentials())
    }

    fn set_buffer(target: &Object, key: &str, bytes: &[u8]) -> Result<(), AuthError> {
        Reflect::set(target, &JsValue::from_str(key), &Uint8Array::from(bytes))
            .map_err(|_| AuthError::Platform(format!("Failed to set {key}")))
    }

    fn copy_string(target: &Object, source: &Value, key: &str) {
        if let Some(value) = source[key].as_str() {
            Reflect::set(target, &JsValue::from_str(key), &value.into()).ok();
        }
    }

    fn copy_number(target: &Object, source: &Value, key: &str) {
        if let Some(value) = source[key].as_u64() {
            Reflect::set(target, &JsValue::from_str(key), &(value as f64).into()).ok();
        }
    }

    fn copy_transports(target: &Object, source: &Value) {
        if let Some(transports) = source["transports"].as_array() {
            let js_transports = Array::new();
            for transport in transports {
                if let Some(value) = transport.as_str() {
                    js_transports.push(&value.into());
                }
            }
            Reflect::set(target, &"transports".into(), &js_transports).ok();
        }
    }

    fn buffer_to_vec(buffer: js_sys::ArrayBuffer) -> Vec<u8> {
        Uint8Array::new(&buffer).to_vec()
    }
}
