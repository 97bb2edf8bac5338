//! Ceremony client for passkey registration and authentication.
//!
//! Both ceremonies follow the same sequence against the relying-party API:
//! start the ceremony, decode the server's challenge material, invoke the
//! platform credential provider, encode the credential, finish the ceremony.
//! The opaque `Session-Id` header issued on start is echoed verbatim on
//! finish so the server can correlate the attempt. Errors never escape as
//! panics; every failure resolves to an [`AuthError`].

use serde_json::json;

use super::{
    types::{
        AuthenticationSubmission, CreationOptions, RegistrationSubmission, RequestOptions,
        TokenResponse,
    },
    webauthn::Authenticator,
};
use crate::{
    api::{ApiRequest, Transport, build_url},
    config::AuthConfig,
    errors::AuthError,
    session::{SessionStore, TokenStorage},
};

/// Header carrying the opaque per-attempt ceremony correlator.
pub const SESSION_ID_HEADER: &str = "Session-Id";

/// Orchestrates WebAuthn ceremonies against a relying-party API and the
/// platform credential provider, persisting the bearer token on success.
pub struct AuthClient<T, A, S> {
    config: AuthConfig,
    transport: T,
    authenticator: A,
    session: SessionStore<S>,
}

impl<T: Transport, A: Authenticator, S: TokenStorage> AuthClient<T, A, S> {
    pub fn new(config: AuthConfig, transport: T, authenticator: A, storage: S) -> Self {
        let session = SessionStore::with_key(storage, config.storage_key.clone());
        Self {
            config,
            transport,
            authenticator,
            session,
        }
    }

    /// The token store backing this client, shared with the consuming view.
    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    /// Registers a new passkey for `username`.
    ///
    /// Registration issues no token in this flow; the user signs in
    /// afterwards with the credential just created.
    pub async fn register(&self, username: &str) -> Result<String, AuthError> {
        let start = self
            .transport
            .send(
                ApiRequest::post(build_url(&self.config.api_base_url, "/register"))
                    .json(&json!({ "username": username }))?,
            )
            .await?;
        if !start.ok() {
            return Err(AuthError::Http {
                status: start.status,
                message: "Failed to start registration".to_string(),
            });
        }

        let session_id = start.header(SESSION_ID_HEADER).unwrap_or_default().to_string();
        let options = CreationOptions::from_response(&start.json()?)?;

        let credential = self.authenticator.create(&options).await?;
        let submission = RegistrationSubmission::from_credential(&credential);

        let finish = self
            .transport
            .send(
                ApiRequest::post(build_url(&self.config.api_base_url, "/register/finish"))
                    .header(SESSION_ID_HEADER, &session_id)
                    .json(&submission)?,
            )
            .await?;
        if !finish.ok() {
            return Err(AuthError::Http {
                status: finish.status,
                message: "Failed to complete registration".to_string(),
            });
        }

        Ok("Registration successful".to_string())
    }

    /// Signs in with an existing passkey and persists the issued token.
    pub async fn authenticate(&self) -> Result<String, AuthError> {
        let start = self
            .transport
            .send(ApiRequest::post(build_url(
                &self.config.api_base_url,
                "/authenticate",
            )))
            .await?;
        if !start.ok() {
            return Err(AuthError::Http {
                status: start.status,
                message: "Failed to start authentication".to_string(),
            });
        }

        let session_id = start.header(SESSION_ID_HEADER).unwrap_or_default().to_string();
        let options = RequestOptions::from_response(&start.json()?)?;

        let credential = self.authenticator.get(&options).await?;
        let submission = AuthenticationSubmission::from_credential(&credential);

        let finish = self
            .transport
            .send(
                ApiRequest::post(build_url(&self.config.api_base_url, "/authenticate/finish"))
                    .header(SESSION_ID_HEADER, &session_id)
                    .include_credentials()
                    .json(&submission)?,
            )
            .await?;
        if !finish.ok() {
            return Err(AuthError::Http {
                status: finish.status,
                message: "Failed to finish authentication".to_string(),
            });
        }

        let token: TokenResponse = finish.json()?;
        self.session.set(&token.access_token);

        Ok("Authentication successful".to_string())
    }

    /// Discards the stored token. Purely local; the server session, if any,
    /// expires on its own.
    pub fn sign_out(&self) {
        self.session.clear();
    }
}
