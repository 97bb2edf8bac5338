//! Client for the authenticated user's profile: fetch, and the two-step
//! add/verify flows for email and phone. Each verification pair is
//! independent; the caller re-supplies the same address on both calls.
//! No retries or client-side rate limiting; every failure is terminal for
//! that user action.

use serde::Serialize;

use super::types::{
    EmailCodeRequest, PhoneCodeRequest, UserProfile, VerifyEmailRequest, VerifyPhoneRequest,
};
use crate::{
    api::{ApiRequest, Transport, build_url},
    config::AuthConfig,
    errors::AuthError,
};

pub struct ProfileClient<T> {
    config: AuthConfig,
    transport: T,
}

impl<T: Transport> ProfileClient<T> {
    pub fn new(config: AuthConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Fetches the authenticated user's profile.
    ///
    /// A 401/403 maps to [`AuthError::SessionInvalid`]: callers should treat
    /// it as session invalidation and clear the stored token. The client
    /// itself never touches the token store.
    pub async fn fetch_profile(&self, token: &str) -> Result<UserProfile, AuthError> {
        let response = self
            .transport
            .send(ApiRequest::get(build_url(&self.config.api_base_url, "/user")).bearer(token))
            .await?;

        if response.status == 401 || response.status == 403 {
            return Err(AuthError::SessionInvalid(
                "Failed to fetch user data".to_string(),
            ));
        }
        if !response.ok() {
            return Err(AuthError::Http {
                status: response.status,
                message: "Failed to fetch user data".to_string(),
            });
        }

        response.json()
    }

    /// Asks the server to send a verification code to `email`.
    pub async fn request_email_code(&self, token: &str, email: &str) -> Result<(), AuthError> {
        self.post_authorized(
            "/user/email",
            token,
            &EmailCodeRequest { email },
            "Failed to send verification email",
        )
        .await
    }

    /// Submits the code received by email. On success the caller should
    /// refetch the profile.
    pub async fn verify_email_code(
        &self,
        token: &str,
        email: &str,
        code: &str,
    ) -> Result<(), AuthError> {
        self.post_authorized(
            "/user/email/verify",
            token,
            &VerifyEmailRequest { email, code },
            "Failed to verify code",
        )
        .await
    }

    /// Asks the server to send a verification code to `phone_number`.
    pub async fn request_phone_code(
        &self,
        token: &str,
        phone_number: &str,
    ) -> Result<(), AuthError> {
        self.post_authorized(
            "/user/phone",
            token,
            &PhoneCodeRequest { phone_number },
            "Failed to send verification code",
        )
        .await
    }

    /// Submits the code received by SMS. On success the caller should
    /// refetch the profile.
    pub async fn verify_phone_code(
        &self,
        token: &str,
        phone_number: &str,
        code: &str,
    ) -> Result<(), AuthError> {
        self.post_authorized(
            "/user/phone/verify",
            token,
            &VerifyPhoneRequest { phone_number, code },
            "Failed to verify code",
        )
        .await
    }

    async fn post_authorized<B: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &B,
        failure: &str,
    ) -> Result<(), AuthError> {
        let response = self
            .transport
            .send(
                ApiRequest::post(build_url(&self.config.api_base_url, path))
                    .bearer(token)
                    .include_credentials()
                    .json(body)?,
            )
            .await?;

        if !response.ok() {
            return Err(AuthError::Http {
                status: response.status,
                message: failure.to_string(),
            });
        }

        Ok(())
    }
}
