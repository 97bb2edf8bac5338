//! Types for profile API requests and responses.

use serde::{Deserialize, Serialize};

/// The authenticated user's profile record.
#[derive(Clone, Debug, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EmailCodeRequest<'a> {
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
pub struct VerifyEmailRequest<'a> {
    pub email: &'a str,
    pub code: &'a str,
}

#[derive(Debug, Serialize)]
pub struct PhoneCodeRequest<'a> {
    pub phone_number: &'a str,
}

#[derive(Debug, Serialize)]
pub struct VerifyPhoneRequest<'a> {
    pub phone_number: &'a str,
    pub code: &'a str,
}
