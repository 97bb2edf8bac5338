//! URL-safe Base64 conversion between binary buffers and wire text.
//!
//! The doork backend serializes every binary WebAuthn field (challenges,
//! user IDs, credential IDs, authenticator responses) as Base64URL without
//! padding. Encoding here must be the exact inverse of the server's so the
//! fields round-trip unmodified through the ceremony.

use base64::{
    Engine,
    engine::general_purpose::{STANDARD, URL_SAFE, URL_SAFE_NO_PAD},
};

use crate::errors::AuthError;

/// Encodes bytes as Base64URL without padding. The output never contains
/// `+`, `/`, or `=`.
pub fn encode(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decodes Base64URL text back into bytes. Padded and standard-alphabet
/// input is tolerated since some backends pad their output.
pub fn decode(text: &str) -> Result<Vec<u8>, AuthError> {
    URL_SAFE_NO_PAD
        .decode(text)
        .or_else(|_| URL_SAFE.decode(text))
        .or_else(|_| STANDARD.decode(text))
        .map_err(|e| AuthError::Decoding(format!("Invalid base64: {e}")))
}
