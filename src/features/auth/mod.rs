//! Passkey ceremony client: server option decoding, platform credential
//! access, and the register/authenticate orchestration.

pub mod client;
pub mod options;
pub mod types;
pub mod webauthn;

pub use client::{AuthClient, SESSION_ID_HEADER};
pub use webauthn::Authenticator;
#[cfg(target_arch = "wasm32")]
pub use webauthn::BrowserAuthenticator;
