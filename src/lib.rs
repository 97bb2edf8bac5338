//! Client for the doork passkey (WebAuthn) authentication API.
//!
//! This crate is the logic layer behind a passkey sign-in/sign-up UI: it
//! orchestrates the two WebAuthn ceremonies against a relying-party server,
//! converts between the server's Base64URL wire fields and the platform's
//! binary credential types, persists the resulting bearer token, and exposes
//! the profile add/verify flows. It performs no cryptographic verification
//! and never inspects the material it transports; the server and the
//! platform credential provider own those concerns.
//!
//! ### Flow Overview
//! 1. A view calls [`AuthClient::register`] or [`AuthClient::authenticate`].
//! 2. The client POSTs the ceremony start endpoint, captures the opaque
//!    `Session-Id` header, and decodes the challenge material.
//! 3. The [`Authenticator`] capability drives the browser's passkey dialog.
//! 4. The credential is re-encoded and POSTed to the finish endpoint with
//!    the `Session-Id` echoed; a successful sign-in stores the
//!    `access_token` in the [`SessionStore`].
//!
//! Browser globals (network, `localStorage`, `navigator.credentials`) are
//! injected capabilities, so every flow can be driven by fakes in tests. On
//! wasm targets the provided implementations are [`GlooTransport`],
//! [`BrowserStorage`], and [`BrowserAuthenticator`].
//!
//! All operations return `Result<_, AuthError>`; mapping results to
//! user-visible notifications is the consuming view's job.

pub mod api;
pub mod config;
pub mod encoding;
pub mod errors;
pub mod features;
pub mod session;

pub use api::{ApiRequest, ApiResponse, Method, Transport};
#[cfg(target_arch = "wasm32")]
pub use api::GlooTransport;
pub use config::{AuthConfig, DEFAULT_STORAGE_KEY};
pub use errors::AuthError;
pub use features::auth::{AuthClient, Authenticator, SESSION_ID_HEADER};
#[cfg(target_arch = "wasm32")]
pub use features::auth::BrowserAuthenticator;
pub use features::profile::{ProfileClient, UserProfile};
#[cfg(target_arch = "wasm32")]
pub use session::BrowserStorage;
pub use session::{MemoryStorage, SessionStore, TokenStorage};
