//! Profile client for the authenticated user.

pub mod client;
pub mod types;

pub use client::ProfileClient;
pub use types::UserProfile;
