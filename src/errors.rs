use std::fmt;

#[derive(Clone, Debug)]
pub enum AuthError {
    Config(String),
    Network(String),
    Timeout(String),
    Http { status: u16, message: String },
    Platform(String),
    Decoding(String),
    Parse(String),
    Serialization(String),
    SessionInvalid(String),
}

impl AuthError {
    /// True when an authorized call was rejected and the caller should treat
    /// the local session as gone.
    pub fn is_session_invalid(&self) -> bool {
        matches!(self, AuthError::SessionInvalid(_))
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Config(message) => write!(formatter, "Config error: {message}"),
            AuthError::Network(message) => write!(formatter, "Network error: {message}"),
            AuthError::Timeout(message) => write!(formatter, "Timeout: {message}"),
            AuthError::Http { status, message } => {
                write!(formatter, "Request failed ({status}): {message}")
            }
            AuthError::Platform(message) => write!(formatter, "Credential error: {message}"),
            AuthError::Decoding(message) => write!(formatter, "Decoding error: {message}"),
            AuthError::Parse(message) => write!(formatter, "Response error: {message}"),
            AuthError::Serialization(message) => {
                write!(formatter, "Request error: {message}")
            }
            AuthError::SessionInvalid(message) => {
                write!(formatter, "Session invalid: {message}")
            }
        }
    }
}

impl std::error::Error for AuthError {}
