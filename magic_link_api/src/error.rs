use std::fmt;

use reqwest::StatusCode;

pub type Result<T> = std::result::Result<T, MagicLinkError>;

/// Failures surfaced by the token exchange. Nothing here is retried.
#[derive(Debug)]
pub enum MagicLinkError {
    /// The request never produced a response (dns, connect, tls, body read).
    Network(String),
    /// The session was refused: either the server answered with a non-success status (e.g.
    /// an expired session) or the credential could not even be put in a header.
    Auth {
        status: Option<StatusCode>,
        body: String,
    },
    /// The response body was not a valid login token document.
    Parse(String),
}

impl MagicLinkError {
    pub fn auth(status: StatusCode, body: String) -> Self {
        Self::Auth {
            status: Some(status),
            body,
        }
    }
}

impl fmt::Display for MagicLinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(message) => write!(f, "network error: {message}"),
            Self::Auth {
                status: Some(status),
                body,
            } => write!(f, "login token request rejected with {status}: {body}"),
            Self::Auth { status: None, body } => {
                write!(f, "unusable session api token: {body}")
            }
            Self::Parse(message) => write!(f, "malformed login token response: {message}"),
        }
    }
}

impl std::error::Error for MagicLinkError {}

macro_rules! impl_error_from {
    ($error_type:ty, $variant:ident) => {
        impl From<$error_type> for MagicLinkError {
            fn from(value: $error_type) -> Self {
                Self::$variant(value.to_string())
            }
        }
    };
}

impl_error_from!(serde_json::Error, Parse);

impl From<reqwest::header::InvalidHeaderValue> for MagicLinkError {
    fn from(value: reqwest::header::InvalidHeaderValue) -> Self {
        Self::Auth {
            status: None,
            body: value.to_string(),
        }
    }
}

impl From<reqwest::Error> for MagicLinkError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Self::Parse(value.to_string())
        } else {
            Self::Network(value.to_string())
        }
    }
}
