use reqwest::header::InvalidHeaderValue;
use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("identity provider rejected the credentials (status {status}): {message}")]
    Auth { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("management api responded with status {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("unexpected response shape: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    #[error("failed to build request url from `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("value can not be used as a header: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),
}

impl Error {
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Auth { status, .. } | Error::Remote { status, .. } => Some(*status),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
