use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum SettingsError {
    #[error(
        "failed to parse settings from {}: {}",
        .path.as_deref().unwrap_or("reader"),
        .cause
    )]
    FileParse {
        path: Option<String>,
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("missing settings value `{0}`")]
    MissingValue(String),

    #[error("invalid settings value for `{key}`: {cause}")]
    InvalidValue {
        key: String,
        #[source]
        cause: url::ParseError,
    },

    #[error("failed to build http client: {0}")]
    Http(#[from] reqwest::Error),
}
