use std::path::PathBuf;

/// Failure to reach the page context or to get an answer out of it.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// The extraction capability could not be installed.
    #[error("failed to inject extraction capability: {0}")]
    Inject(String),

    /// The request could not be delivered or the context went away.
    #[error("messaging failed: {0}")]
    Message(String),

    /// The context received the request but nothing answered it.
    #[error("could not establish connection: receiving end does not exist")]
    NoResponse,

    /// The answer was not a valid extraction response.
    #[error("malformed extraction response: {0}")]
    Decode(String),
}

/// Failure while calling the recommendation backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("invalid backend endpoint {base}: {source}")]
    Endpoint {
        base: String,
        source: url::ParseError,
    },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },
}

/// Failure while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid URL {value:?} for {field}: {source}")]
    Url {
        field: &'static str,
        value: String,
        source: url::ParseError,
    },
}
