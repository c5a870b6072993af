#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Credential is empty")]
    EmptyCredential,

    #[error("Credential is {len} bytes, longer than the {max} byte limit")]
    CredentialTooLong { len: usize, max: usize },

    #[error("Credential is not valid UTF-8")]
    InvalidEncoding,

    #[error("HTTP request to {url} failed: {source}")]
    HttpRequest {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Lookup failed after {attempts} attempts for prefix {prefix}")]
    MaxRetriesExceeded {
        prefix: String,
        attempts: u32,
        #[source]
        source: Box<Error>,
    },

    #[error("Malformed range response for prefix {prefix}: {reason}")]
    MalformedResponse { prefix: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("HTTP environment is not initialized. Call environment::init first.")]
    NotInitialized,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Whether the error came from validating the caller's input, before any
    /// network activity.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::EmptyCredential | Error::CredentialTooLong { .. } | Error::InvalidEncoding
        )
    }
}
