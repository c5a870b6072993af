#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Check(#[from] breach_check::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode result: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No passwords given. Pass them as arguments or use --stdin.")]
    NoInput,

    #[error("Cannot combine password arguments with --stdin")]
    InvalidArgs,

    #[error("{rejected} of {total} passwords rejected")]
    Rejected { rejected: usize, total: usize },
}
