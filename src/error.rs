/// Custom error type for gh-status-embed operations
#[derive(Debug, thiserror::Error)]
pub enum EmbedError {
    #[error(
        "missing non-null value for argument `{0}`\n\n\
         Hint: incorrect context paths like `github.non_existent` return `null` silently."
    )]
    MissingArgument(String),

    #[error("invalid value for `{field}`: {value}")]
    InvalidArgument { field: String, value: String },

    #[error("Webhook request failed: {0}")]
    Delivery(#[from] reqwest::Error),

    #[error("Failed to deliver webhook: {status} {reason}")]
    Rejected { status: u16, reason: String },
}

/// Helper type for Results that use EmbedError
pub type Result<T> = std::result::Result<T, EmbedError>;
