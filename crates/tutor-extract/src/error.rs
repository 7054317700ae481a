#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("document parsing timed out after {0} seconds")]
    Timeout(u64),

    #[error("document is encrypted or password-protected")]
    Encrypted,

    #[error("document could not be read: {0}")]
    Unreadable(String),

    #[error("no extractable text on any page")]
    NoText,
}
