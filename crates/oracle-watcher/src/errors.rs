/// Malformed input while building a log filter request.
///
/// These abort construction of the request; nothing is ever sent with a
/// partially encoded filter.
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("invalid address {input:?}: {reason}")]
    InvalidAddress { input: String, reason: String },
    #[error("topic width must be between 1 and 32 bytes, got {0}")]
    InvalidTopicWidth(usize),
    #[error("failed to serialize filter query")]
    Serialization(#[from] serde_json::Error),
}
