use thiserror::Error;

use crate::shared::codec::{CodecId, MediaType};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncoderStreamError {
    /// The container format declares no default video codec.
    #[error("output format has no default video codec")]
    NoVideoSupport,
    #[error("no encoder available for codec {codec}")]
    EncoderNotFound { codec: CodecId },
    #[error("encoder for {codec} produces {media_type:?}, not video")]
    WrongMediaType { codec: CodecId, media_type: MediaType },
    #[error("failed to open {codec} encoder: {reason}")]
    CodecOpenFailed { codec: CodecId, reason: String },
    #[error("invalid encoder configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to allocate output stream: {0}")]
    StreamAllocationFailed(String),
    #[error("output container has been closed")]
    ContainerClosed,
}
