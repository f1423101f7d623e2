//! Error types for socket input dispatch.

use guard_core::CoreError;
use thiserror::Error;

/// Errors surfaced by the input dispatcher.
///
/// Dispatch itself only fails on enforcement rejection; everything else
/// is the transport refusing to take the envelope.
#[derive(Debug, Error)]
pub enum WsInputError {
    /// Enforcement rejected the input before dispatch.
    #[error("rejected before dispatch: {0}")]
    Rejected(#[from] CoreError),

    /// Outbound channel closed (socket disconnected or shutting down).
    #[error("outbound channel closed")]
    ChannelClosed,

    /// Send primitive refused the message.
    #[error("send failed: {0}")]
    SendFailed(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for input dispatch.
pub type WsInputResult<T> = std::result::Result<T, WsInputError>;
