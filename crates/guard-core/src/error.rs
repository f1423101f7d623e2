//! Error types for guard-core.

use thiserror::Error;

/// Enforcement errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Market-style orders execute immediately by construction, so no
    /// bitmask can make them post-only. Rejected before anything is sent.
    #[error("order type {0:?} is market-style and can never be post-only")]
    MarketStyleOrder(String),
}

/// Result type alias for enforcement operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;
