//! Upstream lookup error types.

use thiserror::Error;

/// Failures reported by the transport adapters.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum LookupError {
    #[error("network error: {message}")]
    Network { message: String },

    #[error("upstream returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("rate limited upstream, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("failed to decode response: {message}")]
    Decode { message: String },

    #[error("unexpected lookup error: {message}")]
    Unexpected { message: String },
}

impl LookupError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates status error.
    #[must_use]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::RateLimited { .. })
    }

    /// Returns whether the upstream answered but the item does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}
