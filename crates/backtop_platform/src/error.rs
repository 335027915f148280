//! Platform error types

use backtop_core::{FrameId, ListenerId, TimerId};
use thiserror::Error;

/// Host-surface errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlatformError {
    /// Viewport dimensions must be finite and non-negative
    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },

    /// Scroll offsets must be finite
    #[error("invalid scroll offset: {0}")]
    InvalidScrollOffset(f32),

    /// A listener handle that is not (or no longer) registered
    #[error("unknown listener: {0:?}")]
    UnknownListener(ListenerId),

    #[error("unknown frame request: {0:?}")]
    UnknownFrame(FrameId),

    #[error("unknown timer: {0:?}")]
    UnknownTimer(TimerId),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
