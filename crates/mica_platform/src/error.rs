//! Platform error types

use thiserror::Error;

/// Platform-related errors
///
/// These never escape the `Compositor`/`SystemAppearance` contracts, which
/// report plain success or absence. Backends use them internally so that the
/// reason for a refusal can be logged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The native handle is not a kind this backend understands
    #[error("Unsupported window handle: {0}")]
    UnsupportedHandle(String),

    /// The requested material is not available on this OS build
    #[error("Material not supported: {0}")]
    UnsupportedMaterial(String),

    /// A required system entry point could not be found
    #[error("Platform API not available: {0}")]
    Unavailable(String),

    /// A native call returned a failure code
    #[error("Native call {call} failed: {message}")]
    NativeCall { call: &'static str, message: String },
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
