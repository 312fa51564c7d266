//! Error types for the donhang-core library.

use thiserror::Error;

/// Main error type for the donhang library.
///
/// Extraction itself never fails: every field degrades to "no match" and the
/// pipeline always returns a complete record. The only guarded fault is an
/// oversized input, rejected before any pattern runs.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Input exceeds the configured length cap.
    #[error("input too long: {len} characters (cap is {max})")]
    InputTooLong { len: usize, max: usize },
}

/// Errors related to configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the config file.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for the donhang library.
pub type Result<T> = std::result::Result<T, ExtractError>;
