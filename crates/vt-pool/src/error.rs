//! Error types for pool operations

/// Errors from pool operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no API keys configured")]
    Empty,

    #[error("all API keys exhausted after {attempts} attempts ({keys} keys)")]
    Exhausted { attempts: usize, keys: usize },
}

/// Result alias for pool operations.
pub type Result<T> = std::result::Result<T, Error>;
