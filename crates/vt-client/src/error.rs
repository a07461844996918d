//! Error types for fetch operations
//!
//! Only failures that end a run surface here. Decode failures and non-quota
//! upstream errors are absorbed per page by the fetcher and never become an
//! `Error`.

/// Errors that stop the pagination loop.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("error creating request for {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("error creating request: API key is not a valid header value")]
    InvalidCredential,

    #[error("HTTP request error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("error reading response body: {0}")]
    Body(#[source] reqwest::Error),

    #[error(transparent)]
    Pool(#[from] vt_pool::Error),
}

impl Error {
    /// True when every key hit its quota on the same page.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Error::Pool(vt_pool::Error::Exhausted { .. }))
    }
}

/// Result alias for fetch operations.
pub type Result<T> = std::result::Result<T, Error>;
