//! VirusTotal subdomain enumeration client
//!
//! Pages through `GET /api/v3/domains/{domain}/subdomains`, rotating through a
//! `vt_pool::CredentialPool` whenever a key reports `QuotaExceededError`, and
//! collects the identifiers that contain the target domain into a sorted,
//! deduplicated `SubdomainSet`.
//!
//! Errors that end a run (request construction, transport, body read, every
//! key exhausted on one page) come back as `Error`. The library never exits
//! the process; callers decide what a failed run means.
//!
//! ```no_run
//! # async fn run() -> vt_client::Result<()> {
//! let keys = vec![std::env::var("VT_API_KEY").unwrap_or_default()];
//! for subdomain in vt_client::fetch_subdomains("example.com", keys).await? {
//!     println!("{subdomain}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod constants;
pub mod error;
pub mod fetcher;
pub mod set;
pub mod types;

pub use constants::*;
pub use error::{Error, Result};
pub use fetcher::{FetchSummary, Fetcher, FetcherConfig};
pub use set::{DomainFilter, SubdomainSet};
pub use types::{ApiError, Links, PageResponse, SubdomainEntry};

use vt_pool::CredentialPool;

/// Fetch every subdomain of `domain` with default settings.
///
/// `keys` are used in order; blank keys are ignored. Returns the sorted,
/// deduplicated identifiers.
pub async fn fetch_subdomains<I>(domain: &str, keys: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = String>,
{
    let mut pool = CredentialPool::new(keys)?;
    let fetcher = Fetcher::new(FetcherConfig::default())?;
    let mut results = SubdomainSet::new();
    fetcher.collect(domain, &mut pool, &mut results).await?;
    Ok(results.into_sorted_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fetch_subdomains_rejects_empty_key_list() {
        let err = fetch_subdomains("example.com", Vec::<String>::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Pool(vt_pool::Error::Empty)), "got: {err:?}");
    }
}
