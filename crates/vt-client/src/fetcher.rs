//! Pagination and key rotation against the subdomains endpoint
//!
//! Two nested loops drive a run:
//! - `collect` walks `links.next` from the first page until it is empty,
//!   adding every matching identifier to the caller's `SubdomainSet`.
//! - `fetch_page` issues the request for one page and, while the upstream
//!   answers `QuotaExceededError`, rotates the pool and retries. A page may
//!   rotate at most once per key.
//!
//! Requests are sequential; one is in flight at a time. Transport failures
//! are returned to the caller without retry.

use std::time::Duration;

use common::Secret;
use reqwest::header::HeaderValue;
use tracing::{debug, info, warn};
use vt_pool::{CredentialPool, ErrorClassification, classify_error};

use crate::constants::{API_KEY_HEADER, DEFAULT_BASE_URL, DEFAULT_PAGE_LIMIT};
use crate::error::{Error, Result};
use crate::set::{DomainFilter, SubdomainSet};
use crate::types::PageResponse;

/// Endpoint and client settings for a `Fetcher`.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    pub base_url: String,
    pub page_limit: u32,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_limit: DEFAULT_PAGE_LIMIT,
            timeout: None,
        }
    }
}

/// Counters for one `collect` run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FetchSummary {
    /// Pages that produced a response (after any key rotation)
    pub pages: usize,
    /// Quota-driven key switches across all pages
    pub rotations: usize,
    /// Pages skipped because the upstream returned a non-quota error
    pub rejected_pages: usize,
    /// Entries returned by the upstream, before filtering
    pub entries: usize,
    /// Entries that matched the domain and were new to the set
    pub added: usize,
}

/// Drives requests against the VirusTotal subdomains endpoint.
pub struct Fetcher {
    client: reqwest::Client,
    config: FetcherConfig,
}

impl Fetcher {
    /// Build a fetcher with its own HTTP client.
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(Error::Client)?;
        Ok(Self::with_client(client, config))
    }

    /// Build a fetcher around an existing client. `config.timeout` is ignored.
    pub fn with_client(client: reqwest::Client, config: FetcherConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }

    /// Locator for the first page of `domain`. The domain is inserted verbatim.
    pub fn first_page_url(&self, domain: &str) -> String {
        format!(
            "{}/api/v3/domains/{}/subdomains?limit={}",
            self.config.base_url.trim_end_matches('/'),
            domain,
            self.config.page_limit
        )
    }

    /// Walk every page for `domain`, inserting matching identifiers into `results`.
    ///
    /// `results` is owned by the caller, so entries gathered before an error
    /// are still there when this returns `Err`.
    pub async fn collect(
        &self,
        domain: &str,
        pool: &mut CredentialPool,
        results: &mut SubdomainSet,
    ) -> Result<FetchSummary> {
        let filter = DomainFilter::new(domain);
        let mut summary = FetchSummary::default();
        let mut url = self.first_page_url(domain);

        while !url.is_empty() {
            let (page, rotations) = self.fetch_page_counted(&url, pool).await?;
            summary.pages += 1;
            summary.rotations += rotations;

            if page.error.is_some() {
                // already logged with the raw body by fetch_page
                summary.rejected_pages += 1;
            } else if page.data.is_empty() {
                info!(page = summary.pages, "no subdomains found in the response");
            } else {
                for entry in &page.data {
                    summary.entries += 1;
                    if filter.matches(&entry.id) && results.insert(&entry.id) {
                        summary.added += 1;
                    }
                }
                debug!(
                    page = summary.pages,
                    entries = page.data.len(),
                    total = results.len(),
                    "page processed"
                );
            }

            url = page.next_link().to_string();
        }

        info!(
            domain,
            pages = summary.pages,
            rotations = summary.rotations,
            rejected_pages = summary.rejected_pages,
            entries = summary.entries,
            subdomains = results.len(),
            "pagination complete"
        );
        Ok(summary)
    }

    /// Fetch one page, rotating keys while the upstream reports quota exhaustion.
    ///
    /// A body that does not decode is logged and yields `PageResponse::default()`,
    /// whose empty next link ends pagination. A non-quota upstream error is
    /// logged and returned in `PageResponse::error` for the caller to skip.
    pub async fn fetch_page(&self, url: &str, pool: &mut CredentialPool) -> Result<PageResponse> {
        self.fetch_page_counted(url, pool)
            .await
            .map(|(page, _)| page)
    }

    async fn fetch_page_counted(
        &self,
        url: &str,
        pool: &mut CredentialPool,
    ) -> Result<(PageResponse, usize)> {
        let mut attempts = 0usize;
        loop {
            let body = self.get(url, pool.current(), pool.cursor()).await?;

            let page: PageResponse = match serde_json::from_slice(&body) {
                Ok(page) => page,
                Err(e) => {
                    warn!(
                        error = %e,
                        body = %String::from_utf8_lossy(&body),
                        "failed to decode page response"
                    );
                    return Ok((PageResponse::default(), attempts));
                }
            };

            let classification = page.error.as_ref().map(|e| classify_error(&e.code));
            match classification {
                None => return Ok((page, attempts)),
                Some(ErrorClassification::Rejected) => {
                    if let Some(err) = &page.error {
                        warn!(
                            code = %err.code,
                            message = %err.message,
                            body = %String::from_utf8_lossy(&body),
                            "upstream returned an error, skipping page"
                        );
                    }
                    return Ok((page, attempts));
                }
                Some(ErrorClassification::QuotaExceeded) => {
                    attempts += 1;
                    pool.rotate_after_quota(attempts)?;
                }
            }
        }
    }

    async fn get(&self, url: &str, key: &Secret<String>, key_index: usize) -> Result<Vec<u8>> {
        let parsed = reqwest::Url::parse(url).map_err(|e| Error::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        let mut value =
            HeaderValue::from_str(key.expose()).map_err(|_| Error::InvalidCredential)?;
        value.set_sensitive(true);

        debug!(url, key_index, "requesting page");
        let response = self
            .client
            .get(parsed)
            .header(API_KEY_HEADER, value)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = response.status();
        let body = response.bytes().await.map_err(Error::Body)?;
        debug!(status = status.as_u16(), bytes = body.len(), "response received");
        Ok(body.to_vec())
    }
}
