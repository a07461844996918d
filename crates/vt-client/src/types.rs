//! Response model for the subdomains relationship endpoint
//!
//! Only the fields the fetcher reads are modelled; VirusTotal's `type`,
//! `attributes`, `meta` and friends are ignored. Every field defaults, and an
//! explicit `null` decodes the same as a missing field, so a sparse body such
//! as `{"data": null}` still decodes.

use serde::{Deserialize, Deserializer};

/// Decode `null` as `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One page of `GET /api/v3/domains/{domain}/subdomains`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct PageResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<SubdomainEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub links: Links,
    #[serde(default)]
    pub error: Option<ApiError>,
}

impl PageResponse {
    /// URL of the following page, or `""` on the last page.
    pub fn next_link(&self) -> &str {
        self.links.next.as_deref().unwrap_or("")
    }
}

/// A subdomain record. `id` is the raw identifier string.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct SubdomainEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub next: Option<String>,
}

/// Error object VirusTotal returns in place of data.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiError {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}
