//! VirusTotal API constants
//!
//! Public endpoint details of the v3 API. The base URL is overridable through
//! `FetcherConfig` so tests and proxies can point the client elsewhere.

/// Production API host
pub const DEFAULT_BASE_URL: &str = "https://www.virustotal.com";

/// Page size requested from the subdomains relationship endpoint
pub const DEFAULT_PAGE_LIMIT: u32 = 40;

/// Request header carrying the API key
pub const API_KEY_HEADER: &str = "x-apikey";
