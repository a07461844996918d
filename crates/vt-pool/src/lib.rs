//! Credential pool for VirusTotal API keys
//!
//! Holds the ordered list of API keys loaded at startup and a cursor naming
//! the key in use. Quota errors reported by the upstream rotate the cursor to
//! the next key, wrapping around. A single page may rotate at most once per
//! key; past that the pool reports exhaustion and the caller gives up.
//!
//! Key lifecycle:
//! 1. Keys are read once at startup → `CredentialPool::new`, cursor at 0
//! 2. Requests carry `CredentialPool::current`
//! 3. Upstream answers `QuotaExceededError` → `rotate_after_quota`
//! 4. Every key spent on the same page → `Error::Exhausted`

pub mod error;
pub mod pool;
pub mod quota;

pub use error::{Error, Result};
pub use pool::CredentialPool;
pub use quota::{ErrorClassification, QUOTA_EXCEEDED_CODE, classify_error};
