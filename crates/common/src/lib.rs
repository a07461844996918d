//! Shared types for the VirusTotal subdomain workspace

mod error;
mod secret;

pub use error::{Error, Result};
pub use secret::Secret;
