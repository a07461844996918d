//! Quota detection for VirusTotal error payloads
//!
//! VirusTotal reports failures as `{"error": {"code": "...", "message": "..."}}`.
//! Only `QuotaExceededError` means the key in use is spent and another key
//! may still succeed; every other code is a property of the request itself.

/// Error code VirusTotal returns once a key has used up its allowance.
pub const QUOTA_EXCEEDED_CODE: &str = "QuotaExceededError";

/// Classification of upstream error payloads to pick the pool action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClassification {
    /// Key allowance spent, rotate to the next key and retry
    QuotaExceeded,
    /// Anything else: no pool action, the page is skipped
    Rejected,
}

/// Classify an upstream error code. Matching is exact and case-sensitive.
pub fn classify_error(code: &str) -> ErrorClassification {
    if code == QUOTA_EXCEEDED_CODE {
        ErrorClassification::QuotaExceeded
    } else {
        ErrorClassification::Rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_exceeded_code_rotates() {
        assert_eq!(
            classify_error("QuotaExceededError"),
            ErrorClassification::QuotaExceeded
        );
    }

    #[test]
    fn not_found_is_rejected() {
        assert_eq!(classify_error("NotFoundError"), ErrorClassification::Rejected);
    }

    #[test]
    fn wrong_credentials_is_rejected() {
        assert_eq!(
            classify_error("WrongCredentialsError"),
            ErrorClassification::Rejected
        );
    }

    #[test]
    fn empty_code_is_rejected() {
        assert_eq!(classify_error(""), ErrorClassification::Rejected);
    }

    #[test]
    fn match_is_case_sensitive() {
        assert_eq!(
            classify_error("quotaexceedederror"),
            ErrorClassification::Rejected
        );
    }
}
