use http::StatusCode;

use crate::ErrorEntry;

/// A fault that already knows how it should be answered
///
/// Such faults map without per-rule configuration: the status comes from
/// [`Self::status_code`], the entry from [`Self::error_entry`]. The mapping
/// layer's own errors implement it as well, so a failed mapping can still be
/// answered.
pub trait HttpError: std::error::Error {
    /// Status to answer the fault with
    fn status_code(&self) -> StatusCode;

    /// Machine-readable code of the fault (e.g. `invalid_request_error`)
    fn error_type(&self) -> &str;

    /// Client-facing message; must not leak internals
    fn client_message(&self) -> String;

    /// Entry describing the fault to the client
    fn error_entry(&self) -> ErrorEntry {
        ErrorEntry::new(self.error_type(), self.client_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("quota of {0} requests exceeded")]
    struct QuotaExceeded(u32);

    impl HttpError for QuotaExceeded {
        fn status_code(&self) -> StatusCode {
            StatusCode::TOO_MANY_REQUESTS
        }

        fn error_type(&self) -> &str {
            "rate_limit_error"
        }

        fn client_message(&self) -> String {
            "too many requests".to_owned()
        }
    }

    #[test]
    fn entry_from_type_and_client_message() {
        assert_eq!(
            QuotaExceeded(100).error_entry(),
            ErrorEntry::new("rate_limit_error", "too many requests")
        );
    }
}
