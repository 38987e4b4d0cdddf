//! Error types for the Syncro export client.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can stop an export.
///
/// Only [`Error::Api`] comes from the Syncro server itself; every other
/// variant is a local or transport failure. Both kinds are terminal.
#[derive(Debug, Error)]
pub enum Error {
    /// The API answered with anything other than `200 OK`.
    #[error("Error Response from Syncro [{status}] ({reason})")]
    Api {
        /// HTTP status code
        status: u16,
        /// Status text for the code
        reason: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The first page had no record to take column names from.
    #[error("No records returned from {0}")]
    NoRecords(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    pub(crate) fn api(status: reqwest::StatusCode) -> Self {
        Error::Api {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }

    /// Whether this error is a non-200 response from the API.
    pub fn is_api(&self) -> bool {
        matches!(self, Error::Api { .. })
    }

    /// HTTP status code carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the host name could not be resolved.
    ///
    /// reqwest only shows the resolver failure further down the `source()`
    /// chain, so every cause is checked.
    pub fn is_dns_failure(&self) -> bool {
        let mut cause: Option<&(dyn std::error::Error + 'static)> = Some(self);
        while let Some(err) = cause {
            let msg = err.to_string();
            if msg.contains("dns error") || msg.contains("failed to lookup") {
                return true;
            }
            cause = err.source();
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn api_error_keeps_status_and_reason() {
        let err = Error::api(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.is_api());
        assert_eq!(err.status(), Some(500));
        assert_eq!(
            err.to_string(),
            "Error Response from Syncro [500] (Internal Server Error)"
        );
    }

    #[test]
    fn unknown_status_has_fallback_reason() {
        let err = Error::api(StatusCode::from_u16(599).unwrap());
        assert_eq!(err.to_string(), "Error Response from Syncro [599] (Unknown)");
    }

    #[derive(Debug, thiserror::Error)]
    #[error("client error (Connect)")]
    struct ConnectError(#[source] std::io::Error);

    #[test]
    fn dns_failure_found_below_top_level() {
        let resolver = std::io::Error::other("failed to lookup address information");
        let err: Error = std::io::Error::other(ConnectError(resolver)).into();
        assert!(!err.to_string().contains("failed to lookup"));
        assert!(err.is_dns_failure());
    }

    #[test]
    fn other_errors_are_not_dns_failures() {
        assert!(!Error::api(StatusCode::NOT_FOUND).is_dns_failure());
        let err: Error = std::io::Error::other("connection refused").into();
        assert!(!err.is_dns_failure());
    }

    #[test]
    fn io_error_is_not_api() {
        let err: Error = std::io::Error::other("disk full").into();
        assert!(!err.is_api());
        assert_eq!(err.status(), None);
    }
}
