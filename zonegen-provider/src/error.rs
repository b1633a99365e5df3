use serde::{Deserialize, Serialize};

/// Unified error type for all zone inventory operations.
///
/// Each variant includes a `provider` field identifying which inventory produced the error,
/// plus variant-specific context. All variants are serializable for structured error reporting.
///
/// # Retryable Errors
///
/// The following variants represent transient failures that may succeed on retry:
/// - [`NetworkError`](Self::NetworkError): network connectivity issues
/// - [`Timeout`](Self::Timeout): request timed out
/// - [`RateLimited`](Self::RateLimited): API throttling
///
/// The built-in HTTP client automatically retries these with exponential backoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    ///
    /// This is a transient error and is automatically retried.
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The provided credentials are missing, invalid or expired.
    InvalidCredentials {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The authenticated principal lacks permission for the requested operation.
    PermissionDenied {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The API throttled the request (HTTP 429, `Throttling`, `PriorRequestNotComplete`).
    RateLimited {
        /// Provider that produced the error.
        provider: String,
        /// Suggested wait time in seconds before retrying, if provided by the API.
        retry_after: Option<u64>,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The HTTP request timed out.
    ///
    /// This is a transient error and is automatically retried.
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The specified hosted zone was not found.
    ZoneNotFound {
        /// Provider that produced the error.
        provider: String,
        /// Zone id or name that was not found.
        zone: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// A request parameter was rejected (malformed zone id, bad pagination marker).
    InvalidParameter {
        /// Provider that produced the error.
        provider: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// Failed to parse the provider's response or snapshot document.
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// The snapshot file could not be read.
    SnapshotError {
        /// Provider that produced the error.
        provider: String,
        /// Path of the snapshot document.
        path: String,
        /// Details about the I/O failure.
        detail: String,
    },

    /// An unrecognized error from the provider API.
    ///
    /// This is a catch-all for error codes not yet mapped to a specific variant.
    Unknown {
        /// Provider that produced the error.
        provider: String,
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

impl ProviderError {
    /// Whether the error is caused by input or account state rather than a fault,
    /// used to pick the log level.
    ///
    /// `true` logs at `warn`, `false` at `error`.
    /// **Update this when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::ZoneNotFound { .. }
                | Self::InvalidParameter { .. }
                | Self::SnapshotError { .. }
        )
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::InvalidCredentials {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Invalid credentials: {msg}")
                } else {
                    write!(f, "[{provider}] Invalid credentials")
                }
            }
            Self::PermissionDenied {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Permission denied: {msg}")
                } else {
                    write!(f, "[{provider}] Permission denied")
                }
            }
            Self::RateLimited {
                provider,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{provider}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{provider}] Rate limited")
                }
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::ZoneNotFound {
                provider,
                zone,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Zone '{zone}' not found: {msg}")
                } else {
                    write!(f, "[{provider}] Zone '{zone}' not found")
                }
            }
            Self::InvalidParameter {
                provider,
                param,
                detail,
            } => {
                write!(f, "[{provider}] Invalid parameter '{param}': {detail}")
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::SnapshotError {
                provider,
                path,
                detail,
            } => {
                write!(f, "[{provider}] Cannot read snapshot '{path}': {detail}")
            }
            Self::Unknown {
                provider,
                raw_code,
                raw_message,
            } => {
                if let Some(code) = raw_code {
                    write!(f, "[{provider}] {code}: {raw_message}")
                } else {
                    write!(f, "[{provider}] {raw_message}")
                }
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_network_error() {
        let e = ProviderError::NetworkError {
            provider: "test".to_string(),
            detail: "connection refused".to_string(),
        };
        assert_eq!(e.to_string(), "[test] Network error: connection refused");
    }

    #[test]
    fn display_invalid_credentials_with_message() {
        let e = ProviderError::InvalidCredentials {
            provider: "route53".to_string(),
            raw_message: Some("The security token included in the request is invalid.".to_string()),
        };
        assert_eq!(
            e.to_string(),
            "[route53] Invalid credentials: The security token included in the request is invalid."
        );
    }

    #[test]
    fn display_invalid_credentials_without_message() {
        let e = ProviderError::InvalidCredentials {
            provider: "route53".to_string(),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[route53] Invalid credentials");
    }

    #[test]
    fn display_rate_limited_with_retry_after() {
        let e = ProviderError::RateLimited {
            provider: "route53".to_string(),
            retry_after: Some(3),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[route53] Rate limited (retry after 3s)");
    }

    #[test]
    fn display_zone_not_found() {
        let e = ProviderError::ZoneNotFound {
            provider: "route53".to_string(),
            zone: "Z1".to_string(),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[route53] Zone 'Z1' not found");
    }

    #[test]
    fn display_snapshot_error() {
        let e = ProviderError::SnapshotError {
            provider: "snapshot".to_string(),
            path: "zones.json".to_string(),
            detail: "No such file or directory".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "[snapshot] Cannot read snapshot 'zones.json': No such file or directory"
        );
    }

    #[test]
    fn display_unknown_with_code() {
        let e = ProviderError::Unknown {
            provider: "route53".to_string(),
            raw_code: Some("ServiceUnavailable".to_string()),
            raw_message: "try later".to_string(),
        };
        assert_eq!(e.to_string(), "[route53] ServiceUnavailable: try later");
    }

    #[test]
    fn expected_errors_are_user_facing() {
        assert!(
            ProviderError::PermissionDenied {
                provider: "route53".into(),
                raw_message: None,
            }
            .is_expected()
        );
        assert!(
            !ProviderError::Timeout {
                provider: "route53".into(),
                detail: "slow".into(),
            }
            .is_expected()
        );
    }

    #[test]
    fn serializes_with_code_tag() {
        let e = ProviderError::ZoneNotFound {
            provider: "route53".into(),
            zone: "Z9".into(),
            raw_message: None,
        };
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["code"], "ZoneNotFound");
        assert_eq!(json["zone"], "Z9");
    }
}
