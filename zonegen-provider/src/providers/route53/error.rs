//! Route 53 error mapping
//!
//! Reference: <https://docs.aws.amazon.com/Route53/latest/APIReference/CommonErrors.html>
//!
//! Only the read-only calls are issued, so the mapping covers authentication,
//! authorization, throttling, missing zones and malformed input. Everything
//! else falls back to `Unknown` with the raw code preserved.

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::Route53Provider;

impl ProviderErrorMapper for Route53Provider {
    fn provider_name(&self) -> &'static str {
        "route53"
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            // ============ Authentication ============
            Some(
                "InvalidClientTokenId"
                | "SignatureDoesNotMatch"
                | "UnrecognizedClientException"
                | "ExpiredToken"
                | "MissingAuthenticationToken"
                | "InvalidSignatureException",
            ) => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // ============ Authorization ============
            Some("AccessDenied" | "AccessDeniedException") => ProviderError::PermissionDenied {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            // ============ Throttling ============
            Some("Throttling" | "ThrottlingException" | "PriorRequestNotComplete") => {
                ProviderError::RateLimited {
                    provider: self.provider_name().to_string(),
                    retry_after: None,
                    raw_message: Some(raw.message),
                }
            }

            // ============ Missing zone ============
            Some("NoSuchHostedZone") => ProviderError::ZoneNotFound {
                provider: self.provider_name().to_string(),
                zone: context.zone.unwrap_or_default(),
                raw_message: Some(raw.message),
            },

            // ============ Malformed input ============
            Some("InvalidInput" | "InvalidArgument") => ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: context.param.unwrap_or_else(|| "request".to_string()),
                detail: raw.message,
            },

            _ => self.unknown_error(raw),
        }
    }
}
