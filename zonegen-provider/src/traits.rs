use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{Record, Zone};

/// Error as returned by the API, before mapping.
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// AWS `Error/Code`
    pub code: Option<String>,
    /// AWS `Error/Message`
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Request context available when mapping an error.
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// Zone id, for `ZoneNotFound`
    pub zone: Option<String>,
    /// Parameter name, for `InvalidParameter`
    pub param: Option<String>,
}

/// Maps raw API errors of one inventory onto [`ProviderError`].
pub(crate) trait ProviderErrorMapper {
    /// Inventory identifier.
    fn provider_name(&self) -> &'static str;

    /// Maps a raw API error.
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// Shorthand for [`ProviderError::ParseError`].
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// Fallback for unmapped codes.
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// Source of hosted zones and their record sets.
///
/// Pagination is handled inside the implementation; callers always see the
/// complete, flattened listing in provider order.
#[async_trait]
pub trait ZoneInventory: Send + Sync {
    /// Inventory identifier, used in logs and errors.
    fn id(&self) -> &'static str;

    /// Checks that the inventory can be reached with the configured credentials.
    ///
    /// Returns `Ok(false)` when the credentials are rejected.
    async fn validate_credentials(&self) -> Result<bool>;

    /// Lists every hosted zone.
    async fn list_zones(&self) -> Result<Vec<Zone>>;

    /// Fetches a single hosted zone by id.
    async fn get_zone(&self, zone_id: &str) -> Result<Zone>;

    /// Lists every record set of a zone, excluding the provider-managed NS/SOA
    /// sets at the apex.
    async fn list_records(&self, zone_id: &str) -> Result<Vec<Record>>;
}
