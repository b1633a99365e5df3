//! Route 53 signed HTTP requests

use chrono::Utc;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};
use crate::utils::log_sanitizer::truncate_for_log;

use super::sign::{SignableRequest, canonical_query};
use super::types::ErrorResponse;
use super::{ROUTE53_HOST, Route53Provider};

impl Route53Provider {
    /// Maps a non-2xx response to a `ProviderError`.
    fn handle_response_error(
        &self,
        status: u16,
        response_text: &str,
        ctx: ErrorContext,
    ) -> Result<()> {
        if (200..300).contains(&status) {
            return Ok(());
        }

        if let Ok(envelope) = HttpUtils::parse_xml::<ErrorResponse>(response_text, self.provider_name())
        {
            return Err(self.map_error(
                RawApiError::with_code(
                    envelope.error.code.unwrap_or_default(),
                    envelope.error.message.unwrap_or_default(),
                ),
                ctx,
            ));
        }

        Err(self.unknown_error(RawApiError::new(format!(
            "HTTP {status}: {}",
            truncate_for_log(response_text)
        ))))
    }

    /// Performs a signed GET against the Route 53 API and parses the XML body.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
        ctx: ErrorContext,
    ) -> Result<T> {
        let amz_date = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
        let query = canonical_query(params);

        let mut headers = vec![
            ("Host".to_string(), ROUTE53_HOST.to_string()),
            ("X-Amz-Date".to_string(), amz_date.clone()),
        ];
        if let Some(token) = &self.credentials.session_token {
            headers.push(("X-Amz-Security-Token".to_string(), token.clone()));
        }

        let authorization = self.sign(
            &SignableRequest {
                method: "GET",
                uri: path,
                query: &query,
                headers: &headers,
                payload: "",
            },
            &amz_date,
        );

        let url = if query.is_empty() {
            format!("https://{ROUTE53_HOST}{path}")
        } else {
            format!("https://{ROUTE53_HOST}{path}?{query}")
        };

        let mut request = self.client.get(&url).header("Authorization", authorization);
        for (name, value) in &headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let (status, response_text) = HttpUtils::execute_request_with_retry(
            request,
            self.provider_name(),
            "GET",
            &url,
            self.max_retries,
        )
        .await?;

        self.handle_response_error(status, &response_text, ctx)?;
        HttpUtils::parse_xml(&response_text, self.provider_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::providers::route53::AwsCredentials;

    fn provider() -> Route53Provider {
        Route53Provider::new(AwsCredentials {
            access_key_id: "AKID".to_string(),
            secret_access_key: "secret".to_string(),
            session_token: None,
        })
    }

    #[test]
    fn success_status_passes_through() {
        assert!(
            provider()
                .handle_response_error(200, "", ErrorContext::default())
                .is_ok()
        );
    }

    #[test]
    fn xml_error_envelope_is_mapped() {
        let body = "<ErrorResponse><Error><Type>Sender</Type>\
                    <Code>InvalidClientTokenId</Code>\
                    <Message>The security token included in the request is invalid.</Message>\
                    </Error><RequestId>r</RequestId></ErrorResponse>";
        let result = provider().handle_response_error(403, body, ErrorContext::default());
        assert!(
            matches!(result, Err(ProviderError::InvalidCredentials { .. })),
            "unexpected result: {result:?}"
        );
    }

    #[test]
    fn non_xml_error_is_unknown() {
        let result = provider().handle_response_error(500, "oops", ErrorContext::default());
        assert!(
            matches!(&result, Err(ProviderError::Unknown { raw_message, .. }) if raw_message == "HTTP 500: oops"),
            "unexpected result: {result:?}"
        );
    }
}
