//! AWS Signature Version 4

use std::fmt::Write;

use sha2::{Digest, Sha256};

use crate::providers::common::hmac_sha256;
use crate::utils::log_sanitizer::truncate_for_log;

use super::{AwsCredentials, Route53Provider, SIGNING_REGION, SIGNING_SERVICE};

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// The parts of an HTTP request that go into the canonical request.
pub(crate) struct SignableRequest<'a> {
    pub method: &'a str,
    pub uri: &'a str,
    /// Already RFC 3986 encoded `k=v` pairs joined by `&`.
    pub query: &'a str,
    pub headers: &'a [(String, String)],
    pub payload: &'a str,
}

/// Derives the SigV4 signing key for a single day, region and service.
pub(crate) fn signing_key(secret: &str, date: &str, region: &str, service: &str) -> Vec<u8> {
    let k_date = hmac_sha256(format!("AWS4{secret}").as_bytes(), date.as_bytes());
    let k_region = hmac_sha256(&k_date, region.as_bytes());
    let k_service = hmac_sha256(&k_region, service.as_bytes());
    hmac_sha256(&k_service, b"aws4_request")
}

/// Builds the `k=v&k=v` canonical query string: both sides RFC 3986 encoded,
/// sorted by key then value.
pub(crate) fn canonical_query(params: &[(&str, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| {
            (
                urlencoding::encode(k).into_owned(),
                urlencoding::encode(v).into_owned(),
            )
        })
        .collect();
    encoded.sort();
    encoded
        .into_iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

impl AwsCredentials {
    /// Signs a request and returns the `Authorization` header value.
    /// Reference: <https://docs.aws.amazon.com/IAM/latest/UserGuide/create-signed-request.html>
    pub(crate) fn sign(
        &self,
        request: &SignableRequest<'_>,
        region: &str,
        service: &str,
        amz_date: &str,
    ) -> String {
        let date = amz_date.get(..8).unwrap_or(amz_date);

        // 1. Query string sorted by parameter
        let canonical_query = if request.query.is_empty() {
            String::new()
        } else {
            let mut params: Vec<&str> = request.query.split('&').collect();
            params.sort_unstable();
            params.join("&")
        };

        // 2. Canonical headers, lowercase and sorted
        let mut sorted_headers: Vec<_> = request.headers.iter().collect();
        sorted_headers.sort_by_key(|(k, _)| k.to_lowercase());

        let canonical_headers: String =
            sorted_headers
                .iter()
                .fold(String::new(), |mut acc, (k, v)| {
                    let _ = writeln!(acc, "{}:{}", k.to_lowercase(), v.trim());
                    acc
                });

        let signed_headers: String = sorted_headers
            .iter()
            .map(|(k, _)| k.to_lowercase())
            .collect::<Vec<_>>()
            .join(";");

        // 3. Canonical request
        let hashed_payload = hex::encode(Sha256::digest(request.payload.as_bytes()));
        let canonical_request = format!(
            "{}\n{}\n{canonical_query}\n{canonical_headers}\n{signed_headers}\n{hashed_payload}",
            request.method, request.uri
        );

        log::debug!("CanonicalRequest:\n{}", truncate_for_log(&canonical_request));

        // 4. String to sign
        let scope = format!("{date}/{region}/{service}/aws4_request");
        let hashed_canonical_request = hex::encode(Sha256::digest(canonical_request.as_bytes()));
        let string_to_sign = format!("{ALGORITHM}\n{amz_date}\n{scope}\n{hashed_canonical_request}");

        log::debug!("StringToSign:\n{string_to_sign}");

        // 5. Signature
        let key = signing_key(&self.secret_access_key, date, region, service);
        let signature = hex::encode(hmac_sha256(&key, string_to_sign.as_bytes()));

        format!(
            "{ALGORITHM} Credential={}/{scope}, SignedHeaders={signed_headers}, Signature={signature}",
            self.access_key_id
        )
    }
}

impl Route53Provider {
    /// Signs a request for the global Route 53 endpoint.
    pub(crate) fn sign(&self, request: &SignableRequest<'_>, amz_date: &str) -> String {
        self.credentials
            .sign(request, SIGNING_REGION, SIGNING_SERVICE, amz_date)
    }
}
