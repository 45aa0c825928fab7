//! Reqwest-backed ViaCEP lookup adapter.
//!
//! This adapter owns transport details only: URL templating, the per-request
//! deadline, HTTP status mapping and JSON decoding into domain addresses.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::ViaCepAddressDto;
use crate::domain::ports::{AddressLookup, AddressLookupError};
use crate::domain::{Address, PostalCode};

const USER_AGENT: &str = concat!("admissions-backend/", env!("CARGO_PKG_VERSION"));

/// ViaCEP adapter issuing `GET {base}/ws/{digits}/json/`.
pub struct ViaCepHttpLookup {
    client: Client,
    base_url: String,
}

impl ViaCepHttpLookup {
    /// Build an adapter whose requests are bounded by `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_owned(),
        })
    }

    fn endpoint(&self, code: &PostalCode) -> String {
        format!("{}/ws/{}/json/", self.base_url, code.digits())
    }
}

#[async_trait]
impl AddressLookup for ViaCepHttpLookup {
    async fn lookup(&self, code: &PostalCode) -> Result<Option<Address>, AddressLookupError> {
        let endpoint = self.endpoint(code);
        debug!(%endpoint, "querying ViaCEP");
        let response = self
            .client
            .get(endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_address(body.as_ref())
    }
}

fn parse_address(body: &[u8]) -> Result<Option<Address>, AddressLookupError> {
    let decoded: ViaCepAddressDto = serde_json::from_slice(body).map_err(|error| {
        AddressLookupError::decode(format!("invalid ViaCEP JSON payload: {error}"))
    })?;
    Ok(decoded.into_domain())
}

fn map_transport_error(error: reqwest::Error) -> AddressLookupError {
    if error.is_timeout() {
        AddressLookupError::timeout(error.to_string())
    } else {
        AddressLookupError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> AddressLookupError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_owned()
    } else {
        preview
    };
    AddressLookupError::upstream_status(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
