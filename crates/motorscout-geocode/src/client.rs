//! HTTP client for the postcodes.io lookup API.
//!
//! Implements [`Geocoder`] so the search engine can resolve a postcode
//! center. A 404 is a normal "unknown postcode" answer, not an error.

use std::time::Duration;

use async_trait::async_trait;
use motorscout_core::{AppConfig, Coordinate};
use motorscout_search::Geocoder;
use reqwest::{Client, StatusCode, Url};

use crate::error::GeocodeError;
use crate::types::PostcodeResponse;

const DEFAULT_BASE_URL: &str = "https://api.postcodes.io/";

/// Client for postcodes.io.
///
/// Use [`PostcodesIoClient::new`] for production or
/// [`PostcodesIoClient::with_base_url`] to point at a mock server in tests.
pub struct PostcodesIoClient {
    client: Client,
    base_url: Url,
}

impl PostcodesIoClient {
    /// Creates a client pointed at the public postcodes.io API.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, GeocodeError> {
        Self::with_base_url(timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client from the geocoder settings in `config`.
    ///
    /// # Errors
    ///
    /// Same as [`PostcodesIoClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, GeocodeError> {
        Self::with_base_url(
            config.geocoder_timeout_secs,
            &config.geocoder_user_agent,
            &config.geocoder_base_url,
        )
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`GeocodeError::InvalidBaseUrl`] if `base_url` is not an
    /// absolute http(s) URL.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| GeocodeError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(GeocodeError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "expected an absolute http(s) URL".to_owned(),
            });
        }

        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Looks up a single postcode.
    ///
    /// Returns `Ok(None)` when postcodes.io does not know the postcode or has
    /// no coordinates for it.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::Http`] on network failure or timeout.
    /// - [`GeocodeError::UnexpectedStatus`] on any non-2xx status except 404.
    /// - [`GeocodeError::Deserialize`] if the body does not match the expected shape.
    pub async fn lookup(&self, postcode: &str) -> Result<Option<Coordinate>, GeocodeError> {
        let url = self.postcode_url(postcode);
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!(postcode, "postcode not known to postcodes.io");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(GeocodeError::UnexpectedStatus {
                status: status.as_u16(),
                postcode: postcode.to_owned(),
            });
        }

        let body = response.text().await?;
        let envelope: PostcodeResponse =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;

        let coordinate = envelope.result.and_then(|result| {
            match (result.latitude, result.longitude) {
                (Some(latitude), Some(longitude)) => Some(Coordinate::new(latitude, longitude)),
                _ => {
                    tracing::debug!(postcode = %result.postcode, "postcode has no coordinates");
                    None
                }
            }
        });
        Ok(coordinate)
    }

    /// Builds `{base}/postcodes/{postcode}` with the postcode percent-encoded
    /// as a single path segment.
    fn postcode_url(&self, postcode: &str) -> Url {
        let mut url = self.base_url.clone();
        // Constructor guarantees a hierarchical URL, so segments are always available.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("postcodes").push(postcode);
        }
        url
    }
}

#[async_trait]
impl Geocoder for PostcodesIoClient {
    type Error = GeocodeError;

    async fn geocode(&self, postcode: &str) -> Result<Option<Coordinate>, Self::Error> {
        self.lookup(postcode).await
    }
}
