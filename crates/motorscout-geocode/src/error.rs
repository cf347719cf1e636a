use thiserror::Error;

/// Errors returned by the postcodes.io client.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Network, TLS or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Any non-2xx status other than 404.
    #[error("unexpected HTTP status {status} geocoding {postcode}")]
    UnexpectedStatus { status: u16, postcode: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid geocoder base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
