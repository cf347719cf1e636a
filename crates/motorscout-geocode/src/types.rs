//! postcodes.io response types.
//!
//! Only the fields the geocoder reads are modelled; everything else in the
//! payload is ignored.

use serde::Deserialize;

/// Envelope for `GET /postcodes/{postcode}`: `{ "status": 200, "result": { ... } }`.
#[derive(Debug, Deserialize)]
pub struct PostcodeResponse {
    pub status: u16,
    #[serde(default)]
    pub result: Option<PostcodeResult>,
}

#[derive(Debug, Deserialize)]
pub struct PostcodeResult {
    pub postcode: String,
    /// `null` for postcodes without a grid reference (e.g. some PO boxes).
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}
