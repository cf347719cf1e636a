use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::lenient::{lenient_decimal, lenient_number, lenient_parsed, lenient_timestamp};
use crate::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Car,
    Bike,
    Van,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Car => write!(f, "car"),
            Category::Bike => write!(f, "bike"),
            Category::Van => write!(f, "van"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "car" => Ok(Category::Car),
            "bike" | "motorbike" | "motorcycle" => Ok(Category::Bike),
            "van" => Ok(Category::Van),
            other => Err(format!("unknown category '{other}'")),
        }
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    New,
    Used,
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::New => write!(f, "new"),
            Condition::Used => write!(f, "used"),
        }
    }
}

impl std::str::FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(Condition::New),
            "used" => Ok(Condition::Used),
            other => Err(format!("unknown condition '{other}'")),
        }
    }
}

impl<'de> Deserialize<'de> for Condition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A WGS84 point, resolved upstream from a postcode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lon", alias = "lng")]
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns `true` when both components are finite and inside the WGS84 ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// One vehicle advert as delivered by the listings service.
///
/// Every numeric fact is optional: `None` means the registry did not supply
/// it, never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub category: Category,
    pub make: String,
    #[serde(default)]
    pub model: String,
    /// Unrecognised values load as `None`.
    #[serde(
        default,
        deserialize_with = "lenient_parsed",
        skip_serializing_if = "Option::is_none"
    )]
    pub condition: Option<Condition>,
    /// Asking price in whole pounds.
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<u32>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<u16>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub mileage: Option<u32>,
    /// Litres for most car feeds, cc for bikes; kept as supplied.
    #[serde(
        rename = "engineSizeOrCC",
        alias = "engineSizeOrCc",
        default,
        deserialize_with = "lenient_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub engine_size_or_cc: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bike_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub van_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmission: Option<String>,
    #[serde(default)]
    pub postcode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinate>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub listed_at: Option<DateTime<Utc>>,
}

impl Listing {
    /// Price formatted for display, e.g. `"£12,995"`, or `"Contact seller"`
    /// when the price is unknown.
    #[must_use]
    pub fn display_price(&self) -> String {
        match self.price {
            Some(price) => format!("£{}", group_thousands(u64::from(price))),
            None => "Contact seller".to_string(),
        }
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Load a listings snapshot (a JSON array of [`Listing`]) from disk.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or is not a JSON array of listings.
pub fn load_listings(path: &Path) -> Result<Vec<Listing>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SnapshotIo {
        path: path.display().to_string(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| ConfigError::SnapshotParse {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
#[path = "listings_test.rs"]
mod tests;
