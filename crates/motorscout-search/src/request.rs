//! Lenient parsing of raw search input into a typed [`SearchQuery`].
//!
//! Query-string and JSON input both arrive here. A value that fails to parse
//! as its expected type is dropped with a warning and the search proceeds as
//! if the key were absent.

use motorscout_core::{lenient, Condition, Coordinate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::filter::FilterCriteria;
use crate::sort::SortKey;

/// The typed request driving one search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<Coordinate>,
    /// Geocoded only when `center` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_miles: Option<f64>,
    #[serde(default)]
    pub filters: FilterCriteria,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_key: Option<SortKey>,
    pub page: usize,
    /// `None` uses the engine's default page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            center: None,
            postcode: None,
            radius_miles: None,
            filters: FilterCriteria::default(),
            sort_key: None,
            page: 1,
            page_size: None,
        }
    }
}

/// Untyped filter values exactly as received.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFilters {
    pub make: Option<String>,
    pub condition: Option<String>,
    pub min_price: Option<Value>,
    pub max_price: Option<Value>,
    pub min_year: Option<Value>,
    pub max_year: Option<Value>,
    pub max_mileage: Option<Value>,
    pub bike_type: Option<String>,
    pub van_type: Option<String>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
}

/// A search request as it comes off the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub postcode: Option<String>,
    pub center: Option<Value>,
    pub radius_miles: Option<Value>,
    #[serde(default)]
    pub filters: RawFilters,
    pub sort_key: Option<String>,
    pub page: Option<Value>,
    pub page_size: Option<Value>,
}

impl SearchRequest {
    /// Build a request from decoded query-string pairs.
    ///
    /// Keys use the JSON field names (`minPrice`, `sortKey`, ...). `lat` and
    /// `lon` together supply a center. Unrecognised keys are ignored.
    pub fn from_query_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut request = Self::default();
        let mut lat = None;
        let mut lon = None;
        let text = |v: &str| Some(Value::String(v.to_string()));

        for (key, value) in pairs {
            match key {
                "postcode" => request.postcode = Some(value.to_string()),
                "lat" | "latitude" => lat = Some(value.to_string()),
                "lon" | "lng" | "longitude" => lon = Some(value.to_string()),
                "radiusMiles" => request.radius_miles = text(value),
                "make" => request.filters.make = Some(value.to_string()),
                "condition" => request.filters.condition = Some(value.to_string()),
                "minPrice" => request.filters.min_price = text(value),
                "maxPrice" => request.filters.max_price = text(value),
                "minYear" => request.filters.min_year = text(value),
                "maxYear" => request.filters.max_year = text(value),
                "maxMileage" => request.filters.max_mileage = text(value),
                "bikeType" => request.filters.bike_type = Some(value.to_string()),
                "vanType" => request.filters.van_type = Some(value.to_string()),
                "fuelType" => request.filters.fuel_type = Some(value.to_string()),
                "transmission" => request.filters.transmission = Some(value.to_string()),
                "sortKey" => request.sort_key = Some(value.to_string()),
                "page" => request.page = text(value),
                "pageSize" => request.page_size = text(value),
                other => tracing::debug!(key = other, "ignoring unrecognised search parameter"),
            }
        }

        if let (Some(lat), Some(lon)) = (lat, lon) {
            request.center = Some(serde_json::json!({ "latitude": lat, "longitude": lon }));
        }

        request
    }

    /// Convert into a typed query, dropping every malformed value.
    #[must_use]
    pub fn into_query(self) -> SearchQuery {
        let filters = self.filters;

        SearchQuery {
            center: self.center.as_ref().and_then(parse_center),
            postcode: self.postcode.filter(|p| !p.trim().is_empty()),
            radius_miles: non_negative_f64("radiusMiles", self.radius_miles.as_ref()),
            filters: FilterCriteria {
                make: non_blank(filters.make),
                condition: parse_condition(filters.condition),
                min_price: whole_number("minPrice", filters.min_price.as_ref()),
                max_price: whole_number("maxPrice", filters.max_price.as_ref()),
                min_year: whole_number("minYear", filters.min_year.as_ref()),
                max_year: whole_number("maxYear", filters.max_year.as_ref()),
                max_mileage: whole_number("maxMileage", filters.max_mileage.as_ref()),
                bike_type: non_blank(filters.bike_type),
                van_type: non_blank(filters.van_type),
                fuel_type: non_blank(filters.fuel_type),
                transmission: non_blank(filters.transmission),
            },
            sort_key: parse_sort_key(self.sort_key),
            page: page_number("page", self.page.as_ref()).unwrap_or(1),
            page_size: page_number("pageSize", self.page_size.as_ref()),
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn whole_number<T: TryFrom<u64>>(key: &'static str, raw: Option<&Value>) -> Option<T> {
    let value = raw.filter(|v| !is_blank(v))?;
    let parsed = lenient::loose_u64(value).and_then(|n| T::try_from(n).ok());
    if parsed.is_none() {
        tracing::warn!(key, value = %value, "dropping malformed filter value");
    }
    parsed
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn non_negative_f64(key: &'static str, raw: Option<&Value>) -> Option<f64> {
    let value = raw.filter(|v| !is_blank(v))?;
    let parsed = as_f64(value).filter(|f| f.is_finite() && *f >= 0.0);
    if parsed.is_none() {
        tracing::warn!(key, value = %value, "dropping malformed filter value");
    }
    parsed
}

/// Parse a 1-based page number or size. Values `<= 0` clamp to 1; non-numeric
/// input is dropped.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn page_number(key: &'static str, raw: Option<&Value>) -> Option<usize> {
    let value = raw.filter(|v| !is_blank(v))?;
    let Some(number) = as_f64(value).filter(|f| f.is_finite()) else {
        tracing::warn!(key, value = %value, "dropping malformed pagination value");
        return None;
    };
    if number < 1.0 {
        tracing::debug!(key, value = number, "clamping pagination value to 1");
        return Some(1);
    }
    // Float-to-int `as` saturates at usize::MAX.
    Some(number.trunc() as usize)
}

fn parse_center(raw: &Value) -> Option<Coordinate> {
    let latitude = raw.get("latitude").or_else(|| raw.get("lat")).and_then(as_f64);
    let longitude = raw
        .get("longitude")
        .or_else(|| raw.get("lon"))
        .or_else(|| raw.get("lng"))
        .and_then(as_f64);

    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => {
            let center = Coordinate::new(latitude, longitude);
            if center.is_valid() {
                Some(center)
            } else {
                tracing::warn!(latitude, longitude, "dropping out-of-range search center");
                None
            }
        }
        _ => {
            tracing::warn!(value = %raw, "dropping malformed search center");
            None
        }
    }
}

fn parse_condition(raw: Option<String>) -> Option<Condition> {
    let raw = non_blank(raw)?;
    if raw.eq_ignore_ascii_case("all") || raw.eq_ignore_ascii_case("any") {
        return None;
    }
    match raw.parse::<Condition>() {
        Ok(condition) => Some(condition),
        Err(reason) => {
            tracing::warn!(key = "condition", %reason, "dropping malformed filter value");
            None
        }
    }
}

fn parse_sort_key(raw: Option<String>) -> Option<SortKey> {
    let raw = non_blank(raw)?;
    match raw.parse::<SortKey>() {
        Ok(key) => Some(key),
        Err(reason) => {
            tracing::warn!(key = "sortKey", %reason, "dropping malformed sort key");
            None
        }
    }
}

#[cfg(test)]
#[path = "request_test.rs"]
mod tests;
