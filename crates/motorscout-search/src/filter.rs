//! Facet filters compiled into a single conjunctive predicate.
//!
//! Policy for unknown listing fields: a bound or exact-match filter that
//! references a field the listing does not have rejects the listing.

use motorscout_core::{Condition, Listing};
use serde::{Deserialize, Serialize};

/// Sparse filter criteria. Every `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_mileage: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bike_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub van_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmission: Option<String>,
}

type Predicate = Box<dyn Fn(&Listing) -> bool + Send + Sync>;

/// The AND of one predicate per present filter key.
///
/// Stateless once built; reuse it across every listing of a search.
pub struct FilterPredicateSet {
    predicates: Vec<(&'static str, Predicate)>,
}

impl FilterPredicateSet {
    /// Compile `criteria` into a predicate set.
    #[must_use]
    pub fn build(criteria: &FilterCriteria) -> Self {
        let mut predicates: Vec<(&'static str, Predicate)> = Vec::new();

        if let Some(make) = facet_value(criteria.make.as_deref()) {
            predicates.push(("make", Box::new(move |l: &Listing| l.make == make)));
        }

        if let Some(condition) = criteria.condition {
            predicates.push((
                "condition",
                Box::new(move |l: &Listing| l.condition == Some(condition)),
            ));
        }

        if let Some(min) = criteria.min_price {
            predicates.push((
                "minPrice",
                Box::new(move |l: &Listing| l.price.is_some_and(|p| p >= min)),
            ));
        }
        if let Some(max) = criteria.max_price {
            predicates.push((
                "maxPrice",
                Box::new(move |l: &Listing| l.price.is_some_and(|p| p <= max)),
            ));
        }

        if let Some(min) = criteria.min_year {
            predicates.push((
                "minYear",
                Box::new(move |l: &Listing| l.year.is_some_and(|y| y >= min)),
            ));
        }
        if let Some(max) = criteria.max_year {
            predicates.push((
                "maxYear",
                Box::new(move |l: &Listing| l.year.is_some_and(|y| y <= max)),
            ));
        }

        if let Some(max) = criteria.max_mileage {
            predicates.push((
                "maxMileage",
                Box::new(move |l: &Listing| l.mileage.is_some_and(|m| m <= max)),
            ));
        }

        if let Some(wanted) = facet_value(criteria.bike_type.as_deref()) {
            predicates.push((
                "bikeType",
                Box::new(move |l: &Listing| l.bike_type.as_deref() == Some(wanted.as_str())),
            ));
        }
        if let Some(wanted) = facet_value(criteria.van_type.as_deref()) {
            predicates.push((
                "vanType",
                Box::new(move |l: &Listing| l.van_type.as_deref() == Some(wanted.as_str())),
            ));
        }
        if let Some(wanted) = facet_value(criteria.fuel_type.as_deref()) {
            predicates.push((
                "fuelType",
                Box::new(move |l: &Listing| l.fuel_type.as_deref() == Some(wanted.as_str())),
            ));
        }
        if let Some(wanted) = facet_value(criteria.transmission.as_deref()) {
            predicates.push((
                "transmission",
                Box::new(move |l: &Listing| {
                    l.transmission.as_deref() == Some(wanted.as_str())
                }),
            ));
        }

        Self { predicates }
    }

    /// `true` when `listing` satisfies every predicate.
    #[must_use]
    pub fn matches(&self, listing: &Listing) -> bool {
        self.predicates.iter().all(|(_, p)| p(listing))
    }

    /// Names of the active filter keys, in evaluation order.
    #[must_use]
    pub fn active_keys(&self) -> Vec<&'static str> {
        self.predicates.iter().map(|(key, _)| *key).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

/// A string facet value that actually constrains, or `None` for the
/// "All"/"Any" sentinels and blank input.
fn facet_value(raw: Option<&str>) -> Option<String> {
    let value = raw?;
    if value.trim().is_empty()
        || value.eq_ignore_ascii_case("all")
        || value.eq_ignore_ascii_case("any")
    {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
