//! Sort keys and the total order they induce over search candidates.
//!
//! Every ordering ends in an `id` comparison so equal inputs always produce
//! the same output order. Unknown values sort last in both directions.

use std::cmp::Ordering;

use motorscout_core::{Coordinate, Listing};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    Distance,
    PriceAsc,
    PriceDesc,
    MileageAsc,
    YearDesc,
    Newest,
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Distance => write!(f, "distance"),
            SortKey::PriceAsc => write!(f, "price-asc"),
            SortKey::PriceDesc => write!(f, "price-desc"),
            SortKey::MileageAsc => write!(f, "mileage-asc"),
            SortKey::YearDesc => write!(f, "year-desc"),
            SortKey::Newest => write!(f, "newest"),
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "distance" => Ok(SortKey::Distance),
            "price-asc" => Ok(SortKey::PriceAsc),
            "price-desc" => Ok(SortKey::PriceDesc),
            "mileage-asc" => Ok(SortKey::MileageAsc),
            "year-desc" => Ok(SortKey::YearDesc),
            "newest" => Ok(SortKey::Newest),
            other => Err(format!("unknown sort key '{other}'")),
        }
    }
}

/// A listing paired with its distance from the resolved search center.
#[derive(Debug, Clone, Copy)]
pub struct Scored<'a> {
    pub listing: &'a Listing,
    /// `None` when the search has no center or the listing has no coordinates.
    pub distance_miles: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Plan {
    Distance,
    PriceAsc,
    PriceDesc,
    MileageAsc,
    YearDesc,
    Newest,
    Identity,
}

/// Comparator for one search, resolved from the requested key and whether a
/// center is available.
#[derive(Debug, Clone, Copy)]
pub struct SortComparator {
    plan: Plan,
}

impl SortComparator {
    /// Resolve the ordering for `sort_key`.
    ///
    /// With no key, `distance` is used when a center exists and identity
    /// (`id` ascending) otherwise. `distance` without a center also falls
    /// back to identity.
    #[must_use]
    pub fn build(sort_key: Option<SortKey>, center: Option<Coordinate>) -> Self {
        let plan = match (sort_key, center) {
            (None | Some(SortKey::Distance), Some(_)) => Plan::Distance,
            (None | Some(SortKey::Distance), None) => Plan::Identity,
            (Some(SortKey::PriceAsc), _) => Plan::PriceAsc,
            (Some(SortKey::PriceDesc), _) => Plan::PriceDesc,
            (Some(SortKey::MileageAsc), _) => Plan::MileageAsc,
            (Some(SortKey::YearDesc), _) => Plan::YearDesc,
            (Some(SortKey::Newest), _) => Plan::Newest,
        };
        Self { plan }
    }

    /// The key actually applied, or `None` for identity order.
    #[must_use]
    pub fn effective_key(&self) -> Option<SortKey> {
        match self.plan {
            Plan::Distance => Some(SortKey::Distance),
            Plan::PriceAsc => Some(SortKey::PriceAsc),
            Plan::PriceDesc => Some(SortKey::PriceDesc),
            Plan::MileageAsc => Some(SortKey::MileageAsc),
            Plan::YearDesc => Some(SortKey::YearDesc),
            Plan::Newest => Some(SortKey::Newest),
            Plan::Identity => None,
        }
    }

    #[must_use]
    pub fn compare(&self, a: &Scored<'_>, b: &Scored<'_>) -> Ordering {
        let (la, lb) = (a.listing, b.listing);
        let primary = match self.plan {
            Plan::Distance => distance_order(a.distance_miles, b.distance_miles)
                .then_with(|| unknown_last(la.price, lb.price, false)),
            Plan::PriceAsc => unknown_last(la.price, lb.price, false),
            Plan::PriceDesc => unknown_last(la.price, lb.price, true),
            Plan::MileageAsc => unknown_last(la.mileage, lb.mileage, false),
            Plan::YearDesc => unknown_last(la.year, lb.year, true),
            Plan::Newest => unknown_last(la.listed_at, lb.listed_at, true),
            Plan::Identity => Ordering::Equal,
        };
        primary.then_with(|| la.id.cmp(&lb.id))
    }

    /// Sort `candidates` in place.
    pub fn sort(&self, candidates: &mut [Scored<'_>]) {
        candidates.sort_by(|a, b| self.compare(a, b));
    }
}

/// Order two optional values, placing `None` after every `Some` regardless
/// of `descending`.
fn unknown_last<T: Ord>(a: Option<T>, b: Option<T>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) if descending => y.cmp(&x),
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn distance_order(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
#[path = "sort_test.rs"]
mod tests;
