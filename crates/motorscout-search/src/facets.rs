//! Aggregates over the filtered result set, backing the facet sidebar.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::sort::Scored;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValueRange<T> {
    pub min: T,
    pub max: T,
}

impl<T: Copy + Ord> ValueRange<T> {
    fn widen(range: Option<Self>, value: T) -> Option<Self> {
        Some(match range {
            Some(r) => Self {
                min: r.min.min(value),
                max: r.max.max(value),
            },
            None => Self {
                min: value,
                max: value,
            },
        })
    }
}

/// Counts and ranges over every listing that survived radius and filters.
///
/// Unknown prices and years are left out of the ranges rather than counted as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetSummary {
    pub makes: BTreeMap<String, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<ValueRange<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<ValueRange<u16>>,
}

#[must_use]
pub fn summarize(candidates: &[Scored<'_>]) -> FacetSummary {
    candidates
        .iter()
        .fold(FacetSummary::default(), |mut summary, candidate| {
            let listing = candidate.listing;
            *summary.makes.entry(listing.make.clone()).or_insert(0) += 1;
            if let Some(price) = listing.price {
                summary.price = ValueRange::widen(summary.price, price);
            }
            if let Some(year) = listing.year {
                summary.year = ValueRange::widen(summary.year, year);
            }
            summary
        })
}
