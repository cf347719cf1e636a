//! Search orchestration: center resolution, radius cutoff, filters, sort,
//! pagination.
//!
//! Only center resolution suspends (one geocoder call at most); everything
//! after it is pure over the borrowed listing snapshot.

use async_trait::async_trait;
use motorscout_core::{normalize_postcode, AppConfig, Coordinate, Listing};
use serde::Serialize;

use crate::facets::{summarize, FacetSummary};
use crate::filter::FilterPredicateSet;
use crate::geo::distance_miles;
use crate::request::SearchQuery;
use crate::sort::{Scored, SortComparator};

/// Resolves a normalised postcode to coordinates.
///
/// `Ok(None)` means the postcode is unknown to the service. Both that and
/// `Err` degrade the search to "no location" rather than failing it.
#[async_trait]
pub trait Geocoder: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn geocode(&self, postcode: &str) -> Result<Option<Coordinate>, Self::Error>;
}

/// Geocoder for callers that only ever search with an explicit center.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeocoder;

#[async_trait]
impl Geocoder for NoGeocoder {
    type Error = std::convert::Infallible;

    async fn geocode(&self, _postcode: &str) -> Result<Option<Coordinate>, Self::Error> {
        Ok(None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

impl PageLimits {
    /// Clamp a requested page size into `1..=max_page_size`.
    #[must_use]
    pub fn page_size(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_page_size)
            .clamp(1, self.max_page_size.max(1))
    }
}

/// One result row: the listing plus its distance from the resolved center.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    #[serde(flatten)]
    pub listing: Listing,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_miles: Option<f64>,
}

/// The materialised result page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub items: Vec<SearchHit>,
    /// Matches after radius and filters, before pagination.
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<Coordinate>,
    pub facets: FacetSummary,
}

#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    limits: PageLimits,
}

impl SearchEngine {
    #[must_use]
    pub fn new(limits: PageLimits) -> Self {
        Self { limits }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(PageLimits {
            default_page_size: config.default_page_size,
            max_page_size: config.max_page_size,
        })
    }

    #[must_use]
    pub fn limits(&self) -> PageLimits {
        self.limits
    }

    /// Run one search over `listings`.
    ///
    /// Never fails: geocoding problems and empty results are reported
    /// through the returned page, not as errors. `listings` is not modified.
    pub async fn search<G>(
        &self,
        listings: &[Listing],
        query: &SearchQuery,
        geocoder: &G,
    ) -> SearchPage
    where
        G: Geocoder + ?Sized,
    {
        let center = resolve_center(query, geocoder).await;
        self.search_resolved(listings, query, center)
    }

    /// Steps after center resolution. Pure given the same inputs.
    #[must_use]
    pub fn search_resolved(
        &self,
        listings: &[Listing],
        query: &SearchQuery,
        center: Option<Coordinate>,
    ) -> SearchPage {
        let annotated = listings.iter().map(|listing| Scored {
            listing,
            distance_miles: center
                .zip(listing.coordinates)
                .map(|(from, to)| distance_miles(from, to)),
        });

        let radius = center.and(query.radius_miles);
        let mut within: Vec<Scored<'_>> = annotated
            .filter(|c| radius.is_none_or(|r| c.distance_miles.is_some_and(|d| d <= r)))
            .collect();
        let within_radius = within.len();

        let predicates = FilterPredicateSet::build(&query.filters);
        within.retain(|c| predicates.matches(c.listing));

        let comparator = SortComparator::build(query.sort_key, center);
        comparator.sort(&mut within);

        let total = within.len();
        let page = query.page.max(1);
        let page_size = self.limits.page_size(query.page_size);
        let start = (page - 1).saturating_mul(page_size);

        let items = within
            .iter()
            .skip(start)
            .take(page_size)
            .map(|c| SearchHit {
                listing: c.listing.clone(),
                distance_miles: c.distance_miles,
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            listings = listings.len(),
            within_radius,
            filters = ?predicates.active_keys(),
            sort = ?comparator.effective_key(),
            total,
            page,
            page_size,
            returned = items.len(),
            "search complete"
        );

        SearchPage {
            items,
            total,
            page,
            page_size,
            center,
            facets: summarize(&within),
        }
    }
}

async fn resolve_center<G>(query: &SearchQuery, geocoder: &G) -> Option<Coordinate>
where
    G: Geocoder + ?Sized,
{
    if let Some(center) = query.center {
        if center.is_valid() {
            return Some(center);
        }
        tracing::warn!(
            latitude = center.latitude,
            longitude = center.longitude,
            "ignoring out-of-range search center"
        );
    }

    let raw = query.postcode.as_deref()?;
    let Some(postcode) = normalize_postcode(raw) else {
        tracing::warn!(postcode = raw, "postcode is not well-formed; searching without location");
        return None;
    };

    match geocoder.geocode(&postcode).await {
        Ok(Some(center)) if center.is_valid() => Some(center),
        Ok(Some(center)) => {
            tracing::warn!(
                %postcode,
                latitude = center.latitude,
                longitude = center.longitude,
                "geocoder returned out-of-range coordinates; searching without location"
            );
            None
        }
        Ok(None) => {
            tracing::warn!(%postcode, "postcode not found; searching without location");
            None
        }
        Err(e) => {
            tracing::warn!(%postcode, error = %e, "geocoding failed; searching without location");
            None
        }
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
