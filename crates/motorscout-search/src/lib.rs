pub mod engine;
pub mod facets;
pub mod filter;
pub mod geo;
pub mod request;
pub mod sort;

pub use engine::{Geocoder, NoGeocoder, PageLimits, SearchEngine, SearchHit, SearchPage};
pub use facets::{FacetSummary, ValueRange};
pub use filter::{FilterCriteria, FilterPredicateSet};
pub use geo::{distance_miles, EARTH_RADIUS_MILES};
pub use request::{RawFilters, SearchQuery, SearchRequest};
pub use sort::{Scored, SortComparator, SortKey};

#[cfg(test)]
pub(crate) mod test_support;
