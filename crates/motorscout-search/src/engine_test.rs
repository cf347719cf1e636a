use std::sync::atomic::{AtomicUsize, Ordering};

use motorscout_core::{Coordinate, Environment, Listing};

use super::*;
use crate::filter::FilterCriteria;
use crate::sort::SortKey;
use crate::test_support::{bike, located, north_of, priced};

const CENTER: Coordinate = Coordinate {
    latitude: 51.5,
    longitude: -0.12,
};

#[derive(Debug, thiserror::Error)]
#[error("geocoder unavailable")]
struct Unavailable;

/// Returns a fixed answer and counts calls.
struct StubGeocoder {
    answer: Option<Coordinate>,
    fail: bool,
    calls: AtomicUsize,
}

impl StubGeocoder {
    fn resolving(answer: Coordinate) -> Self {
        Self {
            answer: Some(answer),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    fn not_found() -> Self {
        Self {
            answer: None,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            answer: None,
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Geocoder for StubGeocoder {
    type Error = Unavailable;

    async fn geocode(&self, _postcode: &str) -> Result<Option<Coordinate>, Self::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(Unavailable)
        } else {
            Ok(self.answer)
        }
    }
}

fn ids(page: &SearchPage) -> Vec<&str> {
    page.items.iter().map(|h| h.listing.id.as_str()).collect()
}

fn three_bikes() -> Vec<Listing> {
    vec![
        located("far-40", north_of(CENTER, 40.0)),
        located("near-5", north_of(CENTER, 5.0)),
        located("mid-20", north_of(CENTER, 20.0)),
    ]
}

#[tokio::test]
async fn basic_geo_search_applies_radius_and_distance_order() {
    let listings = three_bikes();
    let query = SearchQuery {
        center: Some(CENTER),
        radius_miles: Some(25.0),
        sort_key: Some(SortKey::Distance),
        ..SearchQuery::default()
    };
    let page = SearchEngine::default()
        .search(&listings, &query, &NoGeocoder)
        .await;

    assert_eq!(ids(&page), vec!["near-5", "mid-20"]);
    assert_eq!(page.total, 2);
    let first = page.items[0].distance_miles.unwrap();
    assert!((first - 5.0).abs() < 0.01, "got {first}");
}

#[tokio::test]
async fn radius_excludes_listing_at_thirty_miles() {
    let listings = vec![
        located("in", north_of(CENTER, 10.0)),
        located("out", north_of(CENTER, 30.0)),
    ];
    let query = SearchQuery {
        center: Some(CENTER),
        radius_miles: Some(25.0),
        ..SearchQuery::default()
    };
    let page = SearchEngine::default()
        .search(&listings, &query, &NoGeocoder)
        .await;
    assert_eq!(ids(&page), vec!["in"]);
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn radius_drops_listings_without_coordinates() {
    let listings = vec![located("in", north_of(CENTER, 1.0)), bike("nowhere", "Honda")];
    let query = SearchQuery {
        center: Some(CENTER),
        radius_miles: Some(100.0),
        ..SearchQuery::default()
    };
    let page = SearchEngine::default()
        .search(&listings, &query, &NoGeocoder)
        .await;
    assert_eq!(ids(&page), vec!["in"]);
}

#[tokio::test]
async fn postcode_is_geocoded_exactly_once() {
    let listings = three_bikes();
    let geocoder = StubGeocoder::resolving(CENTER);
    let query = SearchQuery {
        postcode: Some("sw1a 1aa".to_string()),
        radius_miles: Some(25.0),
        ..SearchQuery::default()
    };
    let page = SearchEngine::default()
        .search(&listings, &query, &geocoder)
        .await;

    assert_eq!(geocoder.calls(), 1);
    assert_eq!(page.center, Some(CENTER));
    assert_eq!(ids(&page), vec!["near-5", "mid-20"]);
}

#[tokio::test]
async fn explicit_center_skips_geocoder() {
    let listings = three_bikes();
    let geocoder = StubGeocoder::resolving(Coordinate::new(0.0, 0.0));
    let query = SearchQuery {
        center: Some(CENTER),
        postcode: Some("SW1A 1AA".to_string()),
        ..SearchQuery::default()
    };
    let page = SearchEngine::default()
        .search(&listings, &query, &geocoder)
        .await;
    assert_eq!(geocoder.calls(), 0);
    assert_eq!(page.center, Some(CENTER));
}

#[tokio::test]
async fn geocoding_failure_degrades_to_unqualified_browse() {
    let listings = three_bikes();
    let geo_query = SearchQuery {
        postcode: Some("SW1A 1AA".to_string()),
        radius_miles: Some(25.0),
        sort_key: Some(SortKey::Distance),
        ..SearchQuery::default()
    };
    let engine = SearchEngine::default();

    for geocoder in [StubGeocoder::failing(), StubGeocoder::not_found()] {
        let degraded = engine.search(&listings, &geo_query, &geocoder).await;
        let browse = engine
            .search(&listings, &SearchQuery::default(), &NoGeocoder)
            .await;
        assert_eq!(geocoder.calls(), 1);
        assert_eq!(degraded.center, None);
        assert_eq!(degraded.total, 3);
        assert_eq!(ids(&degraded), ids(&browse));
        assert_eq!(ids(&degraded), vec!["far-40", "mid-20", "near-5"]);
        assert!(degraded.items.iter().all(|h| h.distance_miles.is_none()));
    }
}

#[tokio::test]
async fn malformed_postcode_is_not_sent_to_geocoder() {
    let geocoder = StubGeocoder::resolving(CENTER);
    let query = SearchQuery {
        postcode: Some("not a postcode at all".to_string()),
        ..SearchQuery::default()
    };
    let page = SearchEngine::default()
        .search(&three_bikes(), &query, &geocoder)
        .await;
    assert_eq!(geocoder.calls(), 0);
    assert_eq!(page.total, 3);
}

#[tokio::test]
async fn out_of_range_explicit_center_falls_back_to_postcode() {
    let geocoder = StubGeocoder::resolving(CENTER);
    let query = SearchQuery {
        center: Some(Coordinate::new(200.0, 0.0)),
        postcode: Some("SW1A 1AA".to_string()),
        ..SearchQuery::default()
    };
    let page = SearchEngine::default()
        .search(&three_bikes(), &query, &geocoder)
        .await;
    assert_eq!(geocoder.calls(), 1);
    assert_eq!(page.center, Some(CENTER));
}

#[test]
fn pagination_returns_third_page_of_twenty_three() {
    let listings: Vec<Listing> = (0..23)
        .map(|i| priced(&format!("bk-{i:02}"), "Honda", 1_000 + i))
        .collect();
    let query = SearchQuery {
        sort_key: Some(SortKey::PriceAsc),
        page: 3,
        page_size: Some(10),
        ..SearchQuery::default()
    };
    let page = SearchEngine::default().search_resolved(&listings, &query, None);
    assert_eq!(page.total, 23);
    assert_eq!(page.page, 3);
    assert_eq!(page.page_size, 10);
    assert_eq!(ids(&page), vec!["bk-20", "bk-21", "bk-22"]);
}

#[test]
fn page_past_the_end_is_empty_but_reports_total() {
    let listings: Vec<Listing> = (0..5).map(|i| priced(&format!("bk-{i}"), "Honda", i)).collect();
    let query = SearchQuery {
        page: 4,
        page_size: Some(10),
        ..SearchQuery::default()
    };
    let page = SearchEngine::default().search_resolved(&listings, &query, None);
    assert!(page.items.is_empty());
    assert_eq!(page.total, 5);
}

#[test]
fn from_config_takes_page_limits() {
    let config = AppConfig {
        env: Environment::Test,
        log_level: "info".to_string(),
        default_page_size: 15,
        max_page_size: 40,
        geocoder_base_url: "https://api.postcodes.io".to_string(),
        geocoder_timeout_secs: 10,
        geocoder_user_agent: "motorscout-test".to_string(),
    };
    let engine = SearchEngine::from_config(&config);
    assert_eq!(
        engine.limits(),
        PageLimits {
            default_page_size: 15,
            max_page_size: 40,
        }
    );
    let page = engine.search_resolved(&[], &SearchQuery::default(), None);
    assert_eq!(page.page_size, 15);
}

#[test]
fn zero_page_and_oversized_page_size_are_clamped() {
    let listings: Vec<Listing> = (0..3).map(|i| priced(&format!("bk-{i}"), "Honda", i)).collect();
    let engine = SearchEngine::new(PageLimits {
        default_page_size: 2,
        max_page_size: 50,
    });

    let zero = SearchQuery {
        page: 0,
        page_size: Some(0),
        ..SearchQuery::default()
    };
    let page = engine.search_resolved(&listings, &zero, None);
    assert_eq!(page.page, 1);
    assert_eq!(page.page_size, 1);
    assert_eq!(page.items.len(), 1);

    let huge = SearchQuery {
        page_size: Some(10_000),
        ..SearchQuery::default()
    };
    assert_eq!(engine.search_resolved(&listings, &huge, None).page_size, 50);

    let default = engine.search_resolved(&listings, &SearchQuery::default(), None);
    assert_eq!(default.page_size, 2);
}

#[test]
fn filters_apply_after_radius_and_total_counts_matches() {
    let listings = vec![
        Listing {
            price: Some(12_000),
            ..located("honda-near", north_of(CENTER, 2.0))
        },
        Listing {
            price: Some(9_000),
            ..located("honda-cheap", north_of(CENTER, 3.0))
        },
        Listing {
            make: "Yamaha".to_string(),
            price: Some(15_000),
            ..located("yamaha", north_of(CENTER, 4.0))
        },
    ];
    let query = SearchQuery {
        radius_miles: Some(10.0),
        filters: FilterCriteria {
            min_price: Some(10_000),
            make: Some("Honda".to_string()),
            ..FilterCriteria::default()
        },
        ..SearchQuery::default()
    };
    let page = SearchEngine::default().search_resolved(&listings, &query, Some(CENTER));
    assert_eq!(ids(&page), vec!["honda-near"]);
    assert_eq!(page.total, 1);
    assert_eq!(page.facets.makes.get("Honda"), Some(&1));
    assert!(page.facets.makes.get("Yamaha").is_none());
}

#[test]
fn zero_matches_is_an_empty_page() {
    let query = SearchQuery {
        filters: FilterCriteria {
            make: Some("Bugatti".to_string()),
            ..FilterCriteria::default()
        },
        ..SearchQuery::default()
    };
    let page = SearchEngine::default().search_resolved(&three_bikes(), &query, Some(CENTER));
    assert_eq!(page.total, 0);
    assert!(page.items.is_empty());
}

#[test]
fn input_listings_are_not_modified() {
    let listings = three_bikes();
    let before = listings.clone();
    let query = SearchQuery {
        radius_miles: Some(25.0),
        ..SearchQuery::default()
    };
    let _ = SearchEngine::default().search_resolved(&listings, &query, Some(CENTER));
    assert_eq!(listings, before);
}

#[test]
fn page_serializes_with_flattened_listing_and_distance() {
    let listings = vec![located("bk-1", north_of(CENTER, 5.0))];
    let page =
        SearchEngine::default().search_resolved(&listings, &SearchQuery::default(), Some(CENTER));
    let value = serde_json::to_value(&page).unwrap();
    assert_eq!(value["items"][0]["id"], "bk-1");
    assert!(value["items"][0]["distanceMiles"].as_f64().is_some());
    assert_eq!(value["total"], 1);
    assert_eq!(value["pageSize"], 20);
}
