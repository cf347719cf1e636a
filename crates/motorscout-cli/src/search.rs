//! `search` command handler.
//!
//! Flags are collected as raw strings and fed through
//! [`SearchRequest::from_query_pairs`], so the CLI drops malformed values the
//! same way a query string would.

use std::path::PathBuf;

use clap::Args;
use motorscout_core::AppConfig;
use motorscout_geocode::PostcodesIoClient;
use motorscout_search::{NoGeocoder, SearchEngine, SearchPage, SearchQuery, SearchRequest};

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// JSON array of listings to search
    #[arg(long)]
    pub listings: PathBuf,
    /// UK postcode to search around (geocoded via postcodes.io)
    #[arg(long)]
    pub postcode: Option<String>,
    /// Center latitude; takes precedence over --postcode when paired with --lon
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<String>,
    /// Center longitude
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<String>,
    /// Maximum distance from the center in miles
    #[arg(long)]
    pub radius: Option<String>,
    #[arg(long)]
    pub make: Option<String>,
    /// new, used, or all
    #[arg(long)]
    pub condition: Option<String>,
    #[arg(long)]
    pub min_price: Option<String>,
    #[arg(long)]
    pub max_price: Option<String>,
    #[arg(long)]
    pub min_year: Option<String>,
    #[arg(long)]
    pub max_year: Option<String>,
    #[arg(long)]
    pub max_mileage: Option<String>,
    #[arg(long)]
    pub bike_type: Option<String>,
    #[arg(long)]
    pub van_type: Option<String>,
    #[arg(long)]
    pub fuel_type: Option<String>,
    #[arg(long)]
    pub transmission: Option<String>,
    /// distance, price-asc, price-desc, mileage-asc, year-desc or newest
    #[arg(long)]
    pub sort: Option<String>,
    #[arg(long)]
    pub page: Option<String>,
    #[arg(long)]
    pub page_size: Option<String>,
}

impl SearchArgs {
    /// Pair each supplied flag with its request key.
    fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("postcode", &self.postcode),
            ("lat", &self.lat),
            ("lon", &self.lon),
            ("radiusMiles", &self.radius),
            ("make", &self.make),
            ("condition", &self.condition),
            ("minPrice", &self.min_price),
            ("maxPrice", &self.max_price),
            ("minYear", &self.min_year),
            ("maxYear", &self.max_year),
            ("maxMileage", &self.max_mileage),
            ("bikeType", &self.bike_type),
            ("vanType", &self.van_type),
            ("fuelType", &self.fuel_type),
            ("transmission", &self.transmission),
            ("sortKey", &self.sort),
            ("page", &self.page),
            ("pageSize", &self.page_size),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .collect()
    }

    pub(crate) fn to_query(&self) -> SearchQuery {
        SearchRequest::from_query_pairs(self.query_pairs()).into_query()
    }
}

/// Run one search and print the page as pretty JSON on stdout.
///
/// The postcodes.io client is only built when the query needs a postcode
/// geocoded.
///
/// # Errors
///
/// Returns an error if the listings file cannot be loaded, the geocoder
/// client cannot be built, or the page cannot be serialized.
pub(crate) async fn run_search(config: &AppConfig, args: &SearchArgs) -> anyhow::Result<()> {
    let listings = motorscout_core::load_listings(&args.listings)?;
    let query = args.to_query();
    let engine = SearchEngine::from_config(config);

    tracing::info!(
        listings = listings.len(),
        path = %args.listings.display(),
        "loaded listings snapshot"
    );

    let page: SearchPage = if query.center.is_none() && query.postcode.is_some() {
        let geocoder = PostcodesIoClient::from_config(config)?;
        engine.search(&listings, &query, &geocoder).await
    } else {
        engine.search(&listings, &query, &NoGeocoder).await
    };

    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}
