//! Listing builders shared by the unit test modules.

use motorscout_core::{Category, Condition, Coordinate, Listing};

pub(crate) fn bike(id: &str, make: &str) -> Listing {
    Listing {
        id: id.to_string(),
        category: Category::Bike,
        make: make.to_string(),
        model: String::new(),
        condition: Some(Condition::Used),
        price: None,
        year: None,
        mileage: None,
        engine_size_or_cc: None,
        bike_type: None,
        van_type: None,
        fuel_type: None,
        transmission: None,
        postcode: String::new(),
        coordinates: None,
        listed_at: None,
    }
}

pub(crate) fn priced(id: &str, make: &str, price: u32) -> Listing {
    Listing {
        price: Some(price),
        ..bike(id, make)
    }
}

pub(crate) fn located(id: &str, coordinates: Coordinate) -> Listing {
    Listing {
        coordinates: Some(coordinates),
        ..bike(id, "Honda")
    }
}

/// A point `miles` due north of `origin`, using the mean miles-per-degree of latitude.
pub(crate) fn north_of(origin: Coordinate, miles: f64) -> Coordinate {
    let degrees = miles / (crate::geo::EARTH_RADIUS_MILES.to_radians());
    Coordinate::new(origin.latitude + degrees, origin.longitude)
}
