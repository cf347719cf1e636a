use motorscout_core::Listing;

use super::*;
use crate::test_support::{bike, priced};

fn criteria() -> FilterCriteria {
    FilterCriteria::default()
}

#[test]
fn empty_criteria_matches_everything() {
    let set = FilterPredicateSet::build(&criteria());
    assert!(set.is_empty());
    assert!(set.matches(&bike("a", "Honda")));
}

#[test]
fn min_price_and_make_are_conjunctive() {
    let set = FilterPredicateSet::build(&FilterCriteria {
        min_price: Some(10_000),
        make: Some("Honda".to_string()),
        ..criteria()
    });
    assert!(!set.matches(&priced("a", "Honda", 9_000)));
    assert!(set.matches(&priced("b", "Honda", 12_000)));
    assert!(!set.matches(&priced("c", "Yamaha", 12_000)));
}

#[test]
fn price_bounds_are_inclusive() {
    let set = FilterPredicateSet::build(&FilterCriteria {
        min_price: Some(5_000),
        max_price: Some(8_000),
        ..criteria()
    });
    assert!(set.matches(&priced("lo", "Honda", 5_000)));
    assert!(set.matches(&priced("hi", "Honda", 8_000)));
    assert!(!set.matches(&priced("over", "Honda", 8_001)));
}

#[test]
fn unknown_price_fails_any_price_bound() {
    let max_only = FilterPredicateSet::build(&FilterCriteria {
        max_price: Some(1_000_000),
        ..criteria()
    });
    assert!(!max_only.matches(&bike("a", "Honda")));
}

#[test]
fn make_match_is_case_sensitive() {
    let set = FilterPredicateSet::build(&FilterCriteria {
        make: Some("Honda".to_string()),
        ..criteria()
    });
    assert!(!set.matches(&bike("a", "honda")));
}

#[test]
fn all_and_any_sentinels_do_not_constrain() {
    for sentinel in ["All", "Any", "all", ""] {
        let set = FilterPredicateSet::build(&FilterCriteria {
            make: Some(sentinel.to_string()),
            bike_type: Some(sentinel.to_string()),
            ..criteria()
        });
        assert!(set.is_empty(), "sentinel {sentinel:?} produced predicates");
        assert!(set.matches(&bike("a", "Ducati")));
    }
}

#[test]
fn year_bounds_reject_unknown_year() {
    let set = FilterPredicateSet::build(&FilterCriteria {
        min_year: Some(2015),
        max_year: Some(2020),
        ..criteria()
    });
    let in_range = Listing {
        year: Some(2015),
        ..bike("a", "Honda")
    };
    let too_new = Listing {
        year: Some(2021),
        ..bike("b", "Honda")
    };
    assert!(set.matches(&in_range));
    assert!(!set.matches(&too_new));
    assert!(!set.matches(&bike("c", "Honda")));
}

#[test]
fn max_mileage_is_inclusive_and_rejects_unknown() {
    let set = FilterPredicateSet::build(&FilterCriteria {
        max_mileage: Some(10_000),
        ..criteria()
    });
    let exact = Listing {
        mileage: Some(10_000),
        ..bike("a", "Honda")
    };
    assert!(set.matches(&exact));
    assert!(!set.matches(&bike("b", "Honda")));
}

#[test]
fn exact_facets_reject_missing_fields() {
    let set = FilterPredicateSet::build(&FilterCriteria {
        fuel_type: Some("Electric".to_string()),
        ..criteria()
    });
    let electric = Listing {
        fuel_type: Some("Electric".to_string()),
        ..bike("a", "Zero")
    };
    assert!(set.matches(&electric));
    assert!(!set.matches(&bike("b", "Zero")));
}

#[test]
fn condition_filter_requires_known_condition() {
    let set = FilterPredicateSet::build(&FilterCriteria {
        condition: Some(Condition::New),
        ..criteria()
    });
    let unknown = Listing {
        condition: None,
        ..bike("a", "Honda")
    };
    let new = Listing {
        condition: Some(Condition::New),
        ..bike("b", "Honda")
    };
    assert!(!set.matches(&unknown));
    assert!(set.matches(&new));
    assert!(!set.matches(&bike("c", "Honda")));
}

#[test]
fn active_keys_report_evaluation_order() {
    let set = FilterPredicateSet::build(&FilterCriteria {
        transmission: Some("Manual".to_string()),
        make: Some("Ford".to_string()),
        max_mileage: Some(50_000),
        ..criteria()
    });
    assert_eq!(set.active_keys(), vec!["make", "maxMileage", "transmission"]);
}
