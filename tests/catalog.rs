use shrink_advisor::catalog;
use std::collections::HashSet;

#[test]
fn get_round_trips_every_profile() {
    for p in catalog::all() {
        let found = catalog::get(p.name).expect("known name resolves");
        assert_eq!(found.name, p.name);
        assert_eq!(found.dpi_tier, p.dpi_tier);
        assert_eq!(found.estimated_compression, p.estimated_compression);
    }
}

#[test]
fn unknown_name_is_not_found() {
    let err = catalog::get("no-such-profile").unwrap_err();
    assert!(err.to_string().contains("no-such-profile"));
}

#[test]
fn names_are_unique_and_order_is_stable() {
    let first: Vec<&str> = catalog::all().iter().map(|p| p.name).collect();
    let second: Vec<&str> = catalog::all().iter().map(|p| p.name).collect();
    assert_eq!(first, second);

    let unique: HashSet<&str> = first.iter().copied().collect();
    assert_eq!(unique.len(), first.len());
}

#[test]
fn catalog_shape() {
    let all = catalog::all();
    assert!(all.len() >= 10 && all.len() <= 15);
    assert!(all.iter().any(|p| p.legacy));
    assert!(all.iter().any(|p| p.archive));
    assert_eq!(all.iter().filter(|p| p.safe_default).count(), 1);

    for p in all {
        assert!(p.estimated_compression.low_pct < p.estimated_compression.high_pct);
        assert!(p.estimated_compression.high_pct <= 100);
    }
}
