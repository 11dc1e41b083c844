//! End-to-end behaviour of the catalog listing over mixed record shapes.

use serde_json::{json, Value};
use showroom_catalog::prelude::*;

fn raw(value: Value) -> RawProduct {
    RawProduct::from_json(value).unwrap()
}

/// A catalog mixing the canonical shape with both legacy price shapes.
fn catalog() -> Vec<RawProduct> {
    vec![
        raw(json!({
            "id": 1,
            "model": "All New Avanza",
            "year": 2024,
            "colors": ["Putih", "Hitam", "Silver", "Merah"],
            "priceTiers": [
                {"transmissionType": "Manual", "price": 300000000},
                {"transmissionType": "Automatic", "price": 350000000}
            ],
            "category": "MPV",
            "description": "Mobil keluarga",
            "stock": 15
        })),
        raw(json!({
            "id": 2,
            "model": "Fortuner",
            "tahun": 2024,
            "warna": "Abu-abu",
            "transmisi_harga": [{"type": "Automatic", "harga": 550000000}],
            "bahan_bakar": "Diesel",
            "jenis": "SUV",
            "stok": 8
        })),
        raw(json!({
            "id": 3,
            "name": "Calya",
            "tahun": "2023",
            "warna": ["Putih"],
            "transmisi": "Manual",
            "harga": 160000000,
            "jenis": "LCGC"
        })),
        raw(json!({
            "id": 4,
            "model": "Raize",
            "jenis": "SUV",
            "warna": ["Merah"]
        })),
    ]
}

fn ids(listing: &Listing) -> Vec<i64> {
    listing.items.iter().map(|p| p.id.get()).collect()
}

fn listing_for(pairs: &[(&str, &str)]) -> Listing {
    let criteria = Criteria::from_pairs(pairs.iter().copied()).unwrap();
    build_listing(&catalog(), &criteria)
}

#[test]
fn normalize_is_idempotent_on_canonical_records() {
    for record in catalog() {
        let once = normalize(&record).unwrap();
        let twice = normalize(&RawProduct::from(&once)).unwrap();
        assert_eq!(once, twice);
    }
}

#[test]
fn legacy_list_with_flat_price_becomes_one_tier_per_transmission() {
    let product = normalize(&raw(json!({
        "id": 10,
        "transmissionTypes": ["Manual", "Automatic"],
        "price": 300000000
    })))
    .unwrap();

    assert_eq!(
        product.price_tiers,
        vec![
            PriceTier::new("Manual", 300_000_000),
            PriceTier::new("Automatic", 300_000_000),
        ]
    );
}

#[test]
fn scalar_colors_are_wrapped() {
    let product = normalize(&raw(json!({"id": 11, "colors": "Red"}))).unwrap();
    assert_eq!(product.colors, vec!["Red"]);
}

#[test]
fn price_bounds_use_the_tier_range() {
    let product = normalize(&catalog()[0]).unwrap();

    let min = Criteria::new().with_price_range(Some(320_000_000), None);
    let max = Criteria::new().with_price_range(None, Some(310_000_000));
    let below = Criteria::new().with_price_range(None, Some(299_999_999));

    assert!(matches(&product, &min));
    assert!(matches(&product, &max));
    assert!(!matches(&product, &below));
}

#[test]
fn products_without_tiers_are_excluded_by_any_price_bound() {
    assert!(!ids(&listing_for(&[])).is_empty());
    assert!(!ids(&listing_for(&[("minPrice", "0")])).contains(&4));
    assert!(!ids(&listing_for(&[("hargaMax", "9999999999")])).contains(&4));
}

#[test]
fn listing_is_ordered_by_descending_id() {
    let records = vec![
        raw(json!({"id": 5})),
        raw(json!({"id": 2})),
        raw(json!({"id": 8})),
        raw(json!({"id": 1})),
    ];
    let listing = build_listing(&records, &Criteria::new());
    assert_eq!(ids(&listing), vec![8, 5, 2, 1]);
}

#[test]
fn facets_cover_the_whole_catalog() {
    let all = listing_for(&[]);
    let filtered = listing_for(&[("jenis", "LCGC")]);

    assert_eq!(ids(&filtered), vec![3]);
    assert_eq!(filtered.facets, all.facets);
    assert_eq!(all.facets.categories, vec!["MPV", "SUV", "LCGC"]);
    assert_eq!(
        all.facets.colors,
        vec!["Putih", "Hitam", "Silver", "Merah", "Abu-abu"]
    );
}

#[test]
fn criteria_compose_with_and() {
    assert_eq!(ids(&listing_for(&[("jenis", "SUV")])), vec![4, 2]);
    assert_eq!(ids(&listing_for(&[("jenis", "SUV"), ("transmisi", "Automatic")])), vec![2]);
    assert_eq!(
        ids(&listing_for(&[("warna", "Putih"), ("transmisi", "Manual")])),
        vec![3, 1]
    );
    assert_eq!(
        ids(&listing_for(&[("warna", "Putih"), ("tahun", "2024"), ("maxPrice", "200000000")])),
        Vec::<i64>::new()
    );
}

#[test]
fn text_query_searches_model_and_description() {
    assert_eq!(ids(&listing_for(&[("q", "KELUARGA")])), vec![1]);
    assert_eq!(ids(&listing_for(&[("search", "calya")])), vec![3]);
}

#[test]
fn invalid_criteria_are_rejected_before_filtering() {
    let result = Criteria::from_pairs([("minPrice", "seratus")]);
    assert!(matches!(
        result,
        Err(CatalogError::InvalidCriteria { field: "minPrice", .. })
    ));
}

#[test]
fn scope_is_applied_before_listing() {
    let mut records = catalog();
    records.push(raw(json!({"id": 9, "merk": "Honda", "model": "Brio"})));
    records.push(raw(json!({"id": 10, "kondisi": "Bekas", "model": "Old Avanza"})));

    let scope = BusinessScope::default();
    let scoped: Vec<&RawProduct> = records.iter().filter(|r| scope.admits(r)).collect();
    let listing = build_listing(scoped, &Criteria::new());

    assert_eq!(ids(&listing), vec![4, 3, 2, 1]);
}

#[test]
fn price_range_presentation() {
    let avanza = normalize(&catalog()[0]).unwrap();
    let fortuner = normalize(&catalog()[1]).unwrap();

    assert_eq!(
        avanza.price_range().unwrap().to_string(),
        "Rp 300.000.000 - Rp 350.000.000"
    );
    assert_eq!(fortuner.price_range().unwrap().to_string(), "Rp 550.000.000");
    assert_eq!(normalize(&catalog()[3]).unwrap().price_range(), None);
}
