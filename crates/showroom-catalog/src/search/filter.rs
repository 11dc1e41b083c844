//! Filter predicates over normalized products.

use crate::catalog::Product;
use crate::search::Criteria;

/// Whether a product satisfies every active criterion.
pub fn matches(product: &Product, criteria: &Criteria) -> bool {
    matches_text(product, criteria.text_query.as_deref())
        && criteria
            .category
            .as_ref()
            .map_or(true, |category| product.category == *category)
        && criteria.year.map_or(true, |year| product.year == year)
        && matches_price(product, criteria.min_price, criteria.max_price)
        && criteria
            .transmission_type
            .as_deref()
            .map_or(true, |t| product.offers_transmission(t))
        && criteria
            .color
            .as_deref()
            .map_or(true, |color| product.has_color(color))
}

/// Keep the products that match, in their original order.
pub fn filter_all<I>(products: I, criteria: &Criteria) -> Vec<Product>
where
    I: IntoIterator<Item = Product>,
{
    products
        .into_iter()
        .filter(|product| matches(product, criteria))
        .collect()
}

fn matches_text(product: &Product, query: Option<&str>) -> bool {
    let Some(query) = query.filter(|q| !q.is_empty()) else {
        return true;
    };
    let needle = query.to_lowercase();
    product.model.to_lowercase().contains(&needle)
        || product.description.to_lowercase().contains(&needle)
}

/// Range semantics: a product matches when any of its tiers could fall
/// inside the bounds. Products without tiers never match a bound.
fn matches_price(product: &Product, min: Option<i64>, max: Option<i64>) -> bool {
    if min.is_none() && max.is_none() {
        return true;
    }
    let Some(range) = product.price_range() else {
        return false;
    };
    min.map_or(true, |floor| range.reaches(floor))
        && max.map_or(true, |ceiling| range.starts_within(ceiling))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;
    use crate::price::PriceTier;

    fn avanza() -> Product {
        let mut product = Product::new(ProductId::new(1), "All New Avanza");
        product.category = "MPV".into();
        product.year = 2024;
        product.description = "Mobil keluarga irit".into();
        product.colors = vec!["Putih".into(), "Hitam".into()];
        product.price_tiers = vec![
            PriceTier::new("Manual", 300_000_000),
            PriceTier::new("Automatic", 350_000_000),
        ];
        product
    }

    #[test]
    fn test_empty_criteria_matches_everything() {
        assert!(matches(&avanza(), &Criteria::new()));
        assert!(matches(&Product::new(ProductId::new(2), "Bare"), &Criteria::new()));
    }

    #[test]
    fn test_text_is_case_insensitive_over_model_and_description() {
        assert!(matches(&avanza(), &Criteria::new().with_text("AVANZA")));
        assert!(matches(&avanza(), &Criteria::new().with_text("keluarga")));
        assert!(!matches(&avanza(), &Criteria::new().with_text("fortuner")));
    }

    #[test]
    fn test_exact_fields() {
        assert!(matches(&avanza(), &Criteria::new().with_category("MPV")));
        assert!(!matches(&avanza(), &Criteria::new().with_category("mpv")));
        assert!(matches(&avanza(), &Criteria::new().with_year(2024)));
        assert!(!matches(&avanza(), &Criteria::new().with_year(2023)));
        assert!(matches(&avanza(), &Criteria::new().with_color("Hitam")));
        assert!(!matches(&avanza(), &Criteria::new().with_color("hitam")));
        assert!(matches(&avanza(), &Criteria::new().with_transmission("Automatic")));
        assert!(!matches(&avanza(), &Criteria::new().with_transmission("CVT")));
    }

    #[test]
    fn test_price_range_semantics() {
        let product = avanza();
        let min = |v| Criteria::new().with_price_range(Some(v), None);
        let max = |v| Criteria::new().with_price_range(None, Some(v));

        assert!(matches(&product, &min(320_000_000)));
        assert!(matches(&product, &min(350_000_000)));
        assert!(!matches(&product, &min(350_000_001)));
        assert!(matches(&product, &max(310_000_000)));
        assert!(matches(&product, &max(300_000_000)));
        assert!(!matches(&product, &max(299_999_999)));
        // Both bounds inside the span.
        assert!(matches(
            &product,
            &Criteria::new().with_price_range(Some(310_000_000), Some(340_000_000))
        ));
    }

    #[test]
    fn test_no_tiers_never_matches_price_bound() {
        let bare = Product::new(ProductId::new(9), "Bare");
        assert!(!matches(&bare, &Criteria::new().with_price_range(Some(0), None)));
        assert!(!matches(&bare, &Criteria::new().with_price_range(None, Some(i64::MAX))));
    }

    #[test]
    fn test_filter_all_preserves_order() {
        let mut other = avanza();
        other.id = ProductId::new(7);
        other.category = "SUV".into();
        let mut third = avanza();
        third.id = ProductId::new(3);

        let kept = filter_all(vec![avanza(), other, third], &Criteria::new().with_category("MPV"));
        let ids: Vec<i64> = kept.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
