mod common;

use common::{approx, CATALOG};
use edgecalc::catalog::{Catalog, CatalogFile};
use edgecalc::posta::{builtin_plans, item_total, PostaQuote, POSTA_TERMS};

#[test]
fn test_builtin_plans() {
    let plans = builtin_plans();
    let prices: Vec<f64> = plans.iter().map(|p| p.base_price_monthly).collect();
    assert_eq!(prices, vec![5.0, 10.0, 15.0, 25.0]);
    assert!(plans.iter().all(|p| p.default_addons.len() == 1 && !p.default_addons[0].selected));
    assert_eq!(plans[3].features.len(), 9);
}

#[test]
fn test_standard_yearly_with_rules_engine() {
    let mut quote = PostaQuote::default();
    quote.set_quantity("posta-standard", 3);
    quote.set_term("posta-standard", "yearly");
    quote.set_addon("posta-standard", "rules", true);

    // (10 + 2) × 3 × 10.8
    assert!(approx(quote.grand_total(), 388.8));
}

#[test]
fn test_zero_quantity_costs_nothing_and_is_hidden() {
    let mut quote = PostaQuote::default();
    quote.set_addon("posta-premium", "rules", true);
    assert_eq!(item_total(quote.subscription("posta-premium").unwrap()), 0.0);

    quote.set_quantity("posta-basic", 10);
    let summary = quote.summary();
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].name, "Posta Basic");
    assert_eq!(summary[0].billing_cycle, "Monthly");
    assert!(approx(summary[0].total, 50.0));
}

#[test]
fn test_terms_and_mixed_plans() {
    let mut quote = PostaQuote::default();
    quote.set_quantity("posta-basic", 4);
    quote.set_term("posta-basic", "3months");
    quote.set_quantity("posta-enterprise", 1);
    quote.set_term("posta-enterprise", "6months");

    // 5 × 4 × 3 + 25 × 1 × 6
    assert!(approx(quote.grand_total(), 60.0 + 150.0));
}

#[test]
fn test_mail_terms_ignore_custom_catalog_multipliers() {
    let mut data: CatalogFile = CATALOG.to_file().clone();
    for term in &mut data.commitment_terms {
        term.price_multiplier *= 2.0;
    }
    let custom = Catalog::new(data).unwrap();
    assert!(custom.commitment_term_or_default("yearly").price_multiplier > 20.0);

    let mut quote = PostaQuote::default();
    quote.set_quantity("posta-basic", 1);
    quote.set_term("posta-basic", "yearly");
    assert!(approx(quote.grand_total(), 5.0 * 10.8));
    let ids: Vec<&str> = POSTA_TERMS.iter().map(|t| t.id).collect();
    assert_eq!(ids, ["monthly", "yearly", "3months", "6months"]);
}
