mod common;

use common::{approx, CATALOG};
use edgecalc::catalog::ResourceRole;
use edgecalc::{Catalog, CatalogError, ConfigurationDraft};

#[test]
fn test_builtin_option_sets() {
    assert_eq!(CATALOG.resources().len(), 12);
    assert_eq!(CATALOG.regions().len(), 4);
    assert_eq!(CATALOG.boot_disk_types().len(), 3);
    assert_eq!(CATALOG.provisioning_models().len(), 2);
    assert_eq!(CATALOG.operating_systems().len(), 5);
    assert_eq!(CATALOG.gpu_types().len(), 2);
    assert_eq!(CATALOG.instance_templates().len(), 5);
    assert_eq!(CATALOG.commitment_terms().len(), 5);
    assert_eq!(CATALOG.default_addons().len(), 2);
}

#[test]
fn test_builtin_resources_respect_bounds() {
    for def in CATALOG.resources() {
        assert!(def.min <= def.default_value && def.default_value <= def.max, "{}", def.id);
        assert!(def.step > 0, "{}", def.id);
        assert!(def.price_per_unit >= 0.0, "{}", def.id);
    }
}

#[test]
fn test_core_roles_are_unique() {
    for role in [ResourceRole::Compute, ResourceRole::Memory, ResourceRole::PrimaryStorage] {
        let count = CATALOG.resources().iter().filter(|d| d.role == role).count();
        assert_eq!(count, 1);
    }
    assert_eq!(CATALOG.resource_for_role(ResourceRole::PrimaryStorage).unwrap().id, "flashDisk");
}

#[test]
fn test_term_multipliers_carry_discount() {
    let yearly = CATALOG.find_commitment_term("yearly").unwrap();
    assert!(approx(yearly.price_multiplier, 10.8));
    assert!(approx(yearly.discount, 0.1));
    assert_eq!(yearly.suffix, "/yr");
}

#[test]
fn test_custom_catalog_from_file() {
    let mut file = CATALOG.to_file().clone();
    file.regions.retain(|r| r.id == "wp-eu-central-1");
    file.resources.iter_mut().for_each(|r| {
        if r.id == "cores" {
            r.price_per_unit = 12.0;
        }
    });

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, serde_json::to_string_pretty(&file).unwrap()).unwrap();

    let custom = Catalog::from_path(&path).unwrap();
    assert_eq!(custom.default_region().id, "wp-eu-central-1");

    let draft = ConfigurationDraft::new(&custom, 1);
    // (2 × 12 + 4 × 5 + 50 × 0.10) × 1.1
    assert!(approx(draft.unit_monthly_price(&custom), 49.0 * 1.1));
}

#[test]
fn test_custom_catalog_without_templates_is_rejected() {
    let mut file = CATALOG.to_file().clone();
    file.instance_templates.clear();
    let text = serde_json::to_string(&file).unwrap();
    assert!(matches!(
        Catalog::from_json(&text),
        Err(CatalogError::EmptyOptionSet("instance template"))
    ));
}

#[test]
fn test_custom_catalog_bad_json_is_parse_error() {
    assert!(matches!(Catalog::from_json("{\"regions\": 3}"), Err(CatalogError::Parse(_))));
}

#[test]
fn test_missing_catalog_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Catalog::from_path(&dir.path().join("absent.json")),
        Err(CatalogError::Io(_))
    ));
}

#[test]
fn test_resource_role_defaults_to_other_in_json() {
    let text = r#"{"id": "x", "label": "Thing", "unit": "u", "price_per_unit": 1.0,
                   "min": 0, "max": 5, "step": 1, "default_value": 0}"#;
    let def: edgecalc::catalog::ResourceDefinition = serde_json::from_str(text).unwrap();
    assert_eq!(def.role, ResourceRole::Other);
    assert_eq!(def.tooltip, "");
}
