use edgecalc::config;
use std::env;
use std::path::PathBuf;

#[test]
fn test_sanitize_slot_name_keeps_plain_names() {
    assert_eq!(config::sanitize_slot_name("team-q3_estimate"), "team-q3_estimate");
}

#[test]
fn test_sanitize_slot_name_strips_json_extension() {
    assert_eq!(config::sanitize_slot_name("budget.json"), "budget");
}

#[test]
fn test_sanitize_slot_name_drops_path_characters() {
    assert_eq!(config::sanitize_slot_name("../../etc/passwd"), "etcpasswd");
    assert_eq!(config::sanitize_slot_name("  my slot  "), "myslot");
}

#[test]
fn test_sanitize_slot_name_empty_uses_default() {
    assert_eq!(config::sanitize_slot_name(""), config::DEFAULT_SLOT);
    assert_eq!(config::sanitize_slot_name("   "), config::DEFAULT_SLOT);
    assert_eq!(config::sanitize_slot_name("///"), config::DEFAULT_SLOT);
}

#[test]
fn test_slot_and_data_dir_from_env() {
    env::set_var("EDGECALC_SLOT", "q4/plan.json");
    env::set_var("EDGECALC_DATA_DIR", "  /tmp/estimates  ");

    assert_eq!(config::get_slot_name(), "q4plan");
    assert_eq!(config::get_data_dir(), PathBuf::from("/tmp/estimates"));
    assert_eq!(
        config::snapshot_path(),
        PathBuf::from("/tmp/estimates").join("q4plan.json")
    );

    env::remove_var("EDGECALC_SLOT");
    env::remove_var("EDGECALC_DATA_DIR");

    assert_eq!(config::get_slot_name(), config::DEFAULT_SLOT);
    assert_eq!(config::get_data_dir(), PathBuf::from(config::DEFAULT_DATA_DIR));
}

#[test]
fn test_currency_symbol_defaults_to_dollar() {
    env::set_var("EDGECALC_CURRENCY", "€");
    assert_eq!(config::get_currency_symbol(), "€");

    env::set_var("EDGECALC_CURRENCY", "   ");
    assert_eq!(config::get_currency_symbol(), "$");

    env::remove_var("EDGECALC_CURRENCY");
    assert_eq!(config::get_currency_symbol(), "$");
}

#[test]
fn test_catalog_file_blank_is_none() {
    env::set_var("EDGECALC_CATALOG_FILE", " ");
    assert_eq!(config::get_catalog_file(), None);

    env::set_var("EDGECALC_CATALOG_FILE", "prices.json");
    assert_eq!(config::get_catalog_file(), Some(PathBuf::from("prices.json")));

    env::remove_var("EDGECALC_CATALOG_FILE");
    assert_eq!(config::get_catalog_file(), None);
}

#[test]
fn test_assume_yes_flag() {
    env::set_var("EDGECALC_ASSUME_YES", "yes");
    assert!(config::get_assume_yes());

    env::set_var("EDGECALC_ASSUME_YES", "0");
    assert!(!config::get_assume_yes());

    env::remove_var("EDGECALC_ASSUME_YES");
    assert!(!config::get_assume_yes());
}
