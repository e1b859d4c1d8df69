mod common;

use common::{approx, CATALOG};
use edgecalc::{
    ConfigurationDraft, Estimate, EstimateError, FileStore, MemoryStore, NoticeLevel, ServiceType,
    SnapshotStore,
};

fn estimate() -> Estimate<MemoryStore> {
    Estimate::new(CATALOG.clone(), MemoryStore::new())
}

fn add_medium(est: &mut Estimate<MemoryStore>, name: &str, quantity: i64) -> String {
    let mut draft = est.new_draft();
    draft.set_name(name);
    draft.select_template(&CATALOG, "wp-gen-m1");
    draft.set_quantity(quantity);
    est.create(draft).id.clone()
}

#[test]
fn test_aggregate_sums_period_costs() {
    let mut est = estimate();
    add_medium(&mut est, "web", 2);
    add_medium(&mut est, "db", 1);
    let summary = est.aggregate();
    assert_eq!(summary.items.len(), 2);
    assert!(approx(summary.grand_total, 390.0));
}

#[test]
fn test_remove_excludes_from_items_and_total() {
    let mut est = estimate();
    let web = add_medium(&mut est, "web", 2);
    add_medium(&mut est, "db", 1);
    est.remove(&web);
    let summary = est.aggregate();
    assert_eq!(summary.items.len(), 1);
    assert_eq!(summary.items[0].name, "db");
    assert!(approx(summary.grand_total, 130.0));
}

#[test]
fn test_aggregate_reflects_latest_edit() {
    let mut est = estimate();
    let id = add_medium(&mut est, "web", 1);
    assert!(approx(est.aggregate().grand_total, 130.0));

    let mut draft = est.edit_draft(&id).unwrap();
    draft.set_quantity(4);
    est.update(&id, draft).unwrap();
    assert!(approx(est.aggregate().grand_total, 520.0));
}

#[test]
fn test_duplicate_is_independent() {
    let mut est = estimate();
    let id = add_medium(&mut est, "web", 1);
    let copy_id = est.duplicate(&id).unwrap().id.clone();

    assert_ne!(copy_id, id);
    assert_eq!(est.get(&copy_id).unwrap().name, "Copy of web");
    let summary = est.aggregate();
    assert!(approx(
        summary.items[0].total_cost_for_period,
        summary.items[1].total_cost_for_period
    ));

    let mut draft = est.edit_draft(&copy_id).unwrap();
    draft.set_service_type(&CATALOG, ServiceType::VirtualDataCenter);
    draft.set_resource(&CATALOG, "ram", 64);
    est.update(&copy_id, draft).unwrap();

    assert_eq!(est.get(&id).unwrap().resource_values["ram"], 16);
    assert_eq!(est.get(&copy_id).unwrap().resource_values["ram"], 64);
}

#[test]
fn test_duplicate_unknown_id_fails() {
    let mut est = estimate();
    assert!(matches!(est.duplicate("nope"), Err(EstimateError::NotFound(_))));
    assert!(est.is_empty());
}

#[test]
fn test_create_clamps_quantity() {
    let mut est = estimate();
    let mut draft = est.new_draft();
    draft.set_quantity(-5);
    assert_eq!(est.create(draft).quantity, 1);
}

#[test]
fn test_serialize_round_trip() {
    let mut est = estimate();
    add_medium(&mut est, "web, \"frontend\"", 3);

    let mut draft = est.new_draft();
    draft.set_service_type(&CATALOG, ServiceType::VirtualDataCenter);
    draft.set_resource(&CATALOG, "cores", 32);
    draft.set_resource(&CATALOG, "objectStorage", 2500);
    draft.set_region("wp-apac-tokyo-1");
    draft.set_commitment_term("3years");
    draft.set_provisioning_model("spot");
    draft.set_operating_system("wp-win-dc");
    draft.set_boot_disk_type("standard-hdd");
    draft.set_addon("enhanced-monitoring", true);
    draft.set_gpus_enabled(&CATALOG, true);
    draft.set_gpu_type(&CATALOG, "wp-gpu-a100");
    draft.set_gpu_count(&CATALOG, 2);
    draft.set_threads_per_core(1);
    draft.set_confidential_vm(true);
    draft.set_advanced_settings(true);
    est.create(draft);

    let text = est.serialize().unwrap();
    let decoded = est.deserialize(&text).unwrap();
    assert_eq!(decoded, est.configurations());
}

#[test]
fn test_save_then_load_restores_collection() {
    let mut est = estimate();
    add_medium(&mut est, "web", 2);
    assert_eq!(est.save().level, NoticeLevel::Success);
    let saved = est.configurations().to_vec();

    est.clear();
    assert!(est.is_empty());
    assert_eq!(est.load().message, "No saved estimate found.");

    let mut again = Estimate::new(CATALOG.clone(), MemoryStore::new());
    add_medium(&mut again, "web", 2);
    again.save();
    let text = again.store().contents().unwrap().to_string();

    let mut restored = Estimate::new(CATALOG.clone(), MemoryStore::with_contents(text));
    assert_eq!(restored.load().message, "Estimate loaded successfully!");
    assert_eq!(restored.len(), saved.len());
    assert!(approx(restored.aggregate().grand_total, 260.0));
}

#[test]
fn test_legacy_snapshot_loads_with_defaults() {
    let legacy = r#"[
        {
            "id": "config_1700000000000_abc",
            "name": "Old box",
            "serviceType": "instance",
            "resourceValues": {"cores": 4, "ram": 16, "flashDisk": 100},
            "quantity": 2,
            "duration": "yearly",
            "region": "wp-us-west-1"
        }
    ]"#;
    let mut est = Estimate::new(CATALOG.clone(), MemoryStore::with_contents(legacy));
    let notice = est.load();
    assert_eq!(notice.level, NoticeLevel::Success);

    let config = &est.configurations()[0];
    assert_eq!(config.operating_system_id, "wp-linux-std");
    assert_eq!(config.provisioning_model_id, "regular");
    assert_eq!(config.boot_disk_type_id, "balanced-ssd");
    assert_eq!(config.instance_template_id.as_deref(), Some("wp-gen-s1"));
    assert_eq!(config.threads_per_core, 2);
    assert!(!config.gpus_enabled);
    assert_eq!(config.gpu_count, 0);
    assert_eq!(config.addons.len(), 2);
    assert_eq!(config.resource_values["staticPublicIPs"], 0);

    // 130 × 1.05 × 2 × 10.8
    assert!(approx(est.aggregate().grand_total, 130.0 * 1.05 * 2.0 * 10.8));
}

#[test]
fn test_load_replaces_unsaved_work() {
    let mut est = Estimate::new(CATALOG.clone(), MemoryStore::with_contents("[]"));
    add_medium(&mut est, "scratch", 1);
    est.load();
    assert!(est.is_empty());
}

#[test]
fn test_clear_removes_snapshot() {
    let mut est = estimate();
    add_medium(&mut est, "web", 1);
    est.save();
    assert!(est.store().contents().is_some());
    let notice = est.clear();
    assert_eq!(notice.message, "Estimate cleared.");
    assert!(est.store().contents().is_none());
}

#[test]
fn test_export_csv_empty_is_none() {
    let est = estimate();
    assert!(est.export_csv().is_none());
}

#[test]
fn test_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("slot.json");

    let mut est = Estimate::new(CATALOG.clone(), FileStore::new(&path));
    let mut draft = est.new_draft();
    draft.set_name("persisted");
    est.create(draft);
    assert_eq!(est.save().level, NoticeLevel::Success);
    assert!(path.exists());

    let mut reopened = Estimate::new(CATALOG.clone(), FileStore::new(&path));
    reopened.load();
    assert_eq!(reopened.configurations(), est.configurations());

    assert_eq!(reopened.clear().level, NoticeLevel::Success);
    assert!(!path.exists());
    assert_eq!(FileStore::new(&path).load().unwrap(), None);
}

#[test]
fn test_file_store_corrupt_file_is_discarded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slot.json");
    std::fs::write(&path, "\"just a string\"").unwrap();

    let mut est = Estimate::new(CATALOG.clone(), FileStore::new(&path));
    let notice = est.load();
    assert!(notice.is_warning());
    assert!(!path.exists());
}

#[test]
fn test_new_draft_numbering_follows_collection() {
    let mut est = estimate();
    est.create(est.new_draft());
    let draft: ConfigurationDraft = est.new_draft();
    assert_eq!(draft.name(), "Configuration #2");
}

#[test]
fn test_unreadable_slot_survives_later_mutations() {
    let mut seeded = estimate();
    add_medium(&mut seeded, "one", 1);
    add_medium(&mut seeded, "two", 1);
    let stored = seeded.serialize().unwrap();

    let mut est = Estimate::new(CATALOG.clone(), MemoryStore::unreadable(stored.clone()));
    let notice = est.load();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(est.is_empty());

    add_medium(&mut est, "three", 1);
    assert_eq!(est.save().level, NoticeLevel::Error);
    assert_eq!(est.store().contents(), Some(stored.as_str()));
}

#[test]
fn test_corrupt_snapshot_keeps_unsaved_work() {
    let mut est = Estimate::new(CATALOG.clone(), MemoryStore::with_contents("42"));
    add_medium(&mut est, "draft", 1);
    let notice = est.load();
    assert_eq!(notice.message, "Could not load estimate: Invalid format.");
    assert_eq!(est.len(), 1);
    assert_eq!(est.store().contents(), None);
    assert_eq!(est.save().level, NoticeLevel::Success);
}

#[test]
fn test_update_with_draft_of_other_configuration_fails() {
    let mut est = estimate();
    let web = add_medium(&mut est, "web", 1);
    let db = add_medium(&mut est, "db", 1);
    let mut draft = est.edit_draft(&web).unwrap();
    draft.set_quantity(9);
    assert!(matches!(
        est.update(&db, draft),
        Err(EstimateError::DraftMismatch { .. })
    ));
    assert_eq!(est.get(&db).unwrap().quantity, 1);
}
