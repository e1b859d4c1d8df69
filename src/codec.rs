//! Snapshot encoding for a collection of configurations.
//!
//! The snapshot is a JSON array of camelCase records. Decoding is tolerant:
//! every field is optional and a missing or mistyped one is back-filled from
//! the catalog, so snapshots written before a field existed keep loading.
//! Only a payload that is not an array at all is rejected.

use std::collections::{BTreeMap, HashSet};

use serde_json::{json, Map, Value};

use crate::catalog::{Addon, Catalog};
use crate::draft::default_resource_values;
use crate::error::EstimateError;
use crate::models::{Configuration, ServiceType};
use crate::utils::generate_id;

const UNNAMED_CONFIGURATION: &str = "Unnamed Configuration";
const DEFAULT_THREADS_PER_CORE: u8 = 2;

fn encode_addon(addon: &Addon) -> Value {
    json!({
        "id": addon.id,
        "name": addon.name,
        "priceMonthly": addon.price_monthly,
        "selected": addon.selected,
    })
}

fn encode_configuration(config: &Configuration) -> Value {
    json!({
        "id": config.id,
        "name": config.name,
        "serviceType": config.service_type.as_str(),
        "resourceValues": config.resource_values,
        "addons": config.addons.iter().map(encode_addon).collect::<Vec<_>>(),
        "quantity": config.quantity,
        "duration": config.commitment_term_id,
        "region": config.region_id,
        "operatingSystemId": config.operating_system_id,
        "provisioningModel": config.provisioning_model_id,
        "instanceTemplateId": config.instance_template_id,
        "bootDiskTypeId": config.boot_disk_type_id,
        "threadsPerCore": config.threads_per_core,
        "confidentialVmEnabled": config.confidential_vm_enabled,
        "gpusEnabled": config.gpus_enabled,
        "gpuTypeId": config.gpu_type_id,
        "gpuCount": config.gpu_count,
        "advancedSettingsEnabled": config.advanced_settings_enabled,
    })
}

/// Encode the collection as a pretty-printed JSON array.
pub fn serialize(configurations: &[Configuration]) -> Result<String, EstimateError> {
    let arr: Vec<Value> = configurations.iter().map(encode_configuration).collect();
    Ok(serde_json::to_string_pretty(&Value::Array(arr))?)
}

/// Decode a snapshot, back-filling every missing field.
///
/// Ids are kept when present and unique; missing or repeated ids are
/// regenerated so the returned collection never holds two entries with the
/// same id.
pub fn deserialize(catalog: &Catalog, text: &str) -> Result<Vec<Configuration>, EstimateError> {
    let value: Value = serde_json::from_str(text).map_err(EstimateError::MalformedSnapshot)?;
    let entries = value
        .as_array()
        .ok_or_else(|| EstimateError::CorruptSnapshot("Invalid format.".to_string()))?;

    let mut seen = HashSet::new();
    let mut configurations = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let Some(record) = entry.as_object() else {
            tracing::warn!(index, "Skipping snapshot entry that is not an object");
            continue;
        };
        let mut config = decode_configuration(catalog, record);
        if !seen.insert(config.id.clone()) {
            let fresh = unique_id(&seen);
            tracing::warn!(duplicate = %config.id, id = %fresh, "Regenerated repeated configuration id");
            config.id = fresh;
            seen.insert(config.id.clone());
        }
        configurations.push(config);
    }
    Ok(configurations)
}

fn unique_id(taken: &HashSet<String>) -> String {
    loop {
        let id = generate_id();
        if !taken.contains(&id) {
            return id;
        }
    }
}

fn str_field(record: &Map<String, Value>, key: &str) -> Option<String> {
    record
        .get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn bool_field(record: &Map<String, Value>, key: &str) -> bool {
    record.get(key).and_then(|v| v.as_bool()).unwrap_or(false)
}

/// Non-negative integer field; fractional numbers are truncated.
fn count_field(value: Option<&Value>) -> Option<u32> {
    let v = value?;
    if let Some(n) = v.as_u64() {
        return Some(n.min(u64::from(u32::MAX)) as u32);
    }
    v.as_f64()
        .filter(|f| f.is_finite() && *f >= 0.0)
        .map(|f| f.trunc().min(f64::from(u32::MAX)) as u32)
}

fn decode_resource_values(catalog: &Catalog, value: Option<&Value>) -> BTreeMap<String, u32> {
    let mut values = default_resource_values(catalog);
    let Some(stored) = value.and_then(|v| v.as_object()) else {
        return values;
    };
    for (id, raw) in stored {
        match (catalog.resource(id), count_field(Some(raw))) {
            (Some(def), Some(n)) => {
                values.insert(id.clone(), def.clamp(i64::from(n)));
            }
            (None, _) => tracing::debug!(resource = %id, "Dropping value for unknown resource"),
            (Some(_), None) => tracing::debug!(resource = %id, "Ignoring non-numeric resource value"),
        }
    }
    values
}

fn decode_addon(record: &Map<String, Value>) -> Option<Addon> {
    let id = str_field(record, "id")?;
    Some(Addon {
        name: str_field(record, "name").unwrap_or_else(|| id.clone()),
        price_monthly: record
            .get("priceMonthly")
            .and_then(|v| v.as_f64())
            .filter(|p| p.is_finite() && *p >= 0.0)
            .unwrap_or(0.0),
        selected: bool_field(record, "selected"),
        id,
    })
}

/// Catalog add-ons in catalog order carrying their stored selection, followed
/// by any stored add-on the catalog no longer lists.
fn decode_addons(catalog: &Catalog, value: Option<&Value>) -> Vec<Addon> {
    let mut addons = catalog.default_addons();
    let Some(stored) = value.and_then(|v| v.as_array()) else {
        return addons;
    };
    for addon in stored.iter().filter_map(|v| v.as_object()).filter_map(decode_addon) {
        match addons.iter_mut().find(|a| a.id == addon.id) {
            Some(existing) => *existing = addon,
            None => addons.push(addon),
        }
    }
    addons
}

fn decode_configuration(catalog: &Catalog, record: &Map<String, Value>) -> Configuration {
    let service_type = str_field(record, "serviceType")
        .and_then(|s| ServiceType::from_str(&s))
        .unwrap_or_default();
    let gpus_enabled = bool_field(record, "gpusEnabled");

    let instance_template_id = match service_type {
        ServiceType::Instance => Some(
            str_field(record, "instanceTemplateId")
                .unwrap_or_else(|| catalog.default_instance_template().id.clone()),
        ),
        ServiceType::VirtualDataCenter => None,
    };

    let gpu_type_id = str_field(record, "gpuTypeId").or_else(|| {
        gpus_enabled.then(|| catalog.default_gpu_type().id.clone())
    });
    let gpu_max = gpu_type_id
        .as_deref()
        .map(|id| catalog.gpu_type_or_default(id).max_count)
        .unwrap_or(u32::MAX);

    let threads_per_core = match count_field(record.get("threadsPerCore")) {
        Some(1) => 1,
        _ => DEFAULT_THREADS_PER_CORE,
    };

    Configuration {
        id: str_field(record, "id").unwrap_or_else(generate_id),
        name: str_field(record, "name").unwrap_or_else(|| UNNAMED_CONFIGURATION.to_string()),
        service_type,
        resource_values: decode_resource_values(catalog, record.get("resourceValues")),
        addons: decode_addons(catalog, record.get("addons")),
        quantity: count_field(record.get("quantity")).unwrap_or(1).max(1),
        region_id: str_field(record, "region")
            .unwrap_or_else(|| catalog.default_region().id.clone()),
        commitment_term_id: str_field(record, "duration")
            .unwrap_or_else(|| catalog.default_commitment_term().id.clone()),
        operating_system_id: str_field(record, "operatingSystemId")
            .unwrap_or_else(|| catalog.default_operating_system().id.clone()),
        provisioning_model_id: str_field(record, "provisioningModel")
            .unwrap_or_else(|| catalog.default_provisioning_model().id.clone()),
        instance_template_id,
        boot_disk_type_id: str_field(record, "bootDiskTypeId")
            .unwrap_or_else(|| catalog.default_boot_disk_type().id.clone()),
        threads_per_core,
        confidential_vm_enabled: bool_field(record, "confidentialVmEnabled"),
        gpus_enabled,
        gpu_type_id,
        gpu_count: count_field(record.get("gpuCount")).unwrap_or(0).min(gpu_max),
        advanced_settings_enabled: bool_field(record, "advancedSettingsEnabled"),
    }
}
