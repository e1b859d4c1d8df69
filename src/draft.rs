//! Editor working state for a configuration.
//!
//! A draft exists only while a configuration is being edited. Committing it
//! through [`crate::estimate::Estimate::create`] or `update` turns it into a
//! [`Configuration`]; dropping it discards the edit without touching the
//! estimate.
//!
//! Field interdependencies are explicit rules on the setters:
//!
//! * selecting an instance template (or switching to the instance service type)
//!   overwrites compute, memory and primary storage with the template's shape
//!   and resets the OS and boot-disk type to the template defaults; an unknown
//!   template id falls back to the first template;
//! * while an instance has a template, the three core resources are locked;
//! * toggling GPUs resets the GPU count, and changing the GPU type re-clamps the
//!   count to that type's maximum;
//! * numeric input is clamped to the resource bounds, never rejected.

use std::collections::BTreeMap;

use crate::catalog::{Addon, Catalog, InstanceTemplate, ResourceRole};
use crate::models::{Configuration, ServiceType};
use crate::pricing::{compute_unit_monthly_price, PriceInputs};
use crate::utils::parse_clamped;

const DEFAULT_THREADS_PER_CORE: u8 = 2;

#[derive(Clone, Debug, PartialEq)]
pub struct ConfigurationDraft {
    editing_id: Option<String>,
    name: String,
    service_type: ServiceType,
    resource_values: BTreeMap<String, u32>,
    addons: Vec<Addon>,
    quantity: u32,
    region_id: String,
    commitment_term_id: String,
    operating_system_id: String,
    provisioning_model_id: String,
    instance_template_id: Option<String>,
    boot_disk_type_id: String,
    threads_per_core: u8,
    confidential_vm_enabled: bool,
    gpus_enabled: bool,
    gpu_type_id: Option<String>,
    gpu_count: u32,
    advanced_settings_enabled: bool,
}

/// Every resource at its catalog default.
pub fn default_resource_values(catalog: &Catalog) -> BTreeMap<String, u32> {
    catalog
        .resources()
        .iter()
        .map(|d| (d.id.clone(), d.default_value))
        .collect()
}

impl ConfigurationDraft {
    /// Fresh draft for the `ordinal`-th configuration of an estimate.
    pub fn new(catalog: &Catalog, ordinal: usize) -> Self {
        let template = catalog.default_instance_template();
        let mut draft = Self {
            editing_id: None,
            name: format!("Configuration #{}", ordinal),
            service_type: ServiceType::Instance,
            resource_values: default_resource_values(catalog),
            addons: catalog.default_addons(),
            quantity: 1,
            region_id: catalog.default_region().id.clone(),
            commitment_term_id: catalog.default_commitment_term().id.clone(),
            operating_system_id: template.default_os_id.clone(),
            provisioning_model_id: catalog.default_provisioning_model().id.clone(),
            instance_template_id: Some(template.id.clone()),
            boot_disk_type_id: template.default_boot_disk_type_id.clone(),
            threads_per_core: DEFAULT_THREADS_PER_CORE,
            confidential_vm_enabled: false,
            gpus_enabled: false,
            gpu_type_id: Some(catalog.default_gpu_type().id.clone()),
            gpu_count: 0,
            advanced_settings_enabled: false,
        };
        draft.apply_template(catalog, template);
        draft
    }

    /// Draft that edits an existing configuration in place.
    pub fn edit(config: &Configuration) -> Self {
        Self {
            editing_id: Some(config.id.clone()),
            ..Self::copy_of(config)
        }
    }

    /// Draft for a new configuration pre-filled from an existing one.
    pub fn duplicate(config: &Configuration) -> Self {
        let mut draft = Self::copy_of(config);
        draft.name = format!("Copy of {}", config.name);
        draft
    }

    fn copy_of(config: &Configuration) -> Self {
        Self {
            editing_id: None,
            name: config.name.clone(),
            service_type: config.service_type,
            resource_values: config.resource_values.clone(),
            addons: config.addons.clone(),
            quantity: config.quantity,
            region_id: config.region_id.clone(),
            commitment_term_id: config.commitment_term_id.clone(),
            operating_system_id: config.operating_system_id.clone(),
            provisioning_model_id: config.provisioning_model_id.clone(),
            instance_template_id: config.instance_template_id.clone(),
            boot_disk_type_id: config.boot_disk_type_id.clone(),
            threads_per_core: config.threads_per_core,
            confidential_vm_enabled: config.confidential_vm_enabled,
            gpus_enabled: config.gpus_enabled,
            gpu_type_id: config.gpu_type_id.clone(),
            gpu_count: config.gpu_count,
            advanced_settings_enabled: config.advanced_settings_enabled,
        }
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn service_type(&self) -> ServiceType {
        self.service_type
    }

    pub fn resource_values(&self) -> &BTreeMap<String, u32> {
        &self.resource_values
    }

    pub fn resource_value(&self, id: &str) -> Option<u32> {
        self.resource_values.get(id).copied()
    }

    pub fn addons(&self) -> &[Addon] {
        &self.addons
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn region_id(&self) -> &str {
        &self.region_id
    }

    pub fn commitment_term_id(&self) -> &str {
        &self.commitment_term_id
    }

    pub fn operating_system_id(&self) -> &str {
        &self.operating_system_id
    }

    pub fn provisioning_model_id(&self) -> &str {
        &self.provisioning_model_id
    }

    pub fn instance_template_id(&self) -> Option<&str> {
        self.instance_template_id.as_deref()
    }

    pub fn boot_disk_type_id(&self) -> &str {
        &self.boot_disk_type_id
    }

    pub fn threads_per_core(&self) -> u8 {
        self.threads_per_core
    }

    pub fn confidential_vm_enabled(&self) -> bool {
        self.confidential_vm_enabled
    }

    pub fn gpus_enabled(&self) -> bool {
        self.gpus_enabled
    }

    pub fn gpu_type_id(&self) -> Option<&str> {
        self.gpu_type_id.as_deref()
    }

    pub fn gpu_count(&self) -> u32 {
        self.gpu_count
    }

    pub fn advanced_settings_enabled(&self) -> bool {
        self.advanced_settings_enabled
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_service_type(&mut self, catalog: &Catalog, service_type: ServiceType) {
        self.service_type = service_type;
        if service_type == ServiceType::Instance {
            let requested = self.instance_template_id.clone().unwrap_or_default();
            self.select_template(catalog, &requested);
        }
    }

    /// Select an instance template and let it drive the core resources.
    ///
    /// Returns false when the id was unknown and the first template was used.
    /// Has no effect on the resources of a virtual data center.
    pub fn select_template(&mut self, catalog: &Catalog, template_id: &str) -> bool {
        let template = catalog.instance_template_or_default(template_id);
        let found = template.id == template_id;
        if !found {
            tracing::debug!(template_id, fallback = %template.id, "Unknown instance template; using default");
        }
        self.instance_template_id = Some(template.id.clone());
        if self.service_type == ServiceType::Instance {
            self.apply_template(catalog, template);
        }
        found
    }

    fn apply_template(&mut self, catalog: &Catalog, template: &InstanceTemplate) {
        let shape = [
            (ResourceRole::Compute, template.cores),
            (ResourceRole::Memory, template.ram),
            (ResourceRole::PrimaryStorage, template.flash_disk),
        ];
        for (role, value) in shape {
            if let Some(def) = catalog.resource_for_role(role) {
                self.resource_values
                    .insert(def.id.clone(), def.clamp(i64::from(value)));
            }
        }
        self.operating_system_id = template.default_os_id.clone();
        self.boot_disk_type_id = template.default_boot_disk_type_id.clone();
        tracing::debug!(template = %template.id, "Applied instance template");
    }

    /// Core resources of a templated instance are driven by the template.
    pub fn is_resource_locked(&self, catalog: &Catalog, resource_id: &str) -> bool {
        self.service_type == ServiceType::Instance
            && self.instance_template_id.is_some()
            && catalog
                .resource(resource_id)
                .map(|d| d.role.is_core())
                .unwrap_or(false)
    }

    /// Set a resource quantity, clamped to its bounds.
    ///
    /// Returns the resulting value, or `None` for an unknown resource id.
    /// Locked core resources keep their template value.
    pub fn set_resource(&mut self, catalog: &Catalog, resource_id: &str, value: i64) -> Option<u32> {
        let def = catalog.resource(resource_id)?;
        if self.is_resource_locked(catalog, resource_id) {
            tracing::debug!(resource_id, "Resource is driven by the instance template");
            return self.resource_values.get(resource_id).copied();
        }
        let clamped = def.clamp(value);
        self.resource_values.insert(def.id.clone(), clamped);
        Some(clamped)
    }

    /// Set a resource from raw text input (non-numeric reads as the minimum).
    pub fn set_resource_input(&mut self, catalog: &Catalog, resource_id: &str, raw: &str) -> Option<u32> {
        let def = catalog.resource(resource_id)?;
        let value = def.parse_input(raw);
        self.set_resource(catalog, resource_id, i64::from(value))
    }

    /// Move a resource one step up or down, staying within bounds.
    pub fn step_resource(&mut self, catalog: &Catalog, resource_id: &str, up: bool) -> Option<u32> {
        let def = catalog.resource(resource_id)?;
        let current = self
            .resource_values
            .get(resource_id)
            .copied()
            .unwrap_or(def.default_value);
        let next = if up { def.step_up(current) } else { def.step_down(current) };
        self.set_resource(catalog, resource_id, i64::from(next))
    }

    pub fn set_quantity(&mut self, quantity: i64) {
        self.quantity = quantity.clamp(1, i64::from(u32::MAX)) as u32;
    }

    pub fn set_quantity_input(&mut self, raw: &str) {
        self.quantity = parse_clamped(raw, 1, u32::MAX);
    }

    pub fn set_region(&mut self, region_id: impl Into<String>) {
        self.region_id = region_id.into();
    }

    pub fn set_commitment_term(&mut self, term_id: impl Into<String>) {
        self.commitment_term_id = term_id.into();
    }

    pub fn set_operating_system(&mut self, os_id: impl Into<String>) {
        self.operating_system_id = os_id.into();
    }

    pub fn set_provisioning_model(&mut self, model_id: impl Into<String>) {
        self.provisioning_model_id = model_id.into();
    }

    pub fn set_boot_disk_type(&mut self, disk_id: impl Into<String>) {
        self.boot_disk_type_id = disk_id.into();
    }

    /// Flip an add-on; false if the draft has no add-on with this id.
    pub fn toggle_addon(&mut self, addon_id: &str) -> bool {
        match self.addons.iter_mut().find(|a| a.id == addon_id) {
            Some(addon) => {
                addon.selected = !addon.selected;
                true
            }
            None => false,
        }
    }

    pub fn set_addon(&mut self, addon_id: &str, selected: bool) -> bool {
        match self.addons.iter_mut().find(|a| a.id == addon_id) {
            Some(addon) => {
                addon.selected = selected;
                true
            }
            None => false,
        }
    }

    pub fn set_gpus_enabled(&mut self, catalog: &Catalog, enabled: bool) {
        if self.gpus_enabled != enabled {
            self.gpu_count = 0;
        }
        self.gpus_enabled = enabled;
        if enabled && self.gpu_type_id.is_none() {
            self.gpu_type_id = Some(catalog.default_gpu_type().id.clone());
        }
    }

    pub fn set_gpu_type(&mut self, catalog: &Catalog, gpu_type_id: &str) {
        let gpu = catalog.gpu_type_or_default(gpu_type_id);
        self.gpu_type_id = Some(gpu.id.clone());
        self.gpu_count = self.gpu_count.min(gpu.max_count);
    }

    /// Set the GPU count, clamped to `[0, max_count]` of the selected type.
    pub fn set_gpu_count(&mut self, catalog: &Catalog, count: i64) -> u32 {
        let max = self
            .gpu_type_id
            .as_deref()
            .map(|id| catalog.gpu_type_or_default(id).max_count)
            .unwrap_or(catalog.default_gpu_type().max_count);
        self.gpu_count = count.clamp(0, i64::from(max)) as u32;
        self.gpu_count
    }

    /// Whether the selected GPU suits the selected template's series.
    ///
    /// `None` when GPUs are off or the draft is not a templated instance.
    pub fn gpu_compatible(&self, catalog: &Catalog) -> Option<bool> {
        if !self.gpus_enabled || self.service_type != ServiceType::Instance {
            return None;
        }
        let template = catalog.find_instance_template(self.instance_template_id.as_deref()?)?;
        let gpu = catalog.gpu_type_or_default(self.gpu_type_id.as_deref()?);
        Some(gpu.is_compatible_with(&template.series))
    }

    pub fn set_threads_per_core(&mut self, threads: u8) {
        self.threads_per_core = threads.clamp(1, 2);
    }

    pub fn set_confidential_vm(&mut self, enabled: bool) {
        self.confidential_vm_enabled = enabled;
    }

    pub fn set_advanced_settings(&mut self, enabled: bool) {
        self.advanced_settings_enabled = enabled;
    }

    pub fn price_inputs(&self) -> PriceInputs<'_> {
        PriceInputs {
            resource_values: &self.resource_values,
            addons: &self.addons,
            region_id: &self.region_id,
            provisioning_model_id: &self.provisioning_model_id,
            operating_system_id: &self.operating_system_id,
            boot_disk_type_id: &self.boot_disk_type_id,
            gpus_enabled: self.gpus_enabled,
            gpu_type_id: self.gpu_type_id.as_deref(),
            gpu_count: Some(self.gpu_count),
        }
    }

    /// Live unit price of the draft as currently edited.
    pub fn unit_monthly_price(&self, catalog: &Catalog) -> f64 {
        compute_unit_monthly_price(catalog, &self.price_inputs())
    }

    /// Commit the draft under `id`. An empty name becomes `fallback_name`.
    pub fn into_configuration(self, id: String, fallback_name: String) -> Configuration {
        let name = if self.name.trim().is_empty() {
            fallback_name
        } else {
            self.name
        };
        let is_instance = self.service_type == ServiceType::Instance;
        Configuration {
            id,
            name,
            service_type: self.service_type,
            resource_values: self.resource_values,
            addons: self.addons,
            quantity: self.quantity.max(1),
            region_id: self.region_id,
            commitment_term_id: self.commitment_term_id,
            operating_system_id: self.operating_system_id,
            provisioning_model_id: self.provisioning_model_id,
            instance_template_id: if is_instance { self.instance_template_id } else { None },
            boot_disk_type_id: self.boot_disk_type_id,
            threads_per_core: self.threads_per_core,
            confidential_vm_enabled: self.confidential_vm_enabled,
            gpu_type_id: if self.gpus_enabled { self.gpu_type_id } else { None },
            gpu_count: if self.gpus_enabled { self.gpu_count } else { 0 },
            gpus_enabled: self.gpus_enabled,
            advanced_settings_enabled: self.advanced_settings_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_draft_uses_first_template() {
        let catalog = Catalog::builtin();
        let draft = ConfigurationDraft::new(&catalog, 3);
        assert_eq!(draft.name(), "Configuration #3");
        assert_eq!(draft.instance_template_id(), Some("wp-gen-s1"));
        assert_eq!(draft.resource_value("cores"), Some(2));
        assert_eq!(draft.resource_value("ram"), Some(4));
        assert_eq!(draft.resource_value("flashDisk"), Some(50));
        assert_eq!(draft.resource_values().len(), catalog.resources().len());
        assert_eq!(draft.quantity(), 1);
    }

    #[test]
    fn template_overwrites_core_resources_os_and_disk() {
        let catalog = Catalog::builtin();
        let mut draft = ConfigurationDraft::new(&catalog, 1);
        draft.set_operating_system("wp-win-std");
        assert!(draft.select_template(&catalog, "wp-comp-c1"));
        assert_eq!(draft.resource_value("cores"), Some(4));
        assert_eq!(draft.resource_value("ram"), Some(8));
        assert_eq!(draft.resource_value("flashDisk"), Some(80));
        assert_eq!(draft.operating_system_id(), "wp-linux-std");
        assert_eq!(draft.boot_disk_type_id(), "performance-ssd");
    }

    #[test]
    fn unknown_template_falls_back_to_first() {
        let catalog = Catalog::builtin();
        let mut draft = ConfigurationDraft::new(&catalog, 1);
        draft.select_template(&catalog, "wp-gen-l1");
        assert!(!draft.select_template(&catalog, "wp-gone-x9"));
        assert_eq!(draft.instance_template_id(), Some("wp-gen-s1"));
        assert_eq!(draft.resource_value("cores"), Some(2));
    }

    #[test]
    fn core_resources_locked_for_templated_instance() {
        let catalog = Catalog::builtin();
        let mut draft = ConfigurationDraft::new(&catalog, 1);
        assert_eq!(draft.set_resource(&catalog, "cores", 64), Some(2));
        assert_eq!(draft.set_resource(&catalog, "staticPublicIPs", 3), Some(3));

        draft.set_service_type(&catalog, ServiceType::VirtualDataCenter);
        assert_eq!(draft.set_resource(&catalog, "cores", 64), Some(64));
    }

    #[test]
    fn switching_back_to_instance_reapplies_template() {
        let catalog = Catalog::builtin();
        let mut draft = ConfigurationDraft::new(&catalog, 1);
        draft.set_service_type(&catalog, ServiceType::VirtualDataCenter);
        draft.set_resource(&catalog, "ram", 256);
        draft.set_service_type(&catalog, ServiceType::Instance);
        assert_eq!(draft.resource_value("ram"), Some(4));
    }

    #[test]
    fn resource_input_is_clamped() {
        let catalog = Catalog::builtin();
        let mut draft = ConfigurationDraft::new(&catalog, 1);
        assert_eq!(draft.set_resource_input(&catalog, "staticPublicIPs", "500"), Some(64));
        assert_eq!(draft.set_resource_input(&catalog, "staticPublicIPs", "many"), Some(0));
        assert_eq!(draft.set_resource(&catalog, "nope", 1), None);
    }

    #[test]
    fn stepping_respects_step_size() {
        let catalog = Catalog::builtin();
        let mut draft = ConfigurationDraft::new(&catalog, 1);
        assert_eq!(draft.step_resource(&catalog, "objectStorage", true), Some(100));
        assert_eq!(draft.step_resource(&catalog, "objectStorage", false), Some(0));
        assert_eq!(draft.step_resource(&catalog, "objectStorage", false), Some(0));
    }

    #[test]
    fn quantity_never_below_one() {
        let catalog = Catalog::builtin();
        let mut draft = ConfigurationDraft::new(&catalog, 1);
        draft.set_quantity(0);
        assert_eq!(draft.quantity(), 1);
        draft.set_quantity_input("abc");
        assert_eq!(draft.quantity(), 1);
        draft.set_quantity_input("5");
        assert_eq!(draft.quantity(), 5);
    }

    #[test]
    fn gpu_toggle_resets_count_and_type_clamps() {
        let catalog = Catalog::builtin();
        let mut draft = ConfigurationDraft::new(&catalog, 1);
        draft.set_gpus_enabled(&catalog, true);
        assert_eq!(draft.set_gpu_count(&catalog, 20), 8);
        draft.set_gpu_type(&catalog, "wp-gpu-a100");
        assert_eq!(draft.gpu_count(), 7);
        draft.set_gpus_enabled(&catalog, false);
        assert_eq!(draft.gpu_count(), 0);
    }

    #[test]
    fn gpu_compatibility_follows_series() {
        let catalog = Catalog::builtin();
        let mut draft = ConfigurationDraft::new(&catalog, 1);
        assert_eq!(draft.gpu_compatible(&catalog), None);
        draft.set_gpus_enabled(&catalog, true);
        assert_eq!(draft.gpu_compatible(&catalog), Some(true));
        draft.set_gpu_type(&catalog, "wp-gpu-a100");
        assert_eq!(draft.gpu_compatible(&catalog), Some(false));
    }

    #[test]
    fn commit_drops_disabled_gpu_and_vdc_template() {
        let catalog = Catalog::builtin();
        let mut draft = ConfigurationDraft::new(&catalog, 1);
        draft.set_service_type(&catalog, ServiceType::VirtualDataCenter);
        let config = draft.into_configuration("config_1".into(), "fallback".into());
        assert_eq!(config.instance_template_id, None);
        assert_eq!(config.gpu_type_id, None);
        assert_eq!(config.gpu_count, 0);
        assert_eq!(config.name, "Configuration #1");
    }

    #[test]
    fn empty_name_uses_fallback() {
        let catalog = Catalog::builtin();
        let mut draft = ConfigurationDraft::new(&catalog, 1);
        draft.set_name("   ");
        let config = draft.into_configuration("config_1".into(), "Configuration 4".into());
        assert_eq!(config.name, "Configuration 4");
    }

    #[test]
    fn duplicate_prefixes_name() {
        let catalog = Catalog::builtin();
        let config = ConfigurationDraft::new(&catalog, 1)
            .into_configuration("config_1".into(), String::new());
        let dup = ConfigurationDraft::duplicate(&config);
        assert_eq!(dup.name(), "Copy of Configuration #1");
        assert_eq!(dup.editing_id(), None);
        assert_eq!(ConfigurationDraft::edit(&config).editing_id(), Some("config_1"));
    }
}
