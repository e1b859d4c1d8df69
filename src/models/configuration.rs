use std::collections::BTreeMap;

use crate::catalog::{Addon, Catalog};

/// What a configuration provisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ServiceType {
    /// A single virtual machine, usually shaped by an instance template.
    #[default]
    Instance,
    /// A pool of resources the customer carves up freely.
    VirtualDataCenter,
}

impl ServiceType {
    /// Human-readable label shown in summaries and exports.
    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::Instance => "Instance",
            ServiceType::VirtualDataCenter => "Virtual Data Center",
        }
    }

    /// Parse from the string value stored in snapshots.
    pub fn from_str(s: &str) -> Option<ServiceType> {
        match s.trim().to_lowercase().as_str() {
            "instance" => Some(ServiceType::Instance),
            "vdc" | "virtual-data-center" => Some(ServiceType::VirtualDataCenter),
            _ => None,
        }
    }

    /// Serialise to the string value stored in snapshots.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Instance => "instance",
            ServiceType::VirtualDataCenter => "vdc",
        }
    }

    /// All service types, in display order.
    pub fn all() -> &'static [ServiceType] {
        &[ServiceType::Instance, ServiceType::VirtualDataCenter]
    }
}

/// One priced item of an estimate.
///
/// Configurations are plain values: cloning one yields a fully independent
/// copy, including its resource map and add-on list.
#[derive(Clone, Debug, PartialEq)]
pub struct Configuration {
    pub id: String,
    pub name: String,
    pub service_type: ServiceType,
    /// Chosen quantity per resource definition id.
    pub resource_values: BTreeMap<String, u32>,
    /// Every catalog add-on, selected or not.
    pub addons: Vec<Addon>,
    /// Number of identical units, at least 1.
    pub quantity: u32,
    pub region_id: String,
    pub commitment_term_id: String,
    pub operating_system_id: String,
    pub provisioning_model_id: String,
    /// Only meaningful for instances.
    pub instance_template_id: Option<String>,
    pub boot_disk_type_id: String,
    pub threads_per_core: u8,
    pub confidential_vm_enabled: bool,
    pub gpus_enabled: bool,
    pub gpu_type_id: Option<String>,
    pub gpu_count: u32,
    pub advanced_settings_enabled: bool,
}

impl Configuration {
    /// Quantity for a resource, or the definition's default when unset.
    pub fn resource_value(&self, catalog: &Catalog, resource_id: &str) -> u32 {
        self.resource_values
            .get(resource_id)
            .copied()
            .or_else(|| catalog.resource(resource_id).map(|d| d.default_value))
            .unwrap_or(0)
    }

    pub fn selected_addons(&self) -> impl Iterator<Item = &Addon> {
        self.addons.iter().filter(|a| a.selected)
    }

    /// GPU count that actually contributes to the price.
    pub fn effective_gpu_count(&self) -> u32 {
        if self.gpus_enabled && self.gpu_type_id.is_some() {
            self.gpu_count
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_type_roundtrip() {
        for st in ServiceType::all() {
            let parsed = ServiceType::from_str(st.as_str()).expect("should parse back");
            assert_eq!(st, &parsed);
        }
    }

    #[test]
    fn service_type_unknown_is_none() {
        assert!(ServiceType::from_str("mainframe").is_none());
    }

    #[test]
    fn service_type_labels() {
        assert_eq!(ServiceType::Instance.label(), "Instance");
        assert_eq!(ServiceType::VirtualDataCenter.label(), "Virtual Data Center");
    }
}
