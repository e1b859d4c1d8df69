use serde::{Deserialize, Serialize};

/// Region; its multiplier applies to every resource line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub name: String,
    pub price_multiplier: f64,
}

/// Boot-disk type; its multiplier applies to the primary storage line only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootDiskType {
    pub id: String,
    pub name: String,
    pub price_per_gb_multiplier: f64,
}

/// On-demand vs. spot pricing; its multiplier applies to the whole unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvisioningModel {
    pub id: String,
    pub name: String,
    pub price_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingSystem {
    pub id: String,
    pub name: String,
    /// Flat monthly licence cost, added once per unit.
    #[serde(default)]
    pub price_monthly: f64,
    pub base_os_type: String,
    /// Resource id of the licence add-on this OS implies, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_license_resource: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuType {
    pub id: String,
    pub name: String,
    pub price_monthly: f64,
    /// Upper bound for the GPU count of a single unit.
    pub max_count: u32,
    #[serde(default)]
    pub compatible_series: Vec<String>,
}

impl GpuType {
    pub fn is_compatible_with(&self, series: &str) -> bool {
        self.compatible_series.iter().any(|s| s == series)
    }
}

/// Predefined instance shape driving the core resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceTemplate {
    pub id: String,
    pub name: String,
    pub cores: u32,
    pub ram: u32,
    pub flash_disk: u32,
    pub default_os_id: String,
    pub default_boot_disk_type_id: String,
    pub series: String,
}

/// Billing period. `price_multiplier` already includes the term discount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitmentTerm {
    pub id: String,
    pub name: String,
    pub price_multiplier: f64,
    /// Informational only; already folded into `price_multiplier`.
    #[serde(default)]
    pub discount: f64,
    pub suffix: String,
}

/// Flat monthly extra, independent of resource quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Addon {
    pub id: String,
    pub name: String,
    pub price_monthly: f64,
    #[serde(default)]
    pub selected: bool,
}
