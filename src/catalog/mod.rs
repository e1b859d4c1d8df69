//! Static price catalog for CloudEdge estimates.
//!
//! Every option list treats its first entry as the designated default. All
//! `*_or_default` lookups resolve an id against that list and fall back to the
//! default entry on a miss, so stored configurations that reference retired
//! ids keep pricing instead of producing undefined totals. Use them everywhere
//! a price or a display name is derived; the `find_*` variants exist only for
//! validating operator input.

mod builtin;
mod options;
mod resources;

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

pub use options::{
    Addon, BootDiskType, CommitmentTerm, GpuType, InstanceTemplate, OperatingSystem,
    ProvisioningModel, Region,
};
pub use resources::{ResourceDefinition, ResourceRole};

/// Raw, unvalidated catalog as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogFile {
    pub resources: Vec<ResourceDefinition>,
    pub regions: Vec<Region>,
    pub boot_disk_types: Vec<BootDiskType>,
    pub provisioning_models: Vec<ProvisioningModel>,
    pub operating_systems: Vec<OperatingSystem>,
    pub gpu_types: Vec<GpuType>,
    pub instance_templates: Vec<InstanceTemplate>,
    pub commitment_terms: Vec<CommitmentTerm>,
    #[serde(default)]
    pub addons: Vec<Addon>,
}

/// Validated, immutable catalog. Every option list is non-empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    data: CatalogFile,
}

fn lookup<'a, T>(items: &'a [T], id: &str, key: impl Fn(&T) -> &str) -> Option<&'a T> {
    items.iter().find(|item| key(item) == id)
}

impl Catalog {
    /// The built-in CloudEdge price list.
    pub fn builtin() -> Self {
        Self {
            data: builtin::catalog_file(),
        }
    }

    /// Validate a raw catalog.
    pub fn new(data: CatalogFile) -> Result<Self, CatalogError> {
        validate(&data)?;
        Ok(Self { data })
    }

    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let data: CatalogFile = serde_json::from_str(text)?;
        Self::new(data)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&text)?;
        tracing::info!(path = %path.display(), "Loaded custom catalog");
        Ok(catalog)
    }

    pub fn to_file(&self) -> &CatalogFile {
        &self.data
    }

    pub fn resources(&self) -> &[ResourceDefinition] {
        &self.data.resources
    }

    pub fn regions(&self) -> &[Region] {
        &self.data.regions
    }

    pub fn boot_disk_types(&self) -> &[BootDiskType] {
        &self.data.boot_disk_types
    }

    pub fn provisioning_models(&self) -> &[ProvisioningModel] {
        &self.data.provisioning_models
    }

    pub fn operating_systems(&self) -> &[OperatingSystem] {
        &self.data.operating_systems
    }

    pub fn gpu_types(&self) -> &[GpuType] {
        &self.data.gpu_types
    }

    pub fn instance_templates(&self) -> &[InstanceTemplate] {
        &self.data.instance_templates
    }

    pub fn commitment_terms(&self) -> &[CommitmentTerm] {
        &self.data.commitment_terms
    }

    /// Fresh, unselected copies of every add-on.
    pub fn default_addons(&self) -> Vec<Addon> {
        self.data
            .addons
            .iter()
            .map(|a| Addon {
                selected: false,
                ..a.clone()
            })
            .collect()
    }

    pub fn resource(&self, id: &str) -> Option<&ResourceDefinition> {
        lookup(&self.data.resources, id, |r| r.id.as_str())
    }

    /// Resource definition carrying the given role, if the catalog has one.
    pub fn resource_for_role(&self, role: ResourceRole) -> Option<&ResourceDefinition> {
        self.data.resources.iter().find(|r| r.role == role)
    }

    pub fn find_region(&self, id: &str) -> Option<&Region> {
        lookup(&self.data.regions, id, |r| r.id.as_str())
    }

    pub fn find_boot_disk_type(&self, id: &str) -> Option<&BootDiskType> {
        lookup(&self.data.boot_disk_types, id, |b| b.id.as_str())
    }

    pub fn find_provisioning_model(&self, id: &str) -> Option<&ProvisioningModel> {
        lookup(&self.data.provisioning_models, id, |p| p.id.as_str())
    }

    pub fn find_operating_system(&self, id: &str) -> Option<&OperatingSystem> {
        lookup(&self.data.operating_systems, id, |o| o.id.as_str())
    }

    pub fn find_gpu_type(&self, id: &str) -> Option<&GpuType> {
        lookup(&self.data.gpu_types, id, |g| g.id.as_str())
    }

    pub fn find_instance_template(&self, id: &str) -> Option<&InstanceTemplate> {
        lookup(&self.data.instance_templates, id, |t| t.id.as_str())
    }

    pub fn find_commitment_term(&self, id: &str) -> Option<&CommitmentTerm> {
        lookup(&self.data.commitment_terms, id, |t| t.id.as_str())
    }

    pub fn default_region(&self) -> &Region {
        &self.data.regions[0]
    }

    pub fn default_boot_disk_type(&self) -> &BootDiskType {
        &self.data.boot_disk_types[0]
    }

    pub fn default_provisioning_model(&self) -> &ProvisioningModel {
        &self.data.provisioning_models[0]
    }

    pub fn default_operating_system(&self) -> &OperatingSystem {
        &self.data.operating_systems[0]
    }

    pub fn default_gpu_type(&self) -> &GpuType {
        &self.data.gpu_types[0]
    }

    pub fn default_instance_template(&self) -> &InstanceTemplate {
        &self.data.instance_templates[0]
    }

    pub fn default_commitment_term(&self) -> &CommitmentTerm {
        &self.data.commitment_terms[0]
    }

    pub fn region_or_default(&self, id: &str) -> &Region {
        self.find_region(id).unwrap_or_else(|| self.default_region())
    }

    pub fn boot_disk_type_or_default(&self, id: &str) -> &BootDiskType {
        self.find_boot_disk_type(id)
            .unwrap_or_else(|| self.default_boot_disk_type())
    }

    pub fn provisioning_model_or_default(&self, id: &str) -> &ProvisioningModel {
        self.find_provisioning_model(id)
            .unwrap_or_else(|| self.default_provisioning_model())
    }

    pub fn operating_system_or_default(&self, id: &str) -> &OperatingSystem {
        self.find_operating_system(id)
            .unwrap_or_else(|| self.default_operating_system())
    }

    pub fn gpu_type_or_default(&self, id: &str) -> &GpuType {
        self.find_gpu_type(id).unwrap_or_else(|| self.default_gpu_type())
    }

    pub fn instance_template_or_default(&self, id: &str) -> &InstanceTemplate {
        self.find_instance_template(id)
            .unwrap_or_else(|| self.default_instance_template())
    }

    pub fn commitment_term_or_default(&self, id: &str) -> &CommitmentTerm {
        self.find_commitment_term(id)
            .unwrap_or_else(|| self.default_commitment_term())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn valid_price(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn check_unique<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

fn check_prices<'a>(
    kind: &'static str,
    entries: impl Iterator<Item = (&'a str, f64)>,
) -> Result<(), CatalogError> {
    for (id, price) in entries {
        if !valid_price(price) {
            return Err(CatalogError::InvalidPrice {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

fn validate(data: &CatalogFile) -> Result<(), CatalogError> {
    let non_empty = [
        ("resource", data.resources.is_empty()),
        ("region", data.regions.is_empty()),
        ("boot disk type", data.boot_disk_types.is_empty()),
        ("provisioning model", data.provisioning_models.is_empty()),
        ("operating system", data.operating_systems.is_empty()),
        ("GPU type", data.gpu_types.is_empty()),
        ("instance template", data.instance_templates.is_empty()),
        ("commitment term", data.commitment_terms.is_empty()),
    ];
    if let Some((kind, _)) = non_empty.iter().find(|(_, empty)| *empty) {
        return Err(CatalogError::EmptyOptionSet(*kind));
    }

    for r in &data.resources {
        let reason = if r.step == 0 {
            Some("step must be positive".to_string())
        } else if r.min > r.max {
            Some(format!("min {} exceeds max {}", r.min, r.max))
        } else if r.default_value < r.min || r.default_value > r.max {
            Some(format!(
                "default {} outside [{}, {}]",
                r.default_value, r.min, r.max
            ))
        } else if !valid_price(r.price_per_unit) {
            Some("price per unit must be a non-negative number".to_string())
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(CatalogError::InvalidResource {
                id: r.id.clone(),
                reason,
            });
        }
    }

    check_unique("resource", data.resources.iter().map(|r| r.id.as_str()))?;
    check_unique("region", data.regions.iter().map(|r| r.id.as_str()))?;
    check_unique("boot disk type", data.boot_disk_types.iter().map(|b| b.id.as_str()))?;
    check_unique(
        "provisioning model",
        data.provisioning_models.iter().map(|p| p.id.as_str()),
    )?;
    check_unique(
        "operating system",
        data.operating_systems.iter().map(|o| o.id.as_str()),
    )?;
    check_unique("GPU type", data.gpu_types.iter().map(|g| g.id.as_str()))?;
    check_unique(
        "instance template",
        data.instance_templates.iter().map(|t| t.id.as_str()),
    )?;
    check_unique(
        "commitment term",
        data.commitment_terms.iter().map(|t| t.id.as_str()),
    )?;
    check_unique("add-on", data.addons.iter().map(|a| a.id.as_str()))?;

    check_prices(
        "region",
        data.regions.iter().map(|r| (r.id.as_str(), r.price_multiplier)),
    )?;
    check_prices(
        "boot disk type",
        data.boot_disk_types
            .iter()
            .map(|b| (b.id.as_str(), b.price_per_gb_multiplier)),
    )?;
    check_prices(
        "provisioning model",
        data.provisioning_models
            .iter()
            .map(|p| (p.id.as_str(), p.price_multiplier)),
    )?;
    check_prices(
        "operating system",
        data.operating_systems
            .iter()
            .map(|o| (o.id.as_str(), o.price_monthly)),
    )?;
    check_prices(
        "GPU type",
        data.gpu_types.iter().map(|g| (g.id.as_str(), g.price_monthly)),
    )?;
    check_prices(
        "commitment term",
        data.commitment_terms
            .iter()
            .map(|t| (t.id.as_str(), t.price_multiplier)),
    )?;
    check_prices(
        "add-on",
        data.addons.iter().map(|a| (a.id.as_str(), a.price_monthly)),
    )?;

    for t in &data.instance_templates {
        if !data.operating_systems.iter().any(|o| o.id == t.default_os_id) {
            return Err(CatalogError::UnknownReference {
                kind: "Instance template",
                id: t.id.clone(),
                target: "operating system",
                target_id: t.default_os_id.clone(),
            });
        }
        if !data
            .boot_disk_types
            .iter()
            .any(|b| b.id == t.default_boot_disk_type_id)
        {
            return Err(CatalogError::UnknownReference {
                kind: "Instance template",
                id: t.id.clone(),
                target: "boot disk type",
                target_id: t.default_boot_disk_type_id.clone(),
            });
        }
    }

    for os in &data.operating_systems {
        if let Some(res) = &os.requires_license_resource {
            if !data.resources.iter().any(|r| &r.id == res) {
                return Err(CatalogError::UnknownReference {
                    kind: "Operating system",
                    id: os.id.clone(),
                    target: "resource",
                    target_id: res.clone(),
                });
            }
        }
    }

    Ok(())
}
