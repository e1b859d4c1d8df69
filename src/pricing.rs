//! CloudEdge price estimation.
//!
//! A unit price is built in this order:
//!
//! 1. every resource definition is priced at `quantity × price_per_unit ×
//!    region multiplier`, with the boot-disk multiplier applied on top for the
//!    primary storage line only (absent quantities use the definition default);
//! 2. the operating system's flat monthly price is added once;
//! 3. enabled GPUs add `gpu price × count`;
//! 4. each selected add-on adds its flat monthly price once;
//! 5. the provisioning model multiplier scales the whole total, flat costs
//!    included.
//!
//! The period cost is `unit price × quantity × term multiplier`, where the
//! term multiplier already carries the term discount (a yearly term at 10% off
//! is `12 × 0.9`).

use std::collections::BTreeMap;

use crate::catalog::{Addon, Catalog, CommitmentTerm, ResourceRole};
use crate::models::Configuration;

/// Everything the unit price depends on, borrowed from a configuration or a draft.
#[derive(Clone, Copy, Debug)]
pub struct PriceInputs<'a> {
    pub resource_values: &'a BTreeMap<String, u32>,
    pub addons: &'a [Addon],
    pub region_id: &'a str,
    pub provisioning_model_id: &'a str,
    pub operating_system_id: &'a str,
    pub boot_disk_type_id: &'a str,
    pub gpus_enabled: bool,
    pub gpu_type_id: Option<&'a str>,
    pub gpu_count: Option<u32>,
}

impl<'a> From<&'a Configuration> for PriceInputs<'a> {
    fn from(config: &'a Configuration) -> Self {
        PriceInputs {
            resource_values: &config.resource_values,
            addons: &config.addons,
            region_id: &config.region_id,
            provisioning_model_id: &config.provisioning_model_id,
            operating_system_id: &config.operating_system_id,
            boot_disk_type_id: &config.boot_disk_type_id,
            gpus_enabled: config.gpus_enabled,
            gpu_type_id: config.gpu_type_id.as_deref(),
            gpu_count: Some(config.gpu_count),
        }
    }
}

/// Monthly price of a single unit. Never negative, never NaN.
pub fn compute_unit_monthly_price(catalog: &Catalog, inputs: &PriceInputs<'_>) -> f64 {
    let region = catalog.region_or_default(inputs.region_id);
    let provisioning = catalog.provisioning_model_or_default(inputs.provisioning_model_id);
    let os = catalog.operating_system_or_default(inputs.operating_system_id);
    let boot_disk = catalog.boot_disk_type_or_default(inputs.boot_disk_type_id);

    let mut price = 0.0;

    for def in catalog.resources() {
        let qty = inputs
            .resource_values
            .get(&def.id)
            .copied()
            .unwrap_or(def.default_value);
        let mut unit_price = def.price_per_unit * region.price_multiplier;
        if def.role == ResourceRole::PrimaryStorage {
            unit_price *= boot_disk.price_per_gb_multiplier;
        }
        price += f64::from(qty) * unit_price;
    }

    price += os.price_monthly;

    if inputs.gpus_enabled {
        if let (Some(gpu_type_id), Some(count)) = (inputs.gpu_type_id, inputs.gpu_count) {
            if count > 0 {
                let gpu = catalog.gpu_type_or_default(gpu_type_id);
                price += gpu.price_monthly * f64::from(count);
            }
        }
    }

    for addon in inputs.addons.iter().filter(|a| a.selected) {
        price += addon.price_monthly;
    }

    price *= provisioning.price_multiplier;

    if price.is_finite() && price >= 0.0 {
        price
    } else {
        tracing::warn!(price, "Unit price evaluated to an invalid number; reporting 0");
        0.0
    }
}

/// Unit price of a stored configuration.
pub fn unit_monthly_price(catalog: &Catalog, config: &Configuration) -> f64 {
    compute_unit_monthly_price(catalog, &PriceInputs::from(config))
}

/// Cost of `quantity` units over the commitment term.
pub fn compute_period_cost(unit_monthly_price: f64, quantity: u32, term: &CommitmentTerm) -> f64 {
    unit_monthly_price * f64::from(quantity) * term.price_multiplier
}

/// Cost of a stored configuration over its own commitment term.
pub fn period_cost(catalog: &Catalog, config: &Configuration) -> f64 {
    let term = catalog.commitment_term_or_default(&config.commitment_term_id);
    compute_period_cost(unit_monthly_price(catalog, config), config.quantity, term)
}
