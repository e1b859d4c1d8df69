/// One row of the estimate summary, derived from a configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryItem {
    pub id: String,
    pub name: String,
    pub service_type_name: String,
    pub quantity: u32,
    pub region_name: String,
    pub os_name: String,
    pub provisioning_name: String,
    /// `"2x WP GPU T4-Class (General Purpose)"` or `"No GPUs"`.
    pub gpu_summary: String,
    /// Compute / memory / primary storage, e.g. `"4vCPU / 16GB / 100GB"`.
    pub core_resources: String,
    /// Remaining non-zero resources, e.g. `"2IP Static, 500GB Object"`, or `"None"`.
    pub other_resources: String,
    /// Every notable resource with its short label.
    pub details: String,
    /// Selected add-on names, or `"None"`.
    pub addons_summary: String,
    pub unit_monthly_price: f64,
    pub total_cost_for_period: f64,
    pub billing_cycle: String,
    pub billing_suffix: String,
}

/// The full derived view of an estimate.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EstimateSummary {
    pub items: Vec<SummaryItem>,
    pub grand_total: f64,
}

impl EstimateSummary {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
