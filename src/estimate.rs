//! The configuration manager.
//!
//! [`Estimate`] owns the ordered collection of configurations and mediates
//! every mutation. Totals are never stored: [`Estimate::aggregate`] prices
//! each configuration again on every call, so the summary always reflects the
//! last committed state.

use crate::catalog::{Catalog, ResourceRole};
use crate::codec;
use crate::config::DEFAULT_CURRENCY_SYMBOL;
use crate::draft::ConfigurationDraft;
use crate::error::EstimateError;
use crate::export;
use crate::models::{Configuration, EstimateSummary, Notice, SummaryItem};
use crate::pricing::{compute_period_cost, unit_monthly_price};
use crate::store::SnapshotStore;
use crate::utils::generate_id;

pub struct Estimate<S: SnapshotStore> {
    catalog: Catalog,
    store: S,
    currency: String,
    configurations: Vec<Configuration>,
    // Set when the slot exists but could not be read; saving would clobber it.
    slot_unreadable: bool,
}

impl<S: SnapshotStore> Estimate<S> {
    /// Empty estimate. Nothing is read from `store` until [`Estimate::load`].
    pub fn new(catalog: Catalog, store: S) -> Self {
        Self {
            catalog,
            store,
            currency: DEFAULT_CURRENCY_SYMBOL.to_string(),
            configurations: Vec::new(),
            slot_unreadable: false,
        }
    }

    pub fn with_currency(mut self, symbol: impl Into<String>) -> Self {
        self.currency = symbol.into();
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn configurations(&self) -> &[Configuration] {
        &self.configurations
    }

    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Configuration> {
        self.configurations.iter().find(|c| c.id == id)
    }

    /// Blank draft numbered after the current collection.
    pub fn new_draft(&self) -> ConfigurationDraft {
        ConfigurationDraft::new(&self.catalog, self.len() + 1)
    }

    /// Draft editing an existing configuration.
    pub fn edit_draft(&self, id: &str) -> Result<ConfigurationDraft, EstimateError> {
        self.get(id)
            .map(ConfigurationDraft::edit)
            .ok_or_else(|| EstimateError::NotFound(id.to_string()))
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = generate_id();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn fallback_name(&self) -> String {
        format!("Configuration #{}", self.len() + 1)
    }

    /// Commit a draft as a new configuration with a fresh id.
    pub fn create(&mut self, draft: ConfigurationDraft) -> &Configuration {
        let config = draft.into_configuration(self.fresh_id(), self.fallback_name());
        tracing::info!(id = %config.id, name = %config.name, "Configuration added");
        self.configurations.push(config);
        &self.configurations[self.configurations.len() - 1]
    }

    /// Replace the configuration `id` in place, keeping its position.
    ///
    /// The draft must have been opened on `id` with [`Estimate::edit_draft`].
    pub fn update(
        &mut self,
        id: &str,
        draft: ConfigurationDraft,
    ) -> Result<&Configuration, EstimateError> {
        let index = self
            .configurations
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| EstimateError::NotFound(id.to_string()))?;
        if draft.editing_id() != Some(id) {
            return Err(EstimateError::DraftMismatch {
                draft: draft.editing_id().unwrap_or("a new configuration").to_string(),
                target: id.to_string(),
            });
        }
        let fallback = self.configurations[index].name.clone();
        let config = draft.into_configuration(id.to_string(), fallback);
        tracing::info!(id = %config.id, name = %config.name, "Configuration updated");
        self.configurations[index] = config;
        Ok(&self.configurations[index])
    }

    /// Append an independent copy of `id` named "Copy of ...".
    pub fn duplicate(&mut self, id: &str) -> Result<&Configuration, EstimateError> {
        let draft = self
            .get(id)
            .map(ConfigurationDraft::duplicate)
            .ok_or_else(|| EstimateError::NotFound(id.to_string()))?;
        let copy = draft.into_configuration(self.fresh_id(), self.fallback_name());
        tracing::info!(source = %id, id = %copy.id, "Configuration duplicated");
        self.configurations.push(copy);
        Ok(&self.configurations[self.configurations.len() - 1])
    }

    /// Drop the configuration `id`, returning it. Absent ids are a no-op.
    pub fn remove(&mut self, id: &str) -> Option<Configuration> {
        let index = self.configurations.iter().position(|c| c.id == id)?;
        let removed = self.configurations.remove(index);
        tracing::info!(id = %removed.id, name = %removed.name, "Configuration removed");
        Some(removed)
    }

    /// Empty the collection and the persisted slot.
    pub fn clear(&mut self) -> Notice {
        self.configurations.clear();
        match self.store.remove() {
            Ok(()) => {
                self.slot_unreadable = false;
                tracing::info!("Estimate cleared");
                Notice::success("Estimate cleared.")
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to remove saved estimate");
                Notice::warning("Estimate cleared, but the saved copy could not be removed.")
            }
        }
    }

    /// Replace the whole collection, regenerating any repeated id.
    pub fn replace_all(&mut self, configurations: Vec<Configuration>) {
        self.configurations.clear();
        for mut config in configurations {
            if self.get(&config.id).is_some() {
                config.id = self.fresh_id();
            }
            self.configurations.push(config);
        }
    }

    /// Price every configuration and total the period costs.
    pub fn aggregate(&self) -> EstimateSummary {
        let items: Vec<SummaryItem> = self
            .configurations
            .iter()
            .map(|c| summarize(&self.catalog, c))
            .collect();
        let grand_total = items.iter().map(|i| i.total_cost_for_period).sum();
        EstimateSummary { items, grand_total }
    }

    pub fn serialize(&self) -> Result<String, EstimateError> {
        codec::serialize(&self.configurations)
    }

    pub fn deserialize(&self, text: &str) -> Result<Vec<Configuration>, EstimateError> {
        codec::deserialize(&self.catalog, text)
    }

    /// Header, one row per configuration, then the grand total.
    pub fn export_rows(&self) -> Vec<Vec<String>> {
        export::export_rows(&self.aggregate(), &self.currency)
    }

    /// CSV text of [`Estimate::export_rows`], or `None` for an empty estimate.
    pub fn export_csv(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        Some(export::rows_to_csv(&self.export_rows()))
    }

    /// Plain-text summary suitable for an e-mail body.
    pub fn export_narrative(&self) -> String {
        export::narrative(&self.aggregate(), &self.currency)
    }

    /// Write the collection to the store.
    ///
    /// Refused after a load that could not read the slot, so a transient read
    /// failure never overwrites the configurations stored there.
    pub fn save(&mut self) -> Notice {
        if self.slot_unreadable {
            tracing::warn!("Refusing to overwrite a saved estimate that could not be read");
            return Notice::error("Error saving estimate.");
        }
        let result = self
            .serialize()
            .and_then(|text| self.store.save(&text).map_err(EstimateError::from));
        match result {
            Ok(()) => {
                tracing::info!(count = self.len(), "Estimate saved");
                Notice::success("Estimate saved successfully!")
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save estimate");
                Notice::error("Error saving estimate.")
            }
        }
    }

    /// Replace the collection with the stored snapshot.
    ///
    /// A snapshot that cannot be decoded is removed from the slot and a
    /// warning returned; the collection is left as it was. A slot that cannot
    /// be read is an error and blocks [`Estimate::save`] until a later load
    /// or [`Estimate::clear`] succeeds.
    pub fn load(&mut self) -> Notice {
        let text = match self.store.load() {
            Ok(Some(text)) => text,
            Ok(None) => {
                self.slot_unreadable = false;
                return Notice::info("No saved estimate found.");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read saved estimate");
                self.slot_unreadable = true;
                return Notice::error("Error loading estimate.");
            }
        };
        self.slot_unreadable = false;
        match self.deserialize(&text) {
            Ok(configurations) => {
                self.replace_all(configurations);
                tracing::info!(count = self.len(), "Estimate loaded");
                Notice::success("Estimate loaded successfully!")
            }
            Err(e) => {
                tracing::warn!(error = %e, "Discarding corrupt saved estimate");
                if let Err(e) = self.store.remove() {
                    tracing::warn!(error = %e, "Failed to remove corrupt saved estimate");
                }
                match e {
                    EstimateError::CorruptSnapshot(reason) => {
                        Notice::warning(format!("Could not load estimate: {}", reason))
                    }
                    _ => Notice::warning("Error loading estimate."),
                }
            }
        }
    }
}

fn resource_line(value: u32, unit: &str) -> String {
    format!("{}{}", value, unit)
}

/// Derive the summary row of one configuration.
pub fn summarize(catalog: &Catalog, config: &Configuration) -> SummaryItem {
    let unit_price = unit_monthly_price(catalog, config);
    let term = catalog.commitment_term_or_default(&config.commitment_term_id);

    let core_roles = [
        ResourceRole::Compute,
        ResourceRole::Memory,
        ResourceRole::PrimaryStorage,
    ];
    let core_resources = core_roles
        .iter()
        .filter_map(|role| catalog.resource_for_role(*role))
        .map(|def| resource_line(config.resource_value(catalog, &def.id), &def.unit))
        .collect::<Vec<_>>()
        .join(" / ");

    let mut details = Vec::new();
    let mut others = Vec::new();
    for def in catalog.resources() {
        let value = config.resource_value(catalog, &def.id);
        if !def.is_notable(value) {
            continue;
        }
        let line = format!("{} {}", resource_line(value, &def.unit), def.short_label());
        if !def.role.is_core() {
            others.push(line.clone());
        }
        details.push(line);
    }

    let gpu_count = config.effective_gpu_count();
    let gpu_summary = match config.gpu_type_id.as_deref() {
        Some(gpu_id) if gpu_count > 0 => {
            format!("{}x {}", gpu_count, catalog.gpu_type_or_default(gpu_id).name)
        }
        _ => "No GPUs".to_string(),
    };

    let addons: Vec<&str> = config.selected_addons().map(|a| a.name.as_str()).collect();

    SummaryItem {
        id: config.id.clone(),
        name: config.name.clone(),
        service_type_name: config.service_type.label().to_string(),
        quantity: config.quantity,
        region_name: catalog.region_or_default(&config.region_id).name.clone(),
        os_name: catalog
            .operating_system_or_default(&config.operating_system_id)
            .name
            .clone(),
        provisioning_name: catalog
            .provisioning_model_or_default(&config.provisioning_model_id)
            .name
            .clone(),
        gpu_summary,
        core_resources,
        other_resources: if others.is_empty() {
            "None".to_string()
        } else {
            others.join(", ")
        },
        details: details.join(", "),
        addons_summary: if addons.is_empty() {
            "None".to_string()
        } else {
            addons.join(", ")
        },
        unit_monthly_price: unit_price,
        total_cost_for_period: compute_period_cost(unit_price, config.quantity, term),
        billing_cycle: term.name.clone(),
        billing_suffix: term.suffix.clone(),
    }
}
