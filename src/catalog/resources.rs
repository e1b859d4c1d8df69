use serde::{Deserialize, Serialize};

use crate::utils::parse_clamped;

/// Which part of a configuration a resource dimension represents.
///
/// Instance templates drive the three core roles; the primary storage line is
/// the only one affected by the boot-disk multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResourceRole {
    Compute,
    Memory,
    PrimaryStorage,
    #[default]
    Other,
}

impl ResourceRole {
    pub fn is_core(&self) -> bool {
        !matches!(self, ResourceRole::Other)
    }
}

/// A priced resource dimension (cores, RAM, disk, IPs, licences...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    pub id: String,
    pub label: String,
    pub unit: String,
    /// USD per unit per month, before the region multiplier.
    pub price_per_unit: f64,
    pub min: u32,
    pub max: u32,
    pub step: u32,
    pub default_value: u32,
    #[serde(default)]
    pub role: ResourceRole,
    #[serde(default)]
    pub tooltip: String,
}

impl ResourceDefinition {
    /// Clamp any requested value into `[min, max]`.
    pub fn clamp(&self, value: i64) -> u32 {
        value.clamp(self.min as i64, self.max as i64) as u32
    }

    /// Parse a typed value; non-numeric input falls back to `min`.
    pub fn parse_input(&self, raw: &str) -> u32 {
        parse_clamped(raw, self.min, self.max)
    }

    /// One step up, or unchanged if that would pass `max`.
    pub fn step_up(&self, value: u32) -> u32 {
        match value.checked_add(self.step) {
            Some(next) if next <= self.max => next,
            _ => value,
        }
    }

    /// One step down, or unchanged if that would pass `min`.
    pub fn step_down(&self, value: u32) -> u32 {
        match value.checked_sub(self.step) {
            Some(next) if next >= self.min => next,
            _ => value,
        }
    }

    /// First word of the label, as used in compact summaries ("CPU", "RAM", "Flash"...).
    pub fn short_label(&self) -> &str {
        self.label.split(' ').next().unwrap_or(&self.label)
    }

    /// Whether a quantity is worth listing in a summary.
    pub fn is_notable(&self, value: u32) -> bool {
        value > 0 || (self.min > 0 && value == self.min)
    }
}
