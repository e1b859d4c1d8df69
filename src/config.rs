use std::env;
use std::path::{Path, PathBuf};

// Default configuration constants
pub const DEFAULT_DATA_DIR: &str = ".";
pub const DEFAULT_SLOT: &str = "worldpostaCloudEdgeEstimate";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";
pub const DEFAULT_EMAIL_SUBJECT: &str = "WorldPosta CloudEdge Estimate";
pub const DEFAULT_CSV_FILE_NAME: &str = "worldposta_cloudedge_estimate.csv";

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

/// Directory holding the persisted estimate slot.
pub fn get_data_dir() -> PathBuf {
    let raw = env::var("EDGECALC_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        PathBuf::from(DEFAULT_DATA_DIR)
    } else {
        PathBuf::from(trimmed)
    }
}

/// Name of the storage slot the estimate snapshot is written to.
pub fn get_slot_name() -> String {
    sanitize_slot_name(&env::var("EDGECALC_SLOT").unwrap_or_else(|_| DEFAULT_SLOT.to_string()))
}

/// Optional JSON catalog replacing the built-in price list.
pub fn get_catalog_file() -> Option<PathBuf> {
    env::var("EDGECALC_CATALOG_FILE")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Skip confirmation prompts for destructive commands (`EDGECALC_ASSUME_YES`).
pub fn get_assume_yes() -> bool {
    crate::utils::parse_flag(env::var("EDGECALC_ASSUME_YES").ok().as_deref(), false)
}

pub fn get_currency_symbol() -> String {
    env::var("EDGECALC_CURRENCY")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string())
}

/// Full path of the snapshot file for the configured slot.
pub fn snapshot_path() -> PathBuf {
    get_data_dir().join(format!("{}.json", get_slot_name()))
}

/// Slot names become file names, so anything outside `[A-Za-z0-9_-]` is dropped.
pub fn sanitize_slot_name(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .trim_end_matches(".json")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        DEFAULT_SLOT.to_string()
    } else {
        cleaned
    }
}
