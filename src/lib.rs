pub mod catalog;
pub mod codec;
pub mod config;
pub mod draft;
pub mod error;
pub mod estimate;
pub mod export;
pub mod models;
pub mod posta;
pub mod pricing;
pub mod store;
pub mod utils;

pub use catalog::Catalog;
pub use draft::ConfigurationDraft;
pub use error::{CatalogError, EstimateError};
pub use estimate::Estimate;
pub use models::{Configuration, EstimateSummary, Notice, NoticeLevel, ServiceType, SummaryItem};
pub use store::{FileStore, MemoryStore, SnapshotStore};
