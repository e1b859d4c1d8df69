pub mod configuration;
pub mod notice;
pub mod summary;

pub use configuration::{Configuration, ServiceType};
pub use notice::{Notice, NoticeLevel};
pub use summary::{EstimateSummary, SummaryItem};
