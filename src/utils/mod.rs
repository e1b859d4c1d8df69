// Input parsing utilities
pub mod parse_clamped;
pub mod parse_flag;

// Output formatting utilities
pub mod money;
pub mod csv_field;

// Identifier utilities
pub mod generate_id;

// Re-export all utilities for convenient access
pub use parse_clamped::parse_clamped;
pub use parse_flag::parse_flag;
pub use money::format_money;
pub use csv_field::quote_csv_field;
pub use generate_id::generate_id;
