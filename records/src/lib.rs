//! FILENAME: records/src/lib.rs
//! PURPOSE: Main library entry point for the analytics record model.
//! CONTEXT: Re-exports public types and modules for use by other crates.

pub mod column;
pub mod number_format;
pub mod record;

// Re-export commonly used types at the crate root
pub use column::{derive_columns, filter_visible, Column, ColumnAlign};
pub use number_format::{format_currency_usd, format_decimal, format_general};
pub use record::{fields, FieldValue, Record};
