//! FILENAME: view-engine/src/lib.rs
//! Table view subsystem for the class analytics dashboard.
//!
//! This crate provides the view pipeline as a standalone module, separate
//! from the record model. It depends on `records` only for shared types
//! (Record, FieldValue, Column).
//!
//! Layers:
//! - `definition`: Serializable view state (what the view IS)
//! - `engine`: Calculation pipeline (HOW we compute)
//! - `view`: Renderable output for the presentation layer (WHAT we display)
//! - `summary`: Headline metrics over the filtered collection

pub mod definition;
pub mod engine;
pub mod summary;
pub mod view;

// Register the separate tests module
#[cfg(test)]
mod tests;

pub use definition::{
    FilterSet, SortDirection, ViewState, DEFAULT_PAGE_SIZE, FILTER_ALL,
};
pub use engine::{compute_view, distinct_values, ViewCalculator, UNGROUPED_LABEL};
pub use summary::{summarize, Summary};
pub use view::{formatted_cell, Pagination, TableView, ViewRow, ViewRowType};
