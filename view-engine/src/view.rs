//! FILENAME: view-engine/src/view.rs
//! Table View - Renderable output for the presentation layer.
//!
//! This module defines the structures the calculator hands to the rendering
//! layer: the row slice for the current page, pagination metadata, and the
//! visible column descriptors. Cells are not pre-rendered; the presentation
//! layer formats values per column via `formatted_cell`.

use serde::{Deserialize, Serialize};

use crate::definition::DEFAULT_PAGE_SIZE;
use records::{format_currency_usd, Column, FieldValue, Record};

// ============================================================================
// VIEW ROWS
// ============================================================================

/// The type of a row in the table view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewRowType {
    /// Ordinary data row (grouping disabled).
    Standard,
    /// Synthetic group-header row, one per distinct group key.
    GroupHeader,
    /// Data row belonging to the group opened by the preceding header.
    GroupMember,
}

/// One row of the rendered view. Group-header rows carry a copy of their
/// group's first record so every column has something to show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewRow {
    /// Stable row identity for the rendering layer. Group headers override
    /// the record id with `group-<key>`.
    pub row_id: String,

    /// The type of this row.
    pub row_type: ViewRowType,

    /// The underlying record.
    pub record: Record,
}

impl ViewRow {
    /// Creates an ordinary data row.
    pub fn standard(record: Record) -> Self {
        ViewRow {
            row_id: record.unique_id(),
            row_type: ViewRowType::Standard,
            record,
        }
    }

    /// Creates a synthetic group-header row for `key`, carrying a copy of
    /// the group's first record.
    pub fn group_header(key: &str, record: Record) -> Self {
        ViewRow {
            row_id: format!("group-{}", key),
            row_type: ViewRowType::GroupHeader,
            record,
        }
    }

    /// Creates a group-member row.
    pub fn group_member(record: Record) -> Self {
        ViewRow {
            row_id: record.unique_id(),
            row_type: ViewRowType::GroupMember,
            record,
        }
    }

    pub fn is_group_header(&self) -> bool {
        self.row_type == ViewRowType::GroupHeader
    }

    pub fn is_group_member(&self) -> bool {
        self.row_type == ViewRowType::GroupMember
    }
}

// ============================================================================
// PAGINATION
// ============================================================================

/// Pagination metadata for the current view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page, 1-based, clamped into range.
    pub page: usize,

    /// Rows per page.
    pub page_size: usize,

    /// Total rows before slicing (after filter/group/sort).
    pub total_rows: usize,

    /// `ceil(total_rows / page_size)`; 0 when there are no rows.
    pub total_pages: usize,

    /// Start of the page slice (0-based, inclusive).
    pub start_index: usize,

    /// End of the page slice (0-based, exclusive).
    pub end_index: usize,
}

impl Pagination {
    /// Computes pagination for `total_rows`. The requested page is clamped
    /// into `[1, total_pages]` (page 1 when empty) and the page size to at
    /// least one row; out-of-range requests yield a truncated or empty
    /// slice.
    pub fn new(total_rows: usize, requested_page: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_rows.div_ceil(page_size);
        let page = requested_page.clamp(1, total_pages.max(1));
        let start_index = (page - 1) * page_size;
        let end_index = (start_index + page_size).min(total_rows);

        Pagination {
            page,
            page_size,
            total_rows,
            total_pages,
            start_index,
            end_index,
        }
    }

    /// Number of rows on the current page.
    pub fn rows_on_page(&self) -> usize {
        self.end_index - self.start_index
    }
}

// ============================================================================
// TABLE VIEW
// ============================================================================

/// The complete output of one pipeline run: the row slice for the current
/// page, pagination metadata, and the visible column descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableView {
    /// Rows of the current page, in display order.
    pub rows: Vec<ViewRow>,

    /// Pagination metadata for the full (pre-slice) row sequence.
    pub pagination: Pagination,

    /// Visible column descriptors, in derived-column order.
    pub columns: Vec<Column>,
}

impl TableView {
    /// An empty view (no rows, no columns).
    pub fn empty() -> Self {
        TableView {
            rows: Vec::new(),
            pagination: Pagination::new(0, 1, DEFAULT_PAGE_SIZE),
            columns: Vec::new(),
        }
    }
}

// ============================================================================
// CELL FORMATTING
// ============================================================================

/// Renders one cell for display: currency columns format numeric values in
/// the fixed USD format; everything else renders the value's plain string
/// form. Numeric columns carry their right-align hint on the `Column`.
pub fn formatted_cell(column: &Column, value: Option<&FieldValue>) -> String {
    let Some(value) = value else {
        return String::new();
    };

    if column.currency {
        if let Some(n) = value.as_number() {
            return format_currency_usd(n);
        }
    }

    value.display_value()
}
