//! FILENAME: view-engine/src/engine.rs
//! View Engine - The calculation core that transforms records into a
//! renderable table view.
//!
//! This module takes the input collection plus a ViewState (user intent)
//! and produces a TableView (row slice plus pagination metadata).
//!
//! Algorithm, applied strictly in this order:
//! 1. Filter: drop records failing the field filter set, then the search term
//! 2. Group: partition by the grouping key, emit header + member rows
//! 3. Sort: stable reorder of the grouped sequence by the sort field
//! 4. Paginate: clamp the page and slice the row sequence
//!
//! Every stage is a pure function of its input; the pipeline is total and
//! never fails, degenerating to an empty view for empty input.

use std::cmp::Ordering;

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::definition::{SortDirection, ViewState};
use crate::view::{Pagination, TableView, ViewRow};
use records::{filter_visible, Column, Record};

/// Group label for records whose grouping-key field is missing or empty.
pub const UNGROUPED_LABEL: &str = "(blank)";

/// Computes the table view for `data` under `state`. Convenience wrapper
/// around [`ViewCalculator`] for callers that recompute after every state
/// mutation.
pub fn compute_view(data: &[Record], columns: &[Column], state: &ViewState) -> TableView {
    ViewCalculator::new(data, columns, state).calculate()
}

// ============================================================================
// VIEW CALCULATOR
// ============================================================================

/// The staged calculator behind [`compute_view`]. Borrows the input
/// collection and view state; owns nothing.
pub struct ViewCalculator<'a> {
    data: &'a [Record],
    columns: &'a [Column],
    state: &'a ViewState,
}

impl<'a> ViewCalculator<'a> {
    pub fn new(data: &'a [Record], columns: &'a [Column], state: &'a ViewState) -> Self {
        ViewCalculator { data, columns, state }
    }

    /// Executes the full pipeline and returns the rendered view.
    pub fn calculate(&self) -> TableView {
        // Step 1: field filter set, then search term
        let filtered = self.filter_records();

        // Step 2: grouping (identity when disabled)
        let grouped = self.group_rows(filtered);

        // Step 3: stable sort of the grouped sequence
        let sorted = self.sort_rows(grouped);

        // Step 4: pagination
        let (rows, pagination) = self.paginate(sorted);

        TableView {
            rows,
            pagination,
            columns: filter_visible(self.columns, &self.state.visible_columns),
        }
    }

    // ------------------------------------------------------------------
    // Stage 1: filtering
    // ------------------------------------------------------------------

    /// Applies the field filter set, then the free-text search. An empty
    /// search term and an empty filter set pass every record through in
    /// original order.
    fn filter_records(&self) -> Vec<&'a Record> {
        let term = self.state.search_term.to_lowercase();
        self.data
            .iter()
            .filter(|record| self.state.filters.matches(record))
            .filter(|record| record.matches_search(&term))
            .collect()
    }

    // ------------------------------------------------------------------
    // Stage 2: grouping
    // ------------------------------------------------------------------

    /// The group key of a record: the display form of its grouping-key
    /// field, or [`UNGROUPED_LABEL`] when missing or empty.
    fn group_key(&self, record: &Record) -> String {
        match record.get(&self.state.group_by) {
            Some(value) => {
                let display = value.display_value();
                if display.is_empty() {
                    UNGROUPED_LABEL.to_string()
                } else {
                    display
                }
            }
            None => UNGROUPED_LABEL.to_string(),
        }
    }

    /// Partitions the filtered records by group key, preserving first-seen
    /// group order and original relative order inside each group. Per group
    /// emits one synthetic header row (copy of the group's first record)
    /// followed by the member rows. Identity when grouping is disabled.
    fn group_rows(&self, filtered: Vec<&'a Record>) -> Vec<ViewRow> {
        if !self.state.grouped {
            return filtered
                .into_iter()
                .map(|record| ViewRow::standard(record.clone()))
                .collect();
        }

        let mut group_order: Vec<String> = Vec::new();
        let mut members: FxHashMap<String, SmallVec<[&'a Record; 8]>> = FxHashMap::default();

        for record in filtered {
            let key = self.group_key(record);
            let bucket = members.entry(key.clone()).or_default();
            if bucket.is_empty() {
                group_order.push(key);
            }
            bucket.push(record);
        }

        let mut rows = Vec::new();
        for key in &group_order {
            let bucket = &members[key];
            rows.push(ViewRow::group_header(key, bucket[0].clone()));
            for record in bucket {
                rows.push(ViewRow::group_member((*record).clone()));
            }
        }

        rows
    }

    // ------------------------------------------------------------------
    // Stage 3: sorting
    // ------------------------------------------------------------------

    /// Stable sort of the grouped sequence by the active sort field.
    /// Identity when no sort field is set. Ties keep their prior relative
    /// order in both directions.
    fn sort_rows(&self, mut rows: Vec<ViewRow>) -> Vec<ViewRow> {
        let Some(field) = self.state.sort_field.as_deref() else {
            return rows;
        };

        rows.sort_by(|a, b| {
            let ordering = compare_field(&a.record, &b.record, field);
            match self.state.sort_direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });

        rows
    }

    // ------------------------------------------------------------------
    // Stage 4: pagination
    // ------------------------------------------------------------------

    /// Clamps the requested page into range and returns the page slice
    /// plus pagination metadata for the full sequence.
    fn paginate(&self, rows: Vec<ViewRow>) -> (Vec<ViewRow>, Pagination) {
        let pagination = Pagination::new(rows.len(), self.state.page, self.state.page_size);
        let page_rows: Vec<ViewRow> = rows
            .into_iter()
            .skip(pagination.start_index)
            .take(pagination.rows_on_page())
            .collect();
        (page_rows, pagination)
    }
}

// ============================================================================
// FIELD COMPARISON
// ============================================================================

/// Compares one field across two records. Two numbers compare numerically;
/// any other pairing compares the values' display strings. A field absent
/// on either side compares equal, so such rows keep their relative order.
fn compare_field(a: &Record, b: &Record, field: &str) -> Ordering {
    let (Some(a_value), Some(b_value)) = (a.get(field), b.get(field)) else {
        return Ordering::Equal;
    };

    match (a_value.as_number(), b_value.as_number()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a_value.display_value().cmp(&b_value.display_value()),
    }
}

// ============================================================================
// FILTER OPTIONS
// ============================================================================

/// Distinct display values of a field, in first-seen order: the option list
/// for that field's filter dropdown. Missing and empty values are not
/// offered as options.
pub fn distinct_values(data: &[Record], field: &str) -> Vec<String> {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut values = Vec::new();

    for record in data {
        if let Some(value) = record.get(field) {
            let display = value.display_value();
            if !display.is_empty() && seen.insert(display.clone()) {
                values.push(display);
            }
        }
    }

    values
}
