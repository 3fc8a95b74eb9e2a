//! FILENAME: view-engine/src/definition.rs
//! View Definition - The serializable view state.
//!
//! This module contains all the types needed to DESCRIBE a table view.
//! These structures are designed to be:
//! - Serializable (for saving/restoring view configurations)
//! - Immutable snapshots of user intent
//!
//! The view state is owned by the presentation layer and passed into the
//! calculator after every user action (keystroke, click, page navigation).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use records::{fields, Column, Record};

// ============================================================================
// SORT DIRECTION
// ============================================================================

/// Direction of the active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Flips ascending to descending and back.
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

impl Default for SortDirection {
    fn default() -> Self {
        SortDirection::Ascending
    }
}

// ============================================================================
// FILTER SET
// ============================================================================

/// Sentinel filter value meaning "no restriction" (the dropdown's
/// catch-all entry).
pub const FILTER_ALL: &str = "all";

/// Per-field value filters. A filter is inactive when its value is absent,
/// empty, or the `FILTER_ALL` sentinel. A record passes the set iff every
/// active filter's value occurs, case-insensitively, inside the record's
/// field value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    filters: HashMap<String, String>,
}

impl FilterSet {
    pub fn new() -> Self {
        FilterSet::default()
    }

    /// Sets the accepted value for a field. Setting `FILTER_ALL` or an
    /// empty string deactivates the filter.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.filters.insert(field.into(), value.into());
    }

    /// Removes the filter for a field entirely.
    pub fn clear(&mut self, field: &str) {
        self.filters.remove(field);
    }

    /// Iterates the active (field, value) pairs.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters
            .iter()
            .filter(|(_, value)| !value.is_empty() && *value != FILTER_ALL)
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }

    /// Number of active filters (what the filter badge shows).
    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// True when the record passes every active filter. Fields absent from
    /// the record read as the empty string, so they fail any active filter.
    pub fn matches(&self, record: &Record) -> bool {
        self.active().all(|(field, value)| {
            let field_value = record
                .get(field)
                .map(|v| v.display_value())
                .unwrap_or_default();
            field_value.to_lowercase().contains(&value.to_lowercase())
        })
    }
}

// ============================================================================
// VIEW STATE
// ============================================================================

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// The complete set of user-controlled view parameters. The pipeline output
/// is a pure function of (input collection, view state).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// Free-text search applied across all field values.
    pub search_term: String,

    /// Per-field value filters.
    #[serde(default)]
    pub filters: FilterSet,

    /// Whether rows are clustered under group-header rows.
    pub grouped: bool,

    /// Field used to cluster records when grouping is enabled.
    pub group_by: String,

    /// Column key currently sorted by, if any.
    pub sort_field: Option<String>,

    /// Direction of the active sort.
    pub sort_direction: SortDirection,

    /// Current page, 1-based.
    pub page: usize,

    /// Rows per page.
    pub page_size: usize,

    /// Keys of the columns currently shown. Always intersected with the
    /// derived column set, so stray keys are harmless.
    pub visible_columns: Vec<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            search_term: String::new(),
            filters: FilterSet::new(),
            grouped: false,
            group_by: fields::CLASS.to_string(),
            sort_field: None,
            sort_direction: SortDirection::Ascending,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            visible_columns: Vec::new(),
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        ViewState::default()
    }

    /// Creates a view state with every derived column visible.
    pub fn for_columns(columns: &[Column]) -> Self {
        let mut state = ViewState::default();
        state.visible_columns = columns.iter().map(|c| c.key.clone()).collect();
        state
    }

    /// Applies the header-click sort semantics: selecting the active sort
    /// field flips direction; selecting a different field sorts ascending.
    pub fn toggle_sort(&mut self, field: &str) {
        if self.sort_field.as_deref() == Some(field) {
            self.sort_direction = self.sort_direction.flipped();
        } else {
            self.sort_field = Some(field.to_string());
            self.sort_direction = SortDirection::Ascending;
        }
    }

    /// Shows or hides a column by key.
    pub fn set_column_visible(&mut self, key: &str, visible: bool) {
        if visible {
            if !self.visible_columns.iter().any(|k| k == key) {
                self.visible_columns.push(key.to_string());
            }
        } else {
            self.visible_columns.retain(|k| k != key);
        }
    }
}
