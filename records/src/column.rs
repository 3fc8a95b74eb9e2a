//! FILENAME: records/src/column.rs
//! PURPOSE: Column descriptors and their derivation from record shape.
//! CONTEXT: The column set is implicitly defined by the field names of the
//! first record in the input collection. It is derived once per collection
//! and stays stable until the collection itself is replaced.

use serde::{Deserialize, Serialize};

use crate::record::{FieldValue, Record};

// ============================================================================
// COLUMN DESCRIPTOR
// ============================================================================

/// Horizontal alignment hint for the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnAlign {
    Left,
    Right,
}

/// Describes one column of the table view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Field key this column reads from each record.
    pub key: String,

    /// Display label (defaults to the field key).
    pub label: String,

    /// Whether the column can be used as a sort field.
    pub sortable: bool,

    /// Whether the column holds numeric values.
    pub numeric: bool,

    /// Whether numeric values render in the fixed currency format.
    pub currency: bool,
}

impl Column {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Column {
            label: key.clone(),
            key,
            sortable: true,
            numeric: false,
            currency: false,
        }
    }

    /// Marks the column as numeric (right-aligned).
    pub fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }

    /// Marks the column as currency. Implies numeric.
    pub fn currency(mut self) -> Self {
        self.numeric = true;
        self.currency = true;
        self
    }

    /// Numeric columns right-align; everything else left-aligns.
    pub fn alignment(&self) -> ColumnAlign {
        if self.numeric {
            ColumnAlign::Right
        } else {
            ColumnAlign::Left
        }
    }
}

// ============================================================================
// DERIVATION
// ============================================================================

/// Derives the column set from the shape of the first record: one sortable
/// column per field, in field order. The `numeric` flag reflects the first
/// record's value type; numeric columns whose key names revenue are flagged
/// `currency`.
///
/// An empty collection has an empty column set.
pub fn derive_columns(data: &[Record]) -> Vec<Column> {
    let Some(first) = data.first() else {
        return Vec::new();
    };

    first
        .iter()
        .map(|(key, value)| {
            let numeric = matches!(value, FieldValue::Number(_));
            let currency = numeric && key.to_lowercase().contains("revenue");
            Column {
                key: key.to_string(),
                label: key.to_string(),
                sortable: true,
                numeric,
                currency,
            }
        })
        .collect()
}

/// Order-preserving intersection of the derived column set with the
/// visible-column key set. Keys not present in `columns` are ignored, which
/// keeps the visible set a subset of the derived set.
pub fn filter_visible(columns: &[Column], visible_keys: &[String]) -> Vec<Column> {
    columns
        .iter()
        .filter(|column| visible_keys.iter().any(|key| *key == column.key))
        .cloned()
        .collect()
}
