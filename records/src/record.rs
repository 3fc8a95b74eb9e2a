//! FILENAME: records/src/record.rs
//! PURPOSE: Defines the fundamental data structures for one analytics record.
//! CONTEXT: This file contains the `Record` struct and `FieldValue` enum.
//! A record is one row of class/attendance/revenue data as delivered by the
//! data-loading layer: an ordered set of named fields whose shape is not
//! fixed by this crate. Field order in the first record defines column order.

use serde::{Deserialize, Serialize};

// ============================================================================
// WELL-KNOWN FIELD KEYS
// ============================================================================

/// Field keys the loader emits for class analytics data. Records are open
/// (any string key is accepted); these constants name the fields the rest
/// of the workspace reads directly.
pub mod fields {
    /// Unique identifier carried by every record.
    pub const UNIQUE_ID: &str = "uniqueID";
    /// Normalized class name; the default grouping key.
    pub const CLASS: &str = "cleanedClass";
    /// Trainer name.
    pub const TEACHER: &str = "teacherName";
    /// Studio location.
    pub const LOCATION: &str = "location";
    /// Check-in count for the class.
    pub const CHECKINS: &str = "totalCheckins";
    /// Revenue for the class.
    pub const REVENUE: &str = "totalRevenue";
}

// ============================================================================
// FIELD VALUE
// ============================================================================

/// A primitive value held by one field of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
}

impl FieldValue {
    /// Returns the plain string form of the value, used for searching,
    /// string comparison, and default cell rendering.
    pub fn display_value(&self) -> String {
        match self {
            FieldValue::Empty => String::new(),
            FieldValue::Number(n) => {
                // Format without unnecessary decimal places
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{:.0}", n)
                } else {
                    format!("{}", n)
                }
            }
            FieldValue::Text(s) => s.clone(),
            FieldValue::Boolean(b) => {
                if *b { "TRUE" } else { "FALSE" }.to_string()
            }
        }
    }

    /// Returns the numeric value, if this field holds a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric reading with a text fallback: numbers pass through, numeric
    /// text parses, everything else reads as 0. Loader output occasionally
    /// carries numeric columns as text.
    pub fn to_number_lossy(&self) -> f64 {
        match self {
            FieldValue::Number(n) => *n,
            FieldValue::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Empty)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

// ============================================================================
// RECORD
// ============================================================================

/// One row of analytics data: an insertion-ordered list of named fields.
/// Lookup is linear; records carry on the order of a dozen fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    pub fn new() -> Self {
        Record { fields: Vec::new() }
    }

    /// Sets a field, replacing the value if the key already exists.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.fields.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.fields.push((key, value));
        }
    }

    /// Builder-style `set`, for constructing records inline.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Returns the value of a field, or None when the record does not
    /// carry it. Absent fields are legal: the loader's shape may vary
    /// between records.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Iterates fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates field values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &FieldValue> {
        self.fields.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The record's unique identifier, rendered as a string. Empty when the
    /// loader failed to supply one.
    pub fn unique_id(&self) -> String {
        self.get(fields::UNIQUE_ID)
            .map(|v| v.display_value())
            .unwrap_or_default()
    }

    /// True when any field value's lower-cased string form contains `term`.
    /// `term` must already be lower-cased; an empty term matches everything.
    pub fn matches_search(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        self.values()
            .any(|v| v.display_value().to_lowercase().contains(term))
    }
}
