//! FILENAME: view-engine/src/summary.rs
//! Summary metrics for the dashboard's overview cards.
//!
//! Aggregates the (already filtered) record collection into the headline
//! numbers: totals, distinct counts, and per-class averages.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use records::{fields, Record};

/// Headline metrics over one record collection.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    /// Sum of every record's revenue.
    pub total_revenue: f64,

    /// Sum of every record's check-ins.
    pub total_checkins: f64,

    /// Number of distinct class names.
    pub class_count: usize,

    /// Number of distinct locations.
    pub location_count: usize,

    /// `total_revenue / class_count`; 0 when there are no classes.
    pub avg_revenue_per_class: f64,

    /// `total_checkins / class_count`; 0 when there are no classes.
    pub avg_checkins_per_class: f64,
}

/// Computes the summary metrics. Numeric fields read leniently: numbers
/// pass through, numeric text parses, anything else counts as 0. Distinct
/// counts are over display values, so records missing the field share one
/// blank entry.
pub fn summarize(data: &[Record]) -> Summary {
    let mut total_revenue = 0.0;
    let mut total_checkins = 0.0;
    let mut classes: FxHashSet<String> = FxHashSet::default();
    let mut locations: FxHashSet<String> = FxHashSet::default();

    for record in data {
        total_revenue += record
            .get(fields::REVENUE)
            .map(|v| v.to_number_lossy())
            .unwrap_or(0.0);
        total_checkins += record
            .get(fields::CHECKINS)
            .map(|v| v.to_number_lossy())
            .unwrap_or(0.0);

        classes.insert(
            record
                .get(fields::CLASS)
                .map(|v| v.display_value())
                .unwrap_or_default(),
        );
        locations.insert(
            record
                .get(fields::LOCATION)
                .map(|v| v.display_value())
                .unwrap_or_default(),
        );
    }

    let class_count = classes.len();
    let location_count = locations.len();

    let (avg_revenue_per_class, avg_checkins_per_class) = if class_count == 0 {
        (0.0, 0.0)
    } else {
        (
            total_revenue / class_count as f64,
            total_checkins / class_count as f64,
        )
    };

    Summary {
        total_revenue,
        total_checkins,
        class_count,
        location_count,
        avg_revenue_per_class,
        avg_checkins_per_class,
    }
}
