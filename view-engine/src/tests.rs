//! FILENAME: view-engine/src/tests.rs
//! PURPOSE: Consolidated unit tests for the view pipeline.

use crate::definition::{SortDirection, ViewState};
use crate::engine::{compute_view, distinct_values, UNGROUPED_LABEL};
use crate::view::ViewRowType;
use records::{derive_columns, fields, Column, Record};

// ========================================
// FIXTURES
// ========================================

/// Five classes across two class names, three locations, three trainers.
fn studio_data() -> Vec<Record> {
    vec![
        Record::new()
            .with(fields::UNIQUE_ID, "r1")
            .with(fields::CLASS, "Yoga")
            .with(fields::TEACHER, "Asha Rao")
            .with(fields::LOCATION, "Downtown")
            .with(fields::CHECKINS, 12.0)
            .with(fields::REVENUE, 1800.0),
        Record::new()
            .with(fields::UNIQUE_ID, "r2")
            .with(fields::CLASS, "Yoga")
            .with(fields::TEACHER, "Ben Ortiz")
            .with(fields::LOCATION, "Uptown")
            .with(fields::CHECKINS, 18.0)
            .with(fields::REVENUE, 2400.0),
        Record::new()
            .with(fields::UNIQUE_ID, "r3")
            .with(fields::CLASS, "Spin")
            .with(fields::TEACHER, "Asha Rao")
            .with(fields::LOCATION, "Downtown")
            .with(fields::CHECKINS, 25.0)
            .with(fields::REVENUE, 3100.0),
        Record::new()
            .with(fields::UNIQUE_ID, "r4")
            .with(fields::CLASS, "Spin")
            .with(fields::TEACHER, "Carla Mendes")
            .with(fields::LOCATION, "Uptown")
            .with(fields::CHECKINS, 16.0)
            .with(fields::REVENUE, 2000.0),
        Record::new()
            .with(fields::UNIQUE_ID, "r5")
            .with(fields::CLASS, "Spin")
            .with(fields::TEACHER, "Ben Ortiz")
            .with(fields::LOCATION, "Midtown")
            .with(fields::CHECKINS, 9.0)
            .with(fields::REVENUE, 950.0),
    ]
}

/// `count` records with ids r1..rN, alternating class names.
fn numbered_data(count: usize) -> Vec<Record> {
    (1..=count)
        .map(|i| {
            Record::new()
                .with(fields::UNIQUE_ID, format!("r{}", i))
                .with(fields::CLASS, if i % 2 == 0 { "Yoga" } else { "Spin" })
                .with(fields::CHECKINS, i as f64)
        })
        .collect()
}

fn state_for(data: &[Record]) -> (Vec<Column>, ViewState) {
    let columns = derive_columns(data);
    let state = ViewState::for_columns(&columns);
    (columns, state)
}

fn row_ids(view: &crate::view::TableView) -> Vec<String> {
    view.rows.iter().map(|r| r.row_id.clone()).collect()
}

// ========================================
// FILTERING
// ========================================

#[test]
fn empty_search_returns_full_input_in_order() {
    let data = studio_data();
    let (columns, state) = state_for(&data);

    let view = compute_view(&data, &columns, &state);
    assert_eq!(row_ids(&view), vec!["r1", "r2", "r3", "r4", "r5"]);
    assert!(view.rows.iter().all(|r| r.row_type == ViewRowType::Standard));
    assert_eq!(view.pagination.total_rows, 5);
    assert_eq!(view.pagination.total_pages, 1);
}

#[test]
fn search_is_case_insensitive_substring() {
    let data = vec![Record::new()
        .with(fields::UNIQUE_ID, "r1")
        .with(fields::CLASS, "Yoga Flow")];
    let (columns, mut state) = state_for(&data);

    state.search_term = "yoga".to_string();
    let view = compute_view(&data, &columns, &state);
    assert_eq!(row_ids(&view), vec!["r1"]);
}

#[test]
fn search_filters_to_a_subset() {
    let data = studio_data();
    let (columns, mut state) = state_for(&data);

    state.search_term = "downtown".to_string();
    let view = compute_view(&data, &columns, &state);
    assert_eq!(row_ids(&view), vec!["r1", "r3"]);

    // Any hit must come from the input set.
    let input_ids: Vec<String> = data.iter().map(|r| r.unique_id()).collect();
    assert!(view.rows.iter().all(|r| input_ids.contains(&r.row_id)));
}

#[test]
fn search_matches_numeric_fields_as_text() {
    let data = studio_data();
    let (columns, mut state) = state_for(&data);

    state.search_term = "3100".to_string();
    let view = compute_view(&data, &columns, &state);
    assert_eq!(row_ids(&view), vec!["r3"]);
}

#[test]
fn filter_set_is_a_case_insensitive_conjunction() {
    let data = studio_data();
    let (columns, mut state) = state_for(&data);

    state.filters.set(fields::TEACHER, "asha");
    let view = compute_view(&data, &columns, &state);
    assert_eq!(row_ids(&view), vec!["r1", "r3"]);

    state.filters.set(fields::LOCATION, "Uptown");
    let view = compute_view(&data, &columns, &state);
    assert!(view.rows.is_empty());
}

#[test]
fn filter_set_all_sentinel_is_inactive() {
    let data = studio_data();
    let (columns, mut state) = state_for(&data);

    state.filters.set(fields::TEACHER, "all");
    state.filters.set(fields::LOCATION, "");
    assert_eq!(state.filters.active_count(), 0);

    let view = compute_view(&data, &columns, &state);
    assert_eq!(view.rows.len(), 5);
}

#[test]
fn filter_on_absent_field_rejects_all_records() {
    let data = studio_data();
    let (columns, mut state) = state_for(&data);

    state.filters.set("membershipTier", "gold");
    let view = compute_view(&data, &columns, &state);
    assert!(view.rows.is_empty());
}

// ========================================
// GROUPING
// ========================================

#[test]
fn grouping_emits_headers_in_first_seen_order() {
    let data = studio_data();
    let (columns, mut state) = state_for(&data);

    state.grouped = true;
    let view = compute_view(&data, &columns, &state);

    assert_eq!(
        row_ids(&view),
        vec!["group-Yoga", "r1", "r2", "group-Spin", "r3", "r4", "r5"]
    );

    let types: Vec<ViewRowType> = view.rows.iter().map(|r| r.row_type).collect();
    assert_eq!(
        types,
        vec![
            ViewRowType::GroupHeader,
            ViewRowType::GroupMember,
            ViewRowType::GroupMember,
            ViewRowType::GroupHeader,
            ViewRowType::GroupMember,
            ViewRowType::GroupMember,
            ViewRowType::GroupMember,
        ]
    );
}

#[test]
fn grouping_round_trip_preserves_member_count() {
    let data = studio_data();
    let (columns, mut state) = state_for(&data);

    state.grouped = true;
    let view = compute_view(&data, &columns, &state);

    let headers = view.rows.iter().filter(|r| r.is_group_header()).count();
    let members = view.rows.iter().filter(|r| r.is_group_member()).count();
    assert_eq!(members, data.len());
    assert_eq!(headers, 2); // distinct group keys
}

#[test]
fn grouping_header_copies_first_member_record() {
    let data = studio_data();
    let (columns, mut state) = state_for(&data);

    state.grouped = true;
    let view = compute_view(&data, &columns, &state);

    let header = &view.rows[0];
    assert_eq!(header.record.unique_id(), "r1");
    assert_eq!(
        header.record.get(fields::CHECKINS).and_then(|v| v.as_number()),
        Some(12.0)
    );
}

#[test]
fn grouping_missing_key_falls_into_blank_group() {
    let mut data = studio_data();
    data.push(Record::new().with(fields::UNIQUE_ID, "r6"));
    let (columns, mut state) = state_for(&data);

    state.grouped = true;
    let view = compute_view(&data, &columns, &state);

    let blank_header = view
        .rows
        .iter()
        .find(|r| r.row_id == format!("group-{}", UNGROUPED_LABEL))
        .expect("blank group header");
    assert!(blank_header.is_group_header());
    assert_eq!(view.rows.last().unwrap().row_id, "r6");
}

// ========================================
// SORTING
// ========================================

#[test]
fn sort_numeric_ascending_and_descending() {
    let data = studio_data();
    let (columns, mut state) = state_for(&data);

    state.sort_field = Some(fields::CHECKINS.to_string());
    let view = compute_view(&data, &columns, &state);
    assert_eq!(row_ids(&view), vec!["r5", "r1", "r4", "r2", "r3"]);

    state.sort_direction = SortDirection::Descending;
    let view = compute_view(&data, &columns, &state);
    assert_eq!(row_ids(&view), vec!["r3", "r2", "r4", "r1", "r5"]);
}

#[test]
fn sort_string_is_stable_for_duplicates() {
    let data = studio_data();
    let (columns, mut state) = state_for(&data);

    state.sort_field = Some(fields::TEACHER.to_string());
    let view = compute_view(&data, &columns, &state);
    // Asha (r1, r3), Ben (r2, r5), Carla (r4) - duplicates keep input order.
    assert_eq!(row_ids(&view), vec!["r1", "r3", "r2", "r5", "r4"]);
}

#[test]
fn descending_sort_keeps_tie_order() {
    let data = studio_data();
    let (columns, mut state) = state_for(&data);

    state.sort_field = Some(fields::CLASS.to_string());
    state.sort_direction = SortDirection::Descending;
    let view = compute_view(&data, &columns, &state);
    // Yoga block before Spin block; ties keep input order, not reversed.
    assert_eq!(row_ids(&view), vec!["r1", "r2", "r3", "r4", "r5"]);
}

#[test]
fn sort_correctness_adjacent_pairs() {
    let data = studio_data();
    let (columns, mut state) = state_for(&data);

    state.sort_field = Some(fields::REVENUE.to_string());
    let view = compute_view(&data, &columns, &state);

    let revenues: Vec<f64> = view
        .rows
        .iter()
        .map(|r| r.record.get(fields::REVENUE).unwrap().as_number().unwrap())
        .collect();
    assert!(revenues.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn sort_by_absent_field_preserves_order() {
    let data = studio_data();
    let (columns, mut state) = state_for(&data);

    state.sort_field = Some("nonexistentField".to_string());
    let view = compute_view(&data, &columns, &state);
    assert_eq!(row_ids(&view), vec!["r1", "r2", "r3", "r4", "r5"]);
}

#[test]
fn sort_applies_to_the_grouped_sequence() {
    let data = studio_data();
    let (columns, mut state) = state_for(&data);

    state.grouped = true;
    state.sort_field = Some(fields::CHECKINS.to_string());
    let view = compute_view(&data, &columns, &state);

    // Header rows carry their group's first record (Yoga: 12, Spin: 25)
    // and sort interleaved with the member rows.
    assert_eq!(
        row_ids(&view),
        vec!["r5", "group-Yoga", "r1", "r4", "r2", "group-Spin", "r3"]
    );
}

#[test]
fn toggle_sort_flips_then_resets() {
    let mut state = ViewState::new();

    state.toggle_sort(fields::CHECKINS);
    assert_eq!(state.sort_field.as_deref(), Some(fields::CHECKINS));
    assert_eq!(state.sort_direction, SortDirection::Ascending);

    state.toggle_sort(fields::CHECKINS);
    assert_eq!(state.sort_direction, SortDirection::Descending);

    state.toggle_sort(fields::REVENUE);
    assert_eq!(state.sort_field.as_deref(), Some(fields::REVENUE));
    assert_eq!(state.sort_direction, SortDirection::Ascending);
}

// ========================================
// PAGINATION
// ========================================

#[test]
fn pagination_last_partial_page() {
    let data = numbered_data(23);
    let (columns, mut state) = state_for(&data);

    state.page = 3;
    let view = compute_view(&data, &columns, &state);
    assert_eq!(view.pagination.total_pages, 3);
    assert_eq!(row_ids(&view), vec!["r21", "r22", "r23"]);
}

#[test]
fn pagination_concatenated_pages_reconstruct_input() {
    let data = numbered_data(23);
    let (columns, mut state) = state_for(&data);

    let mut collected = Vec::new();
    for page in 1..=3 {
        state.page = page;
        let view = compute_view(&data, &columns, &state);
        collected.extend(row_ids(&view));
    }

    let expected: Vec<String> = (1..=23).map(|i| format!("r{}", i)).collect();
    assert_eq!(collected, expected);
}

#[test]
fn pagination_out_of_range_page_is_clamped() {
    let data = numbered_data(23);
    let (columns, mut state) = state_for(&data);

    state.page = 99;
    let view = compute_view(&data, &columns, &state);
    assert_eq!(view.pagination.page, 3);
    assert_eq!(view.rows.len(), 3);

    state.page = 0;
    let view = compute_view(&data, &columns, &state);
    assert_eq!(view.pagination.page, 1);
    assert_eq!(view.rows.len(), 10);
}

// ========================================
// PIPELINE PROPERTIES
// ========================================

#[test]
fn pipeline_is_idempotent() {
    let data = studio_data();
    let (columns, mut state) = state_for(&data);

    state.search_term = "spin".to_string();
    state.grouped = true;
    state.sort_field = Some(fields::REVENUE.to_string());

    let first = compute_view(&data, &columns, &state);
    let second = compute_view(&data, &columns, &state);
    assert_eq!(first, second);
}

#[test]
fn column_visibility_does_not_affect_rows() {
    let data = studio_data();
    let (columns, mut state) = state_for(&data);

    let all_visible = compute_view(&data, &columns, &state);

    state.set_column_visible(fields::REVENUE, false);
    state.visible_columns.push("notAColumn".to_string());
    let reduced = compute_view(&data, &columns, &state);

    assert_eq!(all_visible.rows, reduced.rows);
    assert_eq!(reduced.columns.len(), all_visible.columns.len() - 1);
    assert!(reduced.columns.iter().all(|c| c.key != fields::REVENUE));
    // Stray visible keys never reach the output column set.
    assert!(reduced.columns.iter().all(|c| c.key != "notAColumn"));
}

#[test]
fn empty_input_degenerates_gracefully() {
    let data: Vec<Record> = Vec::new();
    let columns = derive_columns(&data);
    let mut state = ViewState::for_columns(&columns);
    state.grouped = true;
    state.sort_field = Some(fields::CHECKINS.to_string());
    state.search_term = "anything".to_string();

    let view = compute_view(&data, &columns, &state);
    assert!(view.rows.is_empty());
    assert!(view.columns.is_empty());
    assert_eq!(view.pagination.total_pages, 0);
    assert_eq!(view.pagination.rows_on_page(), 0);
}

// ========================================
// FILTER OPTIONS
// ========================================

#[test]
fn distinct_values_are_first_seen_ordered() {
    let data = studio_data();
    assert_eq!(distinct_values(&data, fields::CLASS), vec!["Yoga", "Spin"]);
    assert_eq!(
        distinct_values(&data, fields::LOCATION),
        vec!["Downtown", "Uptown", "Midtown"]
    );
    assert!(distinct_values(&data, "missingField").is_empty());
}

// ========================================
// SERIALIZATION
// ========================================

#[test]
fn view_state_serde_round_trip() {
    let data = studio_data();
    let (columns, mut state) = state_for(&data);
    state.filters.set(fields::LOCATION, "Downtown");
    state.toggle_sort(fields::REVENUE);
    state.grouped = true;
    state.page = 2;

    let json = serde_json::to_string(&state).unwrap();
    let back: ViewState = serde_json::from_str(&json).unwrap();
    assert_eq!(state, back);

    // Identical state produces an identical view after the round trip.
    let view = compute_view(&data, &columns, &state);
    let view_back = compute_view(&data, &columns, &back);
    assert_eq!(view, view_back);
}
