use rollcall::{
    core::store::{RosterStore, StoreError},
    types::ThresholdMode,
};

const TOL: f64 = 1e-9;

/// June roster from the worked scenario: Amit 27/30 = 90%, Bina 21/30 = 70%,
/// Chen 0/30 = 0%.
fn scenario_roster() -> RosterStore {
    let mut store = RosterStore::new();
    store.set_month(6).expect("30-day month");
    store.add_record(1, "Amit").expect("add");
    store.add_record(2, "Bina").expect("add");
    store.add_record(3, "Chen").expect("add");
    for day in 1..=27 {
        store.mark_attendance(1, day, true).expect("mark");
    }
    for day in 1..=21 {
        store.mark_attendance(2, day, true).expect("mark");
    }
    store
}

fn rolls_of(records: &[&rollcall::student::StudentRecord]) -> Vec<u32> {
    records.iter().map(|r| r.roll).collect()
}

#[test]
fn average_matches_worked_scenario() {
    let store = scenario_roster();
    let avg = store.average_attendance().expect("average");
    assert!((avg - 160.0 / 3.0).abs() < TOL, "avg was {avg}");
}

#[test]
fn average_on_empty_roster_is_an_error() {
    let store = RosterStore::new();
    assert_eq!(store.average_attendance(), Err(StoreError::EmptyStore));
}

#[test]
fn extremes_match_worked_scenario() {
    let store = scenario_roster();
    let ext = store.extreme_attendance().expect("extremes");
    assert_eq!(ext.max.roll, 1);
    assert!((ext.max_percentage - 90.0).abs() < TOL);
    assert_eq!(ext.min.roll, 3);
    assert!((ext.min_percentage - 0.0).abs() < TOL);
}

#[test]
fn extremes_tie_break_on_first_occurrence() {
    let mut store = RosterStore::new();
    store.add_record(5, "Esha").expect("add");
    store.add_record(6, "Faiz").expect("add");
    store.add_record(7, "Gita").expect("add");
    // All three at 0%, so the first record is both max and min.
    let ext = store.extreme_attendance().expect("extremes");
    assert_eq!(ext.max.roll, 5);
    assert_eq!(ext.min.roll, 5);

    // Two records tied at the top: still the earlier one.
    store.mark_attendance(6, 1, true).expect("mark");
    store.mark_attendance(7, 1, true).expect("mark");
    let ext = store.extreme_attendance().expect("extremes");
    assert_eq!(ext.max.roll, 6);
}

#[test]
fn extremes_on_empty_roster_is_an_error() {
    let store = RosterStore::new();
    assert_eq!(store.extreme_attendance(), Err(StoreError::EmptyStore));
}

#[test]
fn threshold_filters_are_strict() {
    let store = scenario_roster();
    assert_eq!(
        rolls_of(&store.filter_by_threshold(75.0, ThresholdMode::Above)),
        vec![1]
    );
    assert_eq!(
        rolls_of(&store.filter_by_threshold(90.0, ThresholdMode::Above)),
        Vec::<u32>::new()
    );
    assert_eq!(
        rolls_of(&store.filter_by_threshold(70.0, ThresholdMode::Below)),
        vec![3]
    );
}

#[test]
fn range_filter_is_inclusive() {
    let store = scenario_roster();
    assert_eq!(rolls_of(&store.filter_by_range(60.0, 80.0)), vec![2]);
    assert_eq!(rolls_of(&store.filter_by_range(70.0, 90.0)), vec![1, 2]);
    assert_eq!(rolls_of(&store.filter_by_range(95.0, 99.0)), Vec::<u32>::new());
}

#[test]
fn day_report_counts_and_guards_empty_roster() {
    let store = scenario_roster();
    let report = store.attendance_for_day(22).expect("report");
    assert_eq!(report.entries.len(), 3);
    assert_eq!(report.present_count, 1);
    assert!((report.percentage - 100.0 / 3.0).abs() < TOL);
    assert!(report.entries[0].present);
    assert!(!report.entries[1].present);

    assert_eq!(
        store.attendance_for_day(31).unwrap_err(),
        StoreError::InvalidDay(31)
    );

    let empty = RosterStore::new();
    let report = empty.attendance_for_day(1).expect("report on empty");
    assert!(report.entries.is_empty());
    assert_eq!(report.present_count, 0);
    assert_eq!(report.percentage, 0.0);
}

#[test]
fn sort_orders_match_their_keys() {
    let mut store = scenario_roster();
    store.update_name(1, "Zoya").expect("rename for name sort");

    store.sort_by_attendance_desc();
    assert_eq!(
        store.list_all().iter().map(|r| r.roll).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );

    store.sort_by_name();
    assert_eq!(
        store.list_all().iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
        vec!["Bina", "Chen", "Zoya"]
    );

    store.sort_by_roll();
    assert_eq!(
        store.list_all().iter().map(|r| r.roll).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}

#[test]
fn attendance_sort_is_stable_on_ties() {
    let mut store = RosterStore::new();
    store.add_record(9, "Ida").expect("add");
    store.add_record(4, "Dev").expect("add");
    store.add_record(6, "Faiz").expect("add");
    // All at 0%: descending-attendance sort must keep the current order.
    store.sort_by_attendance_desc();
    assert_eq!(
        store.list_all().iter().map(|r| r.roll).collect::<Vec<_>>(),
        vec![9, 4, 6]
    );
}

#[test]
fn store_is_queryable_by_key_after_sorting() {
    let mut store = scenario_roster();
    store.sort_by_attendance_desc();
    assert_eq!(store.find_by_roll(3).expect("find").name, "Chen");
    store.delete_record(2).expect("delete mid-order");
    assert_eq!(
        store.list_all().iter().map(|r| r.roll).collect::<Vec<_>>(),
        vec![1, 3]
    );
}
